//! Layer 3: Engine
//!
//! This layer provides the concrete backends registered with the `strata`
//! dispatcher for the parallel-host and accelerator spaces.

// Parallel host backend using CPU threads
#[cfg(feature = "cpu")]
pub mod executor;

// GPU-accelerated backend using wgpu
#[cfg(feature = "gpu")]
pub mod gpu;
