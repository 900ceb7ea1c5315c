//! High-level API for dispatch with parallel and GPU backends.
//!
//! ## Purpose
//!
//! This module wires the backends of this crate into a `strata` dispatcher:
//! `Sequential` and `Generic` handles run on the host, `Parallel` handles on
//! the rayon pool, and `Accelerator` handles on the GPU.
//!
//! ## Design notes
//!
//! * **Feature-Gated**: Without `cpu`, parallel handles run sequentially.
//!   Without `gpu`, accelerator handles run on the parallel backend.
//! * **Re-uses the core facade**: `FastDispatcher` is a `strata::Dispatcher`
//!   with different slots; every operation and error is the core's.

// Feature-gated imports
#[cfg(feature = "cpu")]
use crate::engine::executor::RayonBackend;
#[cfg(feature = "gpu")]
use crate::engine::gpu::GpuBackend;

// Publicly re-exported types
pub use strata::internals::engine::dispatch::{Backend, Dispatcher, RadixPolicy};
pub use strata::internals::engine::sequential::SequentialBackend;
pub use strata::internals::primitives::errors::StrataError;

/// Backend serving `Parallel` handles.
#[cfg(feature = "cpu")]
pub type ParallelBackend = RayonBackend;
/// Backend serving `Parallel` handles.
#[cfg(not(feature = "cpu"))]
pub type ParallelBackend = SequentialBackend;

/// Backend serving `Accelerator` handles.
#[cfg(feature = "gpu")]
pub type AcceleratorBackend = GpuBackend;
/// Backend serving `Accelerator` handles.
#[cfg(not(feature = "gpu"))]
pub type AcceleratorBackend = ParallelBackend;

/// Dispatcher with every space served by this crate's backends.
pub type FastDispatcher = Dispatcher<SequentialBackend, ParallelBackend, AcceleratorBackend>;

/// Create a dispatcher wired to the parallel and GPU backends.
pub fn dispatcher() -> FastDispatcher {
    Dispatcher::new()
        .with_parallel(ParallelBackend::default())
        .with_accelerator(AcceleratorBackend::default())
}
