//! # fastStrata - Parallel and GPU backends for strata
//!
//! `fastStrata` supplies the backends a `strata` dispatcher routes to when
//! handles belong to the `Parallel` or `Accelerator` spaces:
//!
//! - **`RayonBackend`** (feature `cpu`, default): vectorized searches, stable
//!   comparison and radix sorts, and copies spread over the rayon pool.
//! - **`GpuBackend`** (feature `gpu`): vectorized searches on the GPU through
//!   `wgpu` for keys whose order fits in 32 bits.
//!
//! ## Quick Start
//!
//! ```rust
//! use fastStrata::prelude::*;
//!
//! let dispatcher = dispatcher();
//!
//! let mut keys: Vec<u32> = (0..10_000).rev().collect();
//! dispatcher.stable_sort(Parallel::view_mut(&mut keys))?;
//! assert!(keys.windows(2).all(|w| w[0] <= w[1]));
//!
//! let queries = [0u32, 5_000, 20_000];
//! let mut found = [false; 3];
//! dispatcher.binary_search_many(
//!     Parallel::view(&keys),
//!     Parallel::view(&queries),
//!     Parallel::view_mut(&mut found),
//! )?;
//! assert_eq!(found, [true, true, false]);
//! # Result::<(), StrataError>::Ok(())
//! ```
//!
//! ## Inputs
//!
//! Slices, vectors and contiguous one-dimensional `ndarray` arrays can be
//! turned into handles with [`StrataInput`](prelude::StrataInput):
//!
//! ```rust
//! use fastStrata::prelude::*;
//! use ndarray::Array1;
//!
//! let sorted = Array1::from(vec![1.0, 2.0, 2.0, 4.0]);
//! let view = sorted.view_in::<Parallel>()?;
//! assert_eq!(dispatcher().equal_range(view, &2.0)?, (1, 3));
//! # Result::<(), StrataError>::Ok(())
//! ```

#![allow(non_snake_case)]

/// GPU-accelerated backend.
#[cfg(feature = "gpu")]
pub mod gpu {
    pub use crate::engine::gpu::{GpuBackend, GpuExecutor, SearchMode};
}

// Layer 3: Engine - concrete backends.
mod engine;

// High-level API wiring the backends into a dispatcher.
mod api;

// Input data handling.
mod input;

// Standard fastStrata prelude.
pub mod prelude {
    pub use crate::api::{AcceleratorBackend, FastDispatcher, ParallelBackend, dispatcher};
    #[cfg(feature = "cpu")]
    pub use crate::engine::executor::RayonBackend;
    #[cfg(feature = "gpu")]
    pub use crate::engine::gpu::GpuBackend;
    pub use crate::input::{StrataInput, StrataInputMut};
    pub use strata::prelude::*;
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
    pub mod input {
        pub use crate::input::*;
    }
}
