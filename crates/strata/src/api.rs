//! High-level API for backend dispatch.
//!
//! ## Purpose
//!
//! This module gathers the user-facing surface: the `Dispatcher` facade, the
//! handle and space types callers tag their sequences with, the comparators,
//! and the extension points for writing a backend.
//!
//! ## Design notes
//!
//! * **Two entry styles**: Callers either go through a `Dispatcher` with tagged
//!   handles, or call the sequential reference algorithms directly.
//! * **Extension**: Implement [`Backend`] and register it with
//!   `Dispatcher::with_host`, `with_parallel` or `with_accelerator`.
//!
//! ### Call Flow
//!
//! 1. Wrap slices as handles: `Parallel::view(&data)`.
//! 2. Call an operation on a [`Dispatcher`].
//! 3. The handle spaces select the backend at compile time.

// Publicly re-exported types
pub use crate::algorithms::radix::{RadixCodec, RadixOrder};
pub use crate::engine::dispatch::{
    Backend, DispatchConfig, Dispatcher, RadixPolicy, Select, resolve_tags,
};
pub use crate::engine::sequential::SequentialBackend;
pub use crate::engine::specialize::{
    RadixKey, Specialization, canonical_order, is_arithmetic, radix_codec, use_radix_sort,
};
pub use crate::primitives::backend::{BackendTag, Resolve, Resolved, Resolved3, Space};
pub use crate::primitives::compare::{Compare, Greater, Less};
pub use crate::primitives::errors::StrataError;
pub use crate::primitives::handle::{View, ViewMut};

/// Marker types naming each execution space.
#[allow(non_snake_case)]
pub mod Spaces {
    pub use crate::primitives::backend::{Accelerator, Generic, Parallel, Sequential};
}

/// Sequential reference algorithms, callable without a dispatcher.
pub mod reference {
    pub use crate::algorithms::scalar::{copy, copy_n};
    pub use crate::algorithms::search::{binary_search, equal_range, lower_bound, upper_bound};
}
