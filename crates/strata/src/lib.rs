//! # strata - Backend dispatch for generic sequence algorithms
//!
//! `strata` routes backend-agnostic operations (sort, binary search, copy) on
//! tagged sequence handles to the implementation registered for the backend
//! those handles belong to, and picks a stable radix sort instead of a
//! comparison sort whenever the key type and comparator make it equivalent.
//!
//! ## How dispatch works
//!
//! Every handle carries a *space*: `Generic`, `Sequential`, `Parallel` or
//! `Accelerator`. The spaces of all handles in a call are combined:
//!
//! - handles that agree resolve to their common space;
//! - `Generic` is absorbed by any concrete space;
//! - two different concrete spaces do not resolve, and the call does not compile.
//!
//! The [`Dispatcher`](prelude::Dispatcher) holds one backend per concrete space
//! and forwards the call to the resolved one.
//!
//! ## Quick Start
//!
//! ```rust
//! use strata::prelude::*;
//!
//! let dispatcher = Dispatcher::new();
//!
//! // Stable sort by key: equal keys keep their input order.
//! let mut keys = vec![3, 1, 3, 1];
//! let mut values = vec!['a', 'b', 'c', 'd'];
//! dispatcher.stable_sort_by_key(
//!     Sequential::view_mut(&mut keys),
//!     Sequential::view_mut(&mut values),
//! )?;
//! assert_eq!(keys, [1, 1, 3, 3]);
//! assert_eq!(values, ['b', 'd', 'a', 'c']);
//!
//! // Bounds on a sorted sequence.
//! let sorted = [1, 2, 2, 2, 4];
//! assert_eq!(dispatcher.lower_bound(Generic::view(&sorted), &2)?, 1);
//! assert_eq!(dispatcher.upper_bound(Generic::view(&sorted), &2)?, 4);
//! assert_eq!(dispatcher.equal_range(Generic::view(&sorted), &3)?, (4, 4));
//! # Result::<(), StrataError>::Ok(())
//! ```
//!
//! ## Sort Specialization
//!
//! Sorting built-in integer and float keys with exactly [`Less`](prelude::Less)
//! or [`Greater`](prelude::Greater) takes the radix path. Any other comparator,
//! including a closure computing the same order, takes the comparison path.
//!
//! ```rust
//! use strata::prelude::*;
//!
//! assert!(use_radix_sort::<u32, Less<u32>>());
//! assert!(use_radix_sort::<f64, Greater<f64>>());
//! assert!(!use_radix_sort::<String, Less<String>>());
//!
//! let by_hand = |a: &u32, b: &u32| a < b;
//! fn decide<C: 'static>(_: &C) -> bool {
//!     use_radix_sort::<u32, C>()
//! }
//! assert!(!decide(&by_hand));
//! ```
//!
//! ## Result and Error Handling
//!
//! Every facade operation returns `Result<_, StrataError>`. Errors come from
//! length validation (e.g. an output shorter than the query sequence) or are
//! passed through from the backend unchanged.
//!
//! ## Minimal Usage (no_std / Embedded)
//!
//! Disable default features to remove the standard library dependency:
//!
//! ```toml
//! [dependencies]
//! strata = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Layer 1: Primitives - tags, handles, comparators, errors and buffers.
mod primitives;

// Layer 2: Algorithms - sequential reference algorithms.
mod algorithms;

// Layer 3: Engine - specialization, validation and dispatch.
mod engine;

// High-level API.
mod api;

// Standard strata prelude.
pub mod prelude {
    pub use crate::api::Spaces::{Accelerator, Generic, Parallel, Sequential};
    pub use crate::api::{
        Backend, BackendTag, Compare, DispatchConfig, Dispatcher, Greater, Less, RadixCodec,
        RadixOrder, RadixPolicy, Resolve, Resolved, Resolved3, Select, SequentialBackend,
        Space, Specialization, StrataError, View, ViewMut, is_arithmetic, resolve_tags,
        use_radix_sort,
    };
}

/// Sequential reference algorithms.
pub use crate::api::reference;

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
