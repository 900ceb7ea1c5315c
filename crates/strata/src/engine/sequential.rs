//! Single-threaded host backend.
//!
//! ## Purpose
//!
//! This module provides the backend registered for `Sequential` and `Generic`
//! handles by default. It runs the reference algorithms unchanged.

// Internal dependencies
use crate::engine::dispatch::Backend;

/// Host backend running the sequential reference algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequentialBackend;

impl Backend for SequentialBackend {
    fn name(&self) -> &'static str {
        "sequential"
    }
}
