//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the backend tags, handles, comparators, error type and
//! scratch buffers used throughout the crate. It has zero internal
//! dependencies within the crate.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: API
//!   ↓
//! Layer 3: Engine
//!   ↓
//! Layer 2: Algorithms
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Backend tags and resolution.
pub mod backend;

/// Backend-tagged sequence handles.
pub mod handle;

/// Comparators.
pub mod compare;

/// Shared error types.
pub mod errors;

/// Buffer management.
pub mod buffer;
