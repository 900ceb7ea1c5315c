//! Layer 3: Engine
//!
//! # Purpose
//!
//! This layer turns a call on backend-tagged handles into the invocation of one
//! concrete implementation: it decides the sort strategy, validates lengths,
//! selects the registered backend and forwards the call.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: API
//!   ↓
//! Layer 3: Engine ← You are here
//!   ↓
//! Layer 2: Algorithms
//!   ↓
//! Layer 1: Primitives
//! ```

/// Radix-sort specialization predicate.
pub mod specialize;

/// Validation utilities.
pub mod validator;

/// Backend trait, registry and dispatch facade.
pub mod dispatch;

/// Sequential host backend.
pub mod sequential;
