//! Error types for dispatch operations.
//!
//! ## Purpose
//!
//! This module defines the error conditions a dispatched call can report:
//! backend conflicts found by the runtime resolver, caller precondition
//! violations caught before dispatch, and failures reported by a backend
//! implementation.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending lengths, counts or tags.
//! * **Pass-through**: Backend failures are carried verbatim in `Device`; the
//!   dispatcher never rewrites them.
//! * **No-std**: Supports `no_std` environments by using `alloc` for messages.
//!
//! ## Invariants
//!
//! * All variants provide sufficient context for diagnosis.
//! * Error messages are consistent in tone and formatting.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * Build-time backend conflicts never reach this type; they are type errors.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// Internal dependencies
use crate::primitives::backend::BackendTag;

// ============================================================================
// Error Type
// ============================================================================

/// Error type for dispatched operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrataError {
    /// Two handles of one call belong to different concrete backends.
    BackendConflict {
        /// Backend resolved so far.
        first: BackendTag,
        /// Backend of the handle that could not be combined.
        second: BackendTag,
    },

    /// A companion sequence is shorter than the sequence it must follow.
    MismatchedLengths {
        /// Operation that rejected the input.
        operation: &'static str,
        /// Required length.
        expected: usize,
        /// Length provided.
        got: usize,
    },

    /// An output or destination cannot hold every element the call writes.
    InsufficientCapacity {
        /// Operation that rejected the input.
        operation: &'static str,
        /// Number of elements that will be written.
        required: usize,
        /// Number of elements available.
        available: usize,
    },

    /// `copy_n` was asked for more elements than the source holds.
    CountOutOfRange {
        /// Requested count.
        count: usize,
        /// Source length.
        len: usize,
    },

    /// An input container cannot be viewed as a contiguous sequence.
    InvalidInput(String),

    /// Failure reported by a backend implementation (e.g. device errors).
    Device(String),
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for StrataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::BackendConflict { first, second } => {
                write!(
                    f,
                    "Backend conflict: cannot combine {first} and {second} in one call"
                )
            }
            Self::MismatchedLengths {
                operation,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Length mismatch in {operation}: expected at least {expected} elements, got {got}"
                )
            }
            Self::InsufficientCapacity {
                operation,
                required,
                available,
            } => {
                write!(
                    f,
                    "Insufficient capacity in {operation}: {required} elements required, {available} available"
                )
            }
            Self::CountOutOfRange { count, len } => {
                write!(f, "Count out of range: {count} (source holds {len})")
            }
            Self::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            Self::Device(msg) => write!(f, "Device error: {msg}"),
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for StrataError {}
