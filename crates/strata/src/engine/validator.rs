//! Input validation for dispatched calls.
//!
//! ## Purpose
//!
//! This module checks the length preconditions of every facade operation
//! before any backend runs, so that a backend never sees an output that is too
//! short or a value sequence that cannot follow its keys.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Cheap**: Only lengths are compared; elements are never inspected.
//!
//! ## Invariants
//!
//! * Validation is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not check that search inputs are sorted.
//! * This module does not resolve backends (handled by `primitives::backend`).

// Internal dependencies
use crate::primitives::errors::StrataError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for facade inputs.
///
/// Provides static methods returning `Result<(), StrataError>`.
pub struct Validator;

impl Validator {
    /// Validate that an output can hold one result per query.
    pub fn validate_output(
        operation: &'static str,
        queries: usize,
        output: usize,
    ) -> Result<(), StrataError> {
        if output < queries {
            return Err(StrataError::InsufficientCapacity {
                operation,
                required: queries,
                available: output,
            });
        }
        Ok(())
    }

    /// Validate that `values` can follow `keys` through a sort.
    pub fn validate_by_key(keys: usize, values: usize) -> Result<(), StrataError> {
        if values < keys {
            return Err(StrataError::MismatchedLengths {
                operation: "stable_sort_by_key",
                expected: keys,
                got: values,
            });
        }
        Ok(())
    }

    /// Validate a `copy` destination.
    pub fn validate_copy(src: usize, dest: usize) -> Result<(), StrataError> {
        Self::validate_output("copy", src, dest)
    }

    /// Validate a `copy_n` count and destination.
    pub fn validate_copy_n(src: usize, count: usize, dest: usize) -> Result<(), StrataError> {
        if count > src {
            return Err(StrataError::CountOutOfRange { count, len: src });
        }
        Self::validate_output("copy_n", count, dest)
    }
}
