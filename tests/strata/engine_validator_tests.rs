#![cfg(feature = "dev")]
//! Tests for facade input validation.
//!
//! These tests verify:
//! - Output capacity checks for vectorized searches
//! - Companion length checks for sorts by key
//! - Count and destination checks for copies

use strata::internals::engine::validator::Validator;
use strata::internals::primitives::errors::StrataError;

/// Test output capacity checks.
#[test]
fn test_validate_output() {
    assert!(Validator::validate_output("lower_bound_many", 3, 3).is_ok());
    assert!(Validator::validate_output("lower_bound_many", 3, 5).is_ok());
    assert!(Validator::validate_output("lower_bound_many", 0, 0).is_ok());

    assert_eq!(
        Validator::validate_output("lower_bound_many", 4, 2),
        Err(StrataError::InsufficientCapacity {
            operation: "lower_bound_many",
            required: 4,
            available: 2,
        })
    );
}

/// Test companion length checks.
#[test]
fn test_validate_by_key() {
    assert!(Validator::validate_by_key(4, 4).is_ok());
    assert!(Validator::validate_by_key(4, 6).is_ok(), "Longer values are allowed");

    assert_eq!(
        Validator::validate_by_key(4, 3),
        Err(StrataError::MismatchedLengths {
            operation: "stable_sort_by_key",
            expected: 4,
            got: 3,
        })
    );
}

/// Test copy destination checks.
#[test]
fn test_validate_copy() {
    assert!(Validator::validate_copy(2, 2).is_ok());
    assert!(matches!(
        Validator::validate_copy(3, 2),
        Err(StrataError::InsufficientCapacity { operation: "copy", .. })
    ));
}

/// Test copy count checks, which take precedence over capacity.
#[test]
fn test_validate_copy_n() {
    assert!(Validator::validate_copy_n(5, 0, 0).is_ok());
    assert!(Validator::validate_copy_n(5, 3, 3).is_ok());

    assert_eq!(
        Validator::validate_copy_n(2, 3, 0),
        Err(StrataError::CountOutOfRange { count: 3, len: 2 })
    );
    assert_eq!(
        Validator::validate_copy_n(5, 3, 1),
        Err(StrataError::InsufficientCapacity {
            operation: "copy_n",
            required: 3,
            available: 1,
        })
    );
}

/// Test error messages.
#[test]
fn test_error_display() {
    let err = StrataError::CountOutOfRange { count: 3, len: 2 };
    assert!(err.to_string().contains('3'));

    let err = StrataError::MismatchedLengths {
        operation: "stable_sort_by_key",
        expected: 4,
        got: 3,
    };
    assert!(err.to_string().contains("stable_sort_by_key"));
}
