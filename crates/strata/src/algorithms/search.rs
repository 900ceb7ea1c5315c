//! Sequential binary searches over sorted sequences.
//!
//! ## Purpose
//!
//! This module provides the host reference implementations of the search
//! family, both for a single query and for a sequence of queries.
//!
//! ## Key concepts
//!
//! * **lower bound**: first position `i` with `!less(src[i], value)`.
//! * **upper bound**: first position `i` with `less(value, src[i])`.
//! * **equal range**: `(lower bound, upper bound)`.
//!
//! ## Invariants
//!
//! * `src` is partitioned with respect to the comparator (i.e. sorted by it).
//! * Returned positions lie in `0..=src.len()`.
//!
//! ## Non-goals
//!
//! * This module does not check that `src` is sorted.

// Internal dependencies
use crate::primitives::compare::Compare;

// ============================================================================
// Scalar Queries
// ============================================================================

/// First position where `value` could be inserted without breaking order.
#[inline]
pub fn lower_bound<T, C: Compare<T> + ?Sized>(src: &[T], value: &T, comp: &C) -> usize {
    src.partition_point(|element| comp.less(element, value))
}

/// First position past every element equivalent to `value`.
#[inline]
pub fn upper_bound<T, C: Compare<T> + ?Sized>(src: &[T], value: &T, comp: &C) -> usize {
    src.partition_point(|element| !comp.less(value, element))
}

/// Whether an element equivalent to `value` is present.
#[inline]
pub fn binary_search<T, C: Compare<T> + ?Sized>(src: &[T], value: &T, comp: &C) -> bool {
    let pos = lower_bound(src, value, comp);
    pos < src.len() && !comp.less(value, &src[pos])
}

/// Range of elements equivalent to `value`.
#[inline]
pub fn equal_range<T, C: Compare<T> + ?Sized>(src: &[T], value: &T, comp: &C) -> (usize, usize) {
    let lower = lower_bound(src, value, comp);
    let upper = lower + upper_bound(&src[lower..], value, comp);
    (lower, upper)
}

// ============================================================================
// Vectorized Queries
// ============================================================================

/// Lower bound of every query, written to the front of `out`.
pub fn lower_bound_many<T, C: Compare<T> + ?Sized>(
    src: &[T],
    values: &[T],
    out: &mut [usize],
    comp: &C,
) {
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = lower_bound(src, value, comp);
    }
}

/// Upper bound of every query, written to the front of `out`.
pub fn upper_bound_many<T, C: Compare<T> + ?Sized>(
    src: &[T],
    values: &[T],
    out: &mut [usize],
    comp: &C,
) {
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = upper_bound(src, value, comp);
    }
}

/// Membership of every query, written to the front of `out`.
pub fn binary_search_many<T, C: Compare<T> + ?Sized>(
    src: &[T],
    values: &[T],
    out: &mut [bool],
    comp: &C,
) {
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = binary_search(src, value, comp);
    }
}

/// Equal range of every query, written to the front of `out`.
pub fn equal_range_many<T, C: Compare<T> + ?Sized>(
    src: &[T],
    values: &[T],
    out: &mut [(usize, usize)],
    comp: &C,
) {
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = equal_range(src, value, comp);
    }
}
