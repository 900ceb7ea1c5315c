//! Sequential reference copy algorithms.
//!
//! ## Purpose
//!
//! This module provides the element-by-element copy routines every backend can
//! fall back to. Their final destination contents are the contract every
//! specialised copy must reproduce.
//!
//! ## Design notes
//!
//! * **Single pass**: Elements are read and assigned in increasing order.
//! * **No acceleration**: Only `Clone` is used; no bulk memory operations.
//! * **Bounded**: Writes stop at the end of the shorter side, so a destination
//!   that is too short truncates the copy instead of writing out of bounds.
//!
//! ## Invariants
//!
//! * The returned position equals the number of destination elements written.
//! * A zero count performs no reads and no writes.
//!
//! ## Non-goals
//!
//! * This module does not validate lengths (handled by `validator`).

/// Copy from an iterator of sources into an iterator of destinations.
///
/// Returns the number of elements assigned.
#[inline]
pub fn copy_iter<'s, 'd, T, I, O>(src: I, dest: O) -> usize
where
    T: Clone + 's + 'd,
    I: IntoIterator<Item = &'s T>,
    O: IntoIterator<Item = &'d mut T>,
{
    let mut written = 0;
    for (slot, value) in dest.into_iter().zip(src) {
        slot.clone_from(value);
        written += 1;
    }
    written
}

/// Copy `src` into the front of `dest`.
///
/// Returns the position in `dest` one past the last element written.
#[inline]
pub fn copy<T: Clone>(src: &[T], dest: &mut [T]) -> usize {
    copy_iter(src, dest)
}

/// Copy the first `n` elements of `src` into the front of `dest`.
///
/// Returns the position in `dest` one past the last element written; `0` when
/// `n == 0`.
#[inline]
pub fn copy_n<T: Clone>(src: &[T], n: usize, dest: &mut [T]) -> usize {
    if n == 0 {
        return 0;
    }
    copy_iter(src.iter().take(n), dest)
}
