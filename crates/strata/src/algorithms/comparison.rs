//! Stable comparison sorts and permutation utilities.
//!
//! ## Purpose
//!
//! This module provides the general sort path: a stable comparison sort for a
//! key sequence, and a stable sort of keys that carries a value sequence along.
//!
//! ## Design notes
//!
//! * **Stability**: A bottom-up merge sort over positions. Insertion sort
//!   builds short runs, then runs are merged pairwise, taking from the right
//!   run only when its head is strictly `less`.
//! * **Total on any input**: Only `less` is consulted and no ordering
//!   consistency is assumed, so comparators that are not a total order (NaN
//!   keys under `Less<f64>`) give an unspecified but complete permutation.
//! * **Index permutation**: Sort-by-key sorts positions rather than moving
//!   `(key, value)` tuples, then applies the permutation to both sequences.
//! * **In-place application**: Permutations are applied by following cycles
//!   with swaps, so neither keys nor values need to be `Clone`.
//!
//! ## Key concepts
//!
//! * **Permutation**: `perm[sorted_pos] = original_pos`.
//!
//! ## Invariants
//!
//! * A permutation passed to `apply_permutation` is a bijection on `0..n`.
//! * Equal keys keep their relative input order.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

// Internal dependencies
use crate::primitives::compare::Compare;

// ============================================================================
// Sorting Functions
// ============================================================================

/// Length of the runs built by insertion sort before merging.
pub const INSERTION_RUN: usize = 24;

/// Stable sort of `keys` by `comp`.
pub fn stable_sort<K, C: Compare<K> + ?Sized>(keys: &mut [K], comp: &C) {
    let mut perm = sorted_permutation(keys, comp);
    apply_permutation(keys, &mut perm);
}

/// Stable sort of `keys` by `comp`, permuting `values` in lockstep.
///
/// Only the first `keys.len()` values take part.
pub fn stable_sort_by_key<K, V, C: Compare<K> + ?Sized>(
    keys: &mut [K],
    values: &mut [V],
    comp: &C,
) {
    let mut perm = sorted_permutation(keys, comp);
    apply_permutation_pair(keys, values, &mut perm);
}

/// Positions of `keys` in stable sorted order.
pub fn sorted_permutation<K, C: Compare<K> + ?Sized>(keys: &[K], comp: &C) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..keys.len()).collect();

    // Fast path: already sorted keys map to the identity
    if keys.windows(2).all(|w| !comp.less(&w[1], &w[0])) {
        return perm;
    }

    sort_indices(&mut perm, keys, comp);
    perm
}

// ============================================================================
// Merge Sort over Positions
// ============================================================================

/// Stable sort of the positions in `perm` by the keys they point at.
pub fn sort_indices<K, C: Compare<K> + ?Sized>(perm: &mut [usize], keys: &[K], comp: &C) {
    let n = perm.len();
    for run in perm.chunks_mut(INSERTION_RUN) {
        insertion_sort_indices(run, keys, comp);
    }
    if n <= INSERTION_RUN {
        return;
    }

    let mut scratch = vec![0usize; n];
    let mut in_scratch = false;
    let mut width = INSERTION_RUN;
    while width < n {
        if in_scratch {
            merge_pass(&scratch, perm, width, keys, comp);
        } else {
            merge_pass(perm, &mut scratch, width, keys, comp);
        }
        in_scratch = !in_scratch;
        width = width.saturating_mul(2);
    }

    if in_scratch {
        perm.copy_from_slice(&scratch);
    }
}

/// Stable insertion sort of a short run of positions.
pub fn insertion_sort_indices<K, C: Compare<K> + ?Sized>(run: &mut [usize], keys: &[K], comp: &C) {
    for i in 1..run.len() {
        let mut j = i;
        while j > 0 && comp.less(&keys[run[j]], &keys[run[j - 1]]) {
            run.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Merge every pair of adjacent sorted runs of length `width` from `src` into `dest`.
pub fn merge_pass<K, C: Compare<K> + ?Sized>(
    src: &[usize],
    dest: &mut [usize],
    width: usize,
    keys: &[K],
    comp: &C,
) {
    let pair = width.saturating_mul(2);
    for (input, output) in src.chunks(pair).zip(dest.chunks_mut(pair)) {
        let mid = width.min(input.len());
        merge_indices(&input[..mid], &input[mid..], output, keys, comp);
    }
}

/// Stable merge of two sorted runs of positions into `out`.
///
/// `out` must hold `left.len() + right.len()` slots.
pub fn merge_indices<K, C: Compare<K> + ?Sized>(
    left: &[usize],
    right: &[usize],
    out: &mut [usize],
    keys: &[K],
    comp: &C,
) {
    let (mut i, mut j) = (0, 0);
    for slot in out.iter_mut() {
        let take_right = match (left.get(i), right.get(j)) {
            (Some(&l), Some(&r)) => comp.less(&keys[r], &keys[l]),
            (None, Some(_)) => true,
            (_, None) => false,
        };
        if take_right {
            *slot = right[j];
            j += 1;
        } else if let Some(&l) = left.get(i) {
            *slot = l;
            i += 1;
        }
    }
}

// ============================================================================
// Permutation Application
// ============================================================================

/// Rearrange `data` so that `data[i]` becomes the old `data[perm[i]]`.
///
/// `perm` is consumed: it is left as the identity.
#[inline]
pub fn apply_permutation<T>(data: &mut [T], perm: &mut [usize]) {
    follow_cycles(perm, |a, b| data.swap(a, b));
}

/// Apply the same permutation to two sequences.
#[inline]
pub fn apply_permutation_pair<K, V>(keys: &mut [K], values: &mut [V], perm: &mut [usize]) {
    follow_cycles(perm, |a, b| {
        keys.swap(a, b);
        values.swap(a, b);
    });
}

/// Decompose a gather permutation into swaps.
fn follow_cycles(perm: &mut [usize], mut swap: impl FnMut(usize, usize)) {
    for start in 0..perm.len() {
        let mut current = start;
        loop {
            let next = perm[current];
            perm[current] = current;
            if next == start {
                break;
            }
            swap(current, next);
            current = next;
        }
    }
}
