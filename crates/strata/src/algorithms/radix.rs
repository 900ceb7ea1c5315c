//! Stable least-significant-digit radix sort.
//!
//! ## Purpose
//!
//! This module provides the restricted-domain fast path for sorting: keys are
//! mapped through an order-preserving encoding to unsigned codes, the codes are
//! sorted with byte-wise counting passes, and the resulting permutation is
//! applied to the keys (and values).
//!
//! ## Design notes
//!
//! * **Codec**: A `RadixCodec` bundles the encoding function, the key width in
//!   bytes and the direction. It is built by the specialisation engine, which
//!   only does so when the encoding provably matches the comparator.
//! * **Stability**: Counting passes scatter in input order, so equal codes keep
//!   their relative order across passes.
//! * **Pass skipping**: A byte on which every code agrees is skipped.
//!
//! ## Key concepts
//!
//! * **Order-preserving code**: `a` ordered before `b` iff `code(a) < code(b)`;
//!   equivalent keys share a code.
//! * **Digit**: One byte of the code, least significant first.
//!
//! ## Invariants
//!
//! * Codes only use the low `bytes` bytes.
//! * The result equals a stable comparison sort under the codec's comparator.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// External dependencies
use core::fmt::{Debug, Formatter, Result as FmtResult};

// Internal dependencies
use crate::algorithms::comparison::{apply_permutation, apply_permutation_pair};
use crate::primitives::buffer::{RadixBuffer, RadixCell};

/// Number of buckets per counting pass.
pub const RADIX: usize = 256;

// ============================================================================
// Codec
// ============================================================================

/// Direction a codec sorts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RadixOrder {
    /// Smallest key first (`Less`).
    Ascending,
    /// Largest key first (`Greater`).
    Descending,
}

/// Order-preserving encoding of keys of type `K`.
pub struct RadixCodec<K> {
    encode: fn(&K) -> u128,
    bytes: usize,
    order: RadixOrder,
}

impl<K> RadixCodec<K> {
    /// Build a codec from an ascending encoding of `bytes`-wide keys.
    ///
    /// `encode` must be strictly monotone in the key order and map equivalent
    /// keys to the same code using only the low `bytes` bytes.
    pub const fn new(encode: fn(&K) -> u128, bytes: usize, order: RadixOrder) -> Self {
        Self {
            encode,
            bytes,
            order,
        }
    }

    /// Key width in bytes, i.e. the number of counting passes.
    #[inline]
    pub const fn bytes(&self) -> usize {
        self.bytes
    }

    /// Direction of the sort.
    #[inline]
    pub const fn order(&self) -> RadixOrder {
        self.order
    }

    /// Code of `key`, already adjusted for the direction.
    #[inline]
    pub fn code(&self, key: &K) -> u128 {
        let code = (self.encode)(key);
        match self.order {
            RadixOrder::Ascending => code,
            RadixOrder::Descending => !code & width_mask(self.bytes),
        }
    }
}

impl<K> Clone for RadixCodec<K> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for RadixCodec<K> {}

impl<K> Debug for RadixCodec<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("RadixCodec")
            .field("bytes", &self.bytes)
            .field("order", &self.order)
            .finish()
    }
}

/// Mask selecting the low `bytes` bytes of a code.
#[inline]
pub const fn width_mask(bytes: usize) -> u128 {
    if bytes >= 16 {
        u128::MAX
    } else {
        (1u128 << (bytes * 8)) - 1
    }
}

/// Byte `level` of `code`, least significant first.
#[inline]
pub const fn digit(code: u128, level: usize) -> usize {
    ((code >> (level * 8)) & 0xFF) as usize
}

// ============================================================================
// Sorting Functions
// ============================================================================

/// Stable radix sort of `keys`.
pub fn stable_radix_sort<K>(keys: &mut [K], codec: &RadixCodec<K>, buffer: &mut RadixBuffer) {
    if keys.len() < 2 {
        return;
    }
    let mut perm = radix_permutation(keys, codec, buffer);
    apply_permutation(keys, &mut perm);
}

/// Stable radix sort of `keys`, permuting `values` in lockstep.
///
/// Only the first `keys.len()` values take part.
pub fn stable_radix_sort_by_key<K, V>(
    keys: &mut [K],
    values: &mut [V],
    codec: &RadixCodec<K>,
    buffer: &mut RadixBuffer,
) {
    if keys.len() < 2 {
        return;
    }
    let mut perm = radix_permutation(keys, codec, buffer);
    apply_permutation_pair(keys, values, &mut perm);
}

/// Positions of `keys` in stable sorted order.
pub fn radix_permutation<K>(
    keys: &[K],
    codec: &RadixCodec<K>,
    buffer: &mut RadixBuffer,
) -> Vec<usize> {
    let RadixBuffer { cells, scratch } = buffer;
    cells.clear();
    cells.extend(keys.iter().enumerate().map(|(index, key)| RadixCell {
        code: codec.code(key),
        index,
    }));

    sort_cells(cells, codec.bytes(), scratch.reset(keys.len(), RadixCell::default()));
    cells.iter().map(|cell| cell.index).collect()
}

/// Stable sort of `cells` on the low `bytes` bytes of their codes.
///
/// `scratch` must be at least as long as `cells`.
pub fn sort_cells(cells: &mut [RadixCell], bytes: usize, scratch: &mut [RadixCell]) {
    let n = cells.len();
    if n < 2 {
        return;
    }
    let scratch = &mut scratch[..n];

    for level in 0..bytes {
        let counts = histogram(cells, level);

        // Every code shares this digit: the pass would be the identity
        if counts.iter().any(|&c| c == n) {
            continue;
        }

        let mut offsets = exclusive_prefix(&counts);
        for cell in cells.iter() {
            let d = digit(cell.code, level);
            scratch[offsets[d]] = *cell;
            offsets[d] += 1;
        }
        cells.copy_from_slice(scratch);
    }
}

/// Digit counts for one pass.
#[inline]
pub fn histogram(cells: &[RadixCell], level: usize) -> [usize; RADIX] {
    let mut counts = [0usize; RADIX];
    for cell in cells {
        counts[digit(cell.code, level)] += 1;
    }
    counts
}

/// Bucket start positions for the given digit counts.
#[inline]
pub fn exclusive_prefix(counts: &[usize; RADIX]) -> [usize; RADIX] {
    let mut offsets = [0usize; RADIX];
    let mut running = 0;
    for (offset, &count) in offsets.iter_mut().zip(counts) {
        *offset = running;
        running += count;
    }
    offsets
}
