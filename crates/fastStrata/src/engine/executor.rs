//! Multi-core host backend.
//!
//! ## Purpose
//!
//! This module provides the implementation registered for `Parallel` handles.
//! It spreads vectorized searches, sorts and copies across CPU cores with
//! `rayon`, and runs the sequential reference algorithms for small inputs.
//!
//! ## Design notes
//!
//! * **Threshold**: Inputs shorter than `min_parallel_len` never fan out.
//! * **Stable parallel sort**: Comparison sorts sort positions. Chunks are
//!   sorted on separate workers, then merged pairwise in parallel rounds. Only
//!   `Compare::less` is consulted, so inconsistent orders (NaN keys) never
//!   abort the sort.
//! * **Parallel radix**: Keys are encoded in parallel, counted on the most
//!   significant byte in parallel, scattered stably into one bucket per digit,
//!   and the buckets are finished independently with a sequential LSD pass over
//!   the remaining bytes. Each worker reuses one `RadixBuffer`.
//! * **Buckets by split**: Buckets are carved out of one scratch vector with
//!   `split_at_mut`, so no bucket is copied.
//!
//! ## Invariants
//!
//! * Every operation produces exactly the result of the reference algorithm.
//! * Scalar searches stay sequential; one query is already logarithmic.
//!
//! ## Non-goals
//!
//! * This module does not validate lengths (handled by the dispatcher).

// External dependencies
use core::mem;
use rayon::prelude::*;
use tracing::trace;

// Export dependencies from strata crate
use strata::internals::algorithms::comparison::{
    INSERTION_RUN, apply_permutation, apply_permutation_pair, merge_indices, sort_indices,
    stable_sort, stable_sort_by_key,
};
use strata::internals::algorithms::radix::{
    RADIX, RadixCodec, digit, exclusive_prefix, histogram, radix_permutation, sort_cells,
};
use strata::internals::algorithms::{scalar, search};
use strata::internals::engine::dispatch::Backend;
use strata::internals::primitives::buffer::{RadixBuffer, RadixCell};
use strata::internals::primitives::compare::Compare;
use strata::internals::primitives::errors::StrataError;

/// Default input length below which work stays on the calling thread.
pub const DEFAULT_MIN_PARALLEL_LEN: usize = 4096;

/// Number of cells each histogram task counts.
const HISTOGRAM_CHUNK: usize = 16 * 1024;

// ============================================================================
// Rayon Backend
// ============================================================================

/// Parallel host backend built on the global rayon pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RayonBackend {
    min_parallel_len: usize,
}

impl Default for RayonBackend {
    fn default() -> Self {
        Self {
            min_parallel_len: DEFAULT_MIN_PARALLEL_LEN,
        }
    }
}

impl RayonBackend {
    /// Create a backend with the default threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input length from which operations fan out.
    pub fn min_parallel_len(mut self, len: usize) -> Self {
        self.min_parallel_len = len;
        self
    }

    /// Current fan-out threshold.
    pub fn threshold(&self) -> usize {
        self.min_parallel_len
    }

    fn fan_out(&self, operation: &'static str, len: usize) -> bool {
        let parallel = len >= self.min_parallel_len;
        if !parallel {
            trace!(operation, len, threshold = self.min_parallel_len, "below parallel threshold");
        }
        parallel
    }
}

/// Answer every query in parallel, writing to the front of `out`.
fn par_queries<T, R, F>(values: &[T], out: &mut [R], query: F)
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    out.par_iter_mut()
        .zip(values.par_iter())
        .for_each(|(slot, value)| *slot = query(value));
}

impl Backend for RayonBackend {
    fn name(&self) -> &'static str {
        "rayon"
    }

    // ========================================================================
    // Vectorized Search
    // ========================================================================

    fn lower_bound_many<T, C>(
        &self,
        src: &[T],
        values: &[T],
        out: &mut [usize],
        comp: &C,
    ) -> Result<(), StrataError>
    where
        T: Send + Sync + 'static,
        C: Compare<T> + Sync + 'static,
    {
        if self.fan_out("lower_bound_many", values.len()) {
            par_queries(values, out, |value| search::lower_bound(src, value, comp));
        } else {
            search::lower_bound_many(src, values, out, comp);
        }
        Ok(())
    }

    fn upper_bound_many<T, C>(
        &self,
        src: &[T],
        values: &[T],
        out: &mut [usize],
        comp: &C,
    ) -> Result<(), StrataError>
    where
        T: Send + Sync + 'static,
        C: Compare<T> + Sync + 'static,
    {
        if self.fan_out("upper_bound_many", values.len()) {
            par_queries(values, out, |value| search::upper_bound(src, value, comp));
        } else {
            search::upper_bound_many(src, values, out, comp);
        }
        Ok(())
    }

    fn binary_search_many<T, C>(
        &self,
        src: &[T],
        values: &[T],
        out: &mut [bool],
        comp: &C,
    ) -> Result<(), StrataError>
    where
        T: Send + Sync + 'static,
        C: Compare<T> + Sync + 'static,
    {
        if self.fan_out("binary_search_many", values.len()) {
            par_queries(values, out, |value| search::binary_search(src, value, comp));
        } else {
            search::binary_search_many(src, values, out, comp);
        }
        Ok(())
    }

    fn equal_range_many<T, C>(
        &self,
        src: &[T],
        values: &[T],
        out: &mut [(usize, usize)],
        comp: &C,
    ) -> Result<(), StrataError>
    where
        T: Send + Sync + 'static,
        C: Compare<T> + Sync + 'static,
    {
        if self.fan_out("equal_range_many", values.len()) {
            par_queries(values, out, |value| search::equal_range(src, value, comp));
        } else {
            search::equal_range_many(src, values, out, comp);
        }
        Ok(())
    }

    // ========================================================================
    // Sorting
    // ========================================================================

    fn stable_sort<K, C>(&self, keys: &mut [K], comp: &C) -> Result<(), StrataError>
    where
        K: Send + Sync + 'static,
        C: Compare<K> + Sync + 'static,
    {
        if self.fan_out("stable_sort", keys.len()) {
            let mut perm = par_sorted_permutation(keys, comp);
            apply_permutation(keys, &mut perm);
        } else {
            stable_sort(keys, comp);
        }
        Ok(())
    }

    fn stable_radix_sort<K>(&self, keys: &mut [K], codec: &RadixCodec<K>) -> Result<(), StrataError>
    where
        K: Send + Sync + 'static,
    {
        let mut perm = if self.fan_out("stable_radix_sort", keys.len()) {
            par_radix_permutation(keys, codec)
        } else {
            radix_permutation(keys, codec, &mut RadixBuffer::with_capacity(keys.len()))
        };
        apply_permutation(keys, &mut perm);
        Ok(())
    }

    fn stable_sort_by_key<K, V, C>(
        &self,
        keys: &mut [K],
        values: &mut [V],
        comp: &C,
    ) -> Result<(), StrataError>
    where
        K: Send + Sync + 'static,
        V: Send,
        C: Compare<K> + Sync + 'static,
    {
        if !self.fan_out("stable_sort_by_key", keys.len()) {
            stable_sort_by_key(keys, values, comp);
            return Ok(());
        }

        let mut perm = par_sorted_permutation(keys, comp);
        apply_permutation_pair(keys, values, &mut perm);
        Ok(())
    }

    fn stable_radix_sort_by_key<K, V>(
        &self,
        keys: &mut [K],
        values: &mut [V],
        codec: &RadixCodec<K>,
    ) -> Result<(), StrataError>
    where
        K: Send + Sync + 'static,
        V: Send,
    {
        let mut perm = if self.fan_out("stable_radix_sort_by_key", keys.len()) {
            par_radix_permutation(keys, codec)
        } else {
            radix_permutation(keys, codec, &mut RadixBuffer::with_capacity(keys.len()))
        };
        apply_permutation_pair(keys, values, &mut perm);
        Ok(())
    }

    // ========================================================================
    // Copy
    // ========================================================================

    fn copy<T>(&self, src: &[T], dest: &mut [T]) -> Result<usize, StrataError>
    where
        T: Clone + Send + Sync + 'static,
    {
        if !self.fan_out("copy", src.len()) {
            return Ok(scalar::copy(src, dest));
        }
        dest.par_iter_mut()
            .zip(src.par_iter())
            .for_each(|(slot, value)| slot.clone_from(value));
        Ok(src.len().min(dest.len()))
    }

    fn copy_n<T>(&self, src: &[T], n: usize, dest: &mut [T]) -> Result<usize, StrataError>
    where
        T: Clone + Send + Sync + 'static,
    {
        if n == 0 {
            return Ok(0);
        }
        self.copy(&src[..n.min(src.len())], dest)
    }
}

// ============================================================================
// Parallel Comparison Sort
// ============================================================================

/// Positions of `keys` in stable sorted order under `comp`, computed across the pool.
pub fn par_sorted_permutation<K, C>(keys: &[K], comp: &C) -> Vec<usize>
where
    K: Sync,
    C: Compare<K> + Sync + ?Sized,
{
    let n = keys.len();
    let mut perm: Vec<usize> = (0..n).collect();
    if n < 2 {
        return perm;
    }

    let chunk = n
        .div_ceil(rayon::current_num_threads())
        .max(INSERTION_RUN);
    perm.par_chunks_mut(chunk)
        .for_each(|run| sort_indices(run, keys, comp));

    let mut scratch = vec![0usize; n];
    let mut width = chunk;
    while width < n {
        let pair = width.saturating_mul(2);
        scratch
            .par_chunks_mut(pair)
            .zip(perm.par_chunks(pair))
            .for_each(|(output, input)| {
                let mid = width.min(input.len());
                merge_indices(&input[..mid], &input[mid..], output, keys, comp);
            });
        mem::swap(&mut perm, &mut scratch);
        width = pair;
    }
    perm
}

// ============================================================================
// Parallel Radix Sort
// ============================================================================

/// Positions of `keys` in stable sorted order, computed across the pool.
pub fn par_radix_permutation<K>(keys: &[K], codec: &RadixCodec<K>) -> Vec<usize>
where
    K: Sync,
{
    let n = keys.len();
    if n < 2 {
        return (0..n).collect();
    }

    let cells: Vec<RadixCell> = keys
        .par_iter()
        .enumerate()
        .map(|(index, key)| RadixCell {
            code: codec.code(key),
            index,
        })
        .collect();

    // Most significant byte splits the input into independent buckets
    let top = codec.bytes().saturating_sub(1);
    let counts = cells
        .par_chunks(HISTOGRAM_CHUNK)
        .map(|chunk| histogram(chunk, top))
        .reduce(
            || [0usize; RADIX],
            |mut acc, part| {
                for (total, count) in acc.iter_mut().zip(part) {
                    *total += count;
                }
                acc
            },
        );

    let mut scattered = vec![RadixCell::default(); n];
    let mut offsets = exclusive_prefix(&counts);
    for cell in &cells {
        let d = digit(cell.code, top);
        scattered[offsets[d]] = *cell;
        offsets[d] += 1;
    }

    let mut buckets: Vec<&mut [RadixCell]> = Vec::with_capacity(RADIX);
    let mut rest: &mut [RadixCell] = &mut scattered;
    for &count in &counts {
        let (bucket, tail) = mem::take(&mut rest).split_at_mut(count);
        if bucket.len() > 1 {
            buckets.push(bucket);
        }
        rest = tail;
    }

    buckets
        .into_par_iter()
        .for_each_init(RadixBuffer::new, |buffer, bucket| {
            let scratch = buffer.scratch.reset(bucket.len(), RadixCell::default());
            sort_cells(bucket, top, scratch);
        });

    scattered.par_iter().map(|cell| cell.index).collect()
}
