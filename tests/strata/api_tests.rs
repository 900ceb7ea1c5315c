//! Tests for the public dispatch facade.
//!
//! These tests verify:
//! - Routing of each resolved space to its registered backend
//! - The radix and comparison paths produce identical results
//! - Validation errors are returned before any backend runs
//! - Copies through the facade
//!
//! ## Test Organization
//!
//! 1. **Routing** - which backend serves a call
//! 2. **Sorting** - both sort paths and the radix policy
//! 3. **Searching** - scalar and vectorized searches
//! 4. **Copying** - copy and copy_n
//! 5. **Validation** - rejected inputs

use std::sync::Mutex;

use strata::prelude::*;
use strata::reference;

// ============================================================================
// Recording Backend
// ============================================================================

/// Backend that records every call before running the reference algorithm.
struct RecordingBackend {
    name: &'static str,
    calls: Mutex<Vec<&'static str>>,
}

impl RecordingBackend {
    fn named(name: &'static str) -> Self {
        Self {
            name,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().expect("calls lock").push(call);
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl Backend for RecordingBackend {
    fn name(&self) -> &'static str {
        self.name
    }

    fn lower_bound<T, C>(&self, src: &[T], value: &T, comp: &C) -> Result<usize, StrataError>
    where
        T: Send + Sync + 'static,
        C: Compare<T> + Sync + 'static,
    {
        self.record("lower_bound");
        Ok(reference::lower_bound(src, value, comp))
    }

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
        self.record("lower_bound_many");
        for (slot, value) in out.iter_mut().zip(values) {
            *slot = reference::lower_bound(src, value, comp);
        }
        Ok(())
    }

    fn stable_sort<K, C>(&self, keys: &mut [K], comp: &C) -> Result<(), StrataError>
    where
        K: Send + Sync + 'static,
        C: Compare<K> + Sync + 'static,
    {
        self.record("stable_sort");
        keys.sort_by(|a, b| comp.ordering(a, b));
        Ok(())
    }

    fn stable_radix_sort<K>(&self, keys: &mut [K], codec: &RadixCodec<K>) -> Result<(), StrataError>
    where
        K: Send + Sync + 'static,
    {
        self.record("stable_radix_sort");
        keys.sort_by_key(|key| codec.code(key));
        Ok(())
    }

    fn copy<T>(&self, src: &[T], dest: &mut [T]) -> Result<usize, StrataError>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.record("copy");
        Ok(reference::copy(src, dest))
    }
}

type Recording = Dispatcher<RecordingBackend, RecordingBackend, RecordingBackend>;

fn recording() -> Recording {
    Dispatcher::new()
        .with_host(RecordingBackend::named("host"))
        .with_parallel(RecordingBackend::named("parallel"))
        .with_accelerator(RecordingBackend::named("accelerator"))
}

// ============================================================================
// Routing Tests
// ============================================================================

/// Test that each concrete space reaches its own backend.
#[test]
fn test_routing_by_space() {
    let dispatcher = recording();
    let mut keys = vec![3u32, 1, 2];

    dispatcher.stable_sort(Sequential::view_mut(&mut keys)).unwrap();
    dispatcher.stable_sort(Parallel::view_mut(&mut keys)).unwrap();
    dispatcher.stable_sort(Accelerator::view_mut(&mut keys)).unwrap();

    assert_eq!(dispatcher.host().calls(), ["stable_radix_sort"]);
    assert_eq!(dispatcher.parallel().calls(), ["stable_radix_sort"]);
    assert_eq!(dispatcher.accelerator().calls(), ["stable_radix_sort"]);
    assert_eq!(keys, [1, 2, 3]);
}

/// Test that generic-only calls run on the host backend.
#[test]
fn test_routing_generic_goes_to_host() {
    let dispatcher = recording();
    let sorted = [1, 2, 2, 2, 4];

    assert_eq!(dispatcher.lower_bound(Generic::view(&sorted), &2).unwrap(), 1);

    assert_eq!(dispatcher.host().calls(), ["lower_bound"]);
    assert!(dispatcher.parallel().calls().is_empty());
    assert!(dispatcher.accelerator().calls().is_empty());
}

/// Test that a generic handle is absorbed by a concrete one.
#[test]
fn test_routing_generic_absorbed() {
    let dispatcher = recording();
    let sorted = [10, 20, 30];
    let queries = [5, 20, 35];
    let mut out = [0usize; 3];

    dispatcher
        .lower_bound_many(
            Generic::view(&sorted),
            Accelerator::view(&queries),
            Generic::view_mut(&mut out),
        )
        .unwrap();

    assert_eq!(out, [0, 1, 3]);
    assert_eq!(dispatcher.accelerator().calls(), ["lower_bound_many"]);
    assert!(dispatcher.host().calls().is_empty());
}

/// Test copies between a generic and a parallel handle.
#[test]
fn test_routing_copy() {
    let dispatcher = recording();
    let src = [1, 2, 3];
    let mut dest = [0; 3];

    let end = dispatcher
        .copy(Parallel::view(&src), Generic::view_mut(&mut dest))
        .unwrap();

    assert_eq!(end, 3);
    assert_eq!(dest, src);
    assert_eq!(dispatcher.parallel().calls(), ["copy"]);
}

/// Test runtime resolution of tags held as values.
#[test]
fn test_resolve_tags_runtime() {
    assert_eq!(
        resolve_tags(&[BackendTag::Generic, BackendTag::Parallel]),
        Ok(BackendTag::Parallel)
    );
    assert!(resolve_tags(&[BackendTag::Sequential, BackendTag::Parallel]).is_err());
}

// ============================================================================
// Sorting Tests
// ============================================================================

/// Test that the radix policy selects the comparison path.
#[test]
fn test_radix_policy_disabled() {
    let dispatcher = recording().radix_policy(RadixPolicy::Disabled);
    let mut keys = vec![2u8, 1];

    dispatcher.stable_sort(Sequential::view_mut(&mut keys)).unwrap();

    assert_eq!(dispatcher.host().calls(), ["stable_sort"]);
    assert_eq!(dispatcher.config().radix_policy, RadixPolicy::Disabled);
}

/// Test that non-canonical comparators take the comparison path.
#[test]
fn test_closure_takes_comparison_path() {
    let dispatcher = recording();
    let mut keys = vec![1i32, 3, 2];

    dispatcher
        .stable_sort_by(Sequential::view_mut(&mut keys), |a: &i32, b: &i32| a > b)
        .unwrap();

    assert_eq!(keys, [3, 2, 1]);
    assert_eq!(dispatcher.host().calls(), ["stable_sort"]);
}

/// Test that non-arithmetic keys take the comparison path.
#[test]
fn test_strings_take_comparison_path() {
    let dispatcher = recording();
    let mut keys = vec!["b".to_string(), "a".to_string()];

    dispatcher.stable_sort(Parallel::view_mut(&mut keys)).unwrap();

    assert_eq!(keys, ["a", "b"]);
    assert_eq!(dispatcher.parallel().calls(), ["stable_sort"]);
}

/// Test the stability example under both sort paths.
#[test]
fn test_stable_sort_by_key_both_paths() {
    for policy in [RadixPolicy::Auto, RadixPolicy::Disabled] {
        let dispatcher = Dispatcher::new().radix_policy(policy);
        let mut keys = vec![3, 1, 3, 1];
        let mut values = vec!['a', 'b', 'c', 'd'];

        dispatcher
            .stable_sort_by_key(
                Sequential::view_mut(&mut keys),
                Generic::view_mut(&mut values),
            )
            .unwrap();

        assert_eq!(keys, [1, 1, 3, 3], "policy {policy:?}");
        assert_eq!(values, ['b', 'd', 'a', 'c'], "policy {policy:?}");
    }
}

/// Test a descending sort by key on the radix path.
#[test]
fn test_stable_sort_by_key_descending() {
    let dispatcher = Dispatcher::new();
    let mut keys = vec![1.0f32, 3.0, 1.0, 2.0];
    let mut values = vec![0, 1, 2, 3];

    dispatcher
        .stable_sort_by_key_by(
            Sequential::view_mut(&mut keys),
            Sequential::view_mut(&mut values),
            Greater::new(),
        )
        .unwrap();

    assert_eq!(keys, [3.0, 2.0, 1.0, 1.0]);
    assert_eq!(values, [1, 3, 0, 2]);
}

/// Test that radix and comparison sorts agree on a larger input.
#[test]
fn test_sort_paths_agree() {
    let keys: Vec<i64> = (0..2_000).map(|i| (i * 7_919) % 1_009 - 500).collect();

    let mut radix = keys.clone();
    let mut comparison = keys;

    Dispatcher::new()
        .stable_sort(Sequential::view_mut(&mut radix))
        .unwrap();
    Dispatcher::new()
        .radix_policy(RadixPolicy::Disabled)
        .stable_sort(Sequential::view_mut(&mut comparison))
        .unwrap();

    assert_eq!(radix, comparison);
    assert!(radix.windows(2).all(|w| w[0] <= w[1]));
}

/// Sorted bit patterns of `keys`, for multiset comparisons of floats.
fn bit_multiset(keys: &[f64]) -> Vec<u64> {
    let mut bits: Vec<u64> = keys.iter().map(|k| k.to_bits()).collect();
    bits.sort_unstable();
    bits
}

/// Test that NaN-bearing float keys sort without failing on every path.
#[test]
fn test_nan_keys_on_every_path() {
    for seed in 0..50u64 {
        let keys: Vec<f64> = (0..64u64)
            .map(|i| {
                let h = (i + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ seed.wrapping_mul(31);
                if h % 5 == 0 { f64::NAN } else { (h % 1_000) as f64 - 500.0 }
            })
            .collect();

        let mut disabled = keys.clone();
        Dispatcher::new()
            .radix_policy(RadixPolicy::Disabled)
            .stable_sort(Sequential::view_mut(&mut disabled))
            .unwrap();

        let mut closure = keys.clone();
        Dispatcher::new()
            .stable_sort_by(Sequential::view_mut(&mut closure), |a: &f64, b: &f64| a < b)
            .unwrap();

        let mut radix = keys.clone();
        Dispatcher::new()
            .stable_sort(Sequential::view_mut(&mut radix))
            .unwrap();

        let expected = bit_multiset(&keys);
        assert_eq!(bit_multiset(&disabled), expected, "seed {seed}");
        assert_eq!(bit_multiset(&closure), expected, "seed {seed}");
        assert_eq!(bit_multiset(&radix), expected, "seed {seed}");
    }
}

/// Test that NaN keys carry their values along under the comparison path.
#[test]
fn test_nan_keys_by_key_disabled() {
    let mut keys = vec![3.0, f64::NAN, 1.0, 2.0];
    let mut values = vec!['a', 'b', 'c', 'd'];

    Dispatcher::new()
        .radix_policy(RadixPolicy::Disabled)
        .stable_sort_by_key(
            Sequential::view_mut(&mut keys),
            Sequential::view_mut(&mut values),
        )
        .unwrap();

    let mut pairs: Vec<(u64, char)> = keys.iter().map(|k| k.to_bits()).zip(values).collect();
    pairs.sort_unstable();
    let mut expected = vec![
        (3.0f64.to_bits(), 'a'),
        (f64::NAN.to_bits(), 'b'),
        (1.0f64.to_bits(), 'c'),
        (2.0f64.to_bits(), 'd'),
    ];
    expected.sort_unstable();
    assert_eq!(pairs, expected, "Values must stay attached to their keys");
}

/// Test that 128-bit keys take the radix path.
#[test]
fn test_wide_keys_take_radix_path() {
    let dispatcher = recording();
    let mut keys: Vec<i128> = vec![1 << 90, -5, 0];

    dispatcher.stable_sort(Parallel::view_mut(&mut keys)).unwrap();

    assert_eq!(dispatcher.parallel().calls(), ["stable_radix_sort"]);
    assert_eq!(keys, [-5, 0, 1 << 90]);
}

// ============================================================================
// Search Tests
// ============================================================================

/// Test every scalar search on the default dispatcher.
#[test]
fn test_scalar_searches() {
    let dispatcher = Dispatcher::new();
    let sorted = Sequential::view(&[1, 2, 2, 2, 4]);

    assert_eq!(dispatcher.lower_bound(sorted, &2).unwrap(), 1);
    assert_eq!(dispatcher.upper_bound(sorted, &2).unwrap(), 4);
    assert!(dispatcher.binary_search(sorted, &4).unwrap());
    assert!(!dispatcher.binary_search(sorted, &3).unwrap());
    assert_eq!(dispatcher.equal_range(sorted, &3).unwrap(), (4, 4));
}

/// Test searches on an empty sequence.
#[test]
fn test_searches_empty() {
    let dispatcher = Dispatcher::new();
    let empty: [i32; 0] = [];

    assert_eq!(dispatcher.lower_bound(Generic::view(&empty), &1).unwrap(), 0);
    assert!(!dispatcher.binary_search(Generic::view(&empty), &1).unwrap());
}

/// Test vectorized searches on the default dispatcher.
#[test]
fn test_vectorized_searches() {
    let dispatcher = Dispatcher::new();
    let sorted = [1, 2, 2, 2, 4];
    let queries = [2, 3];
    let mut upper = [0usize; 2];
    let mut found = [false; 2];
    let mut ranges = [(0usize, 0usize); 2];

    dispatcher
        .upper_bound_many(
            Parallel::view(&sorted),
            Parallel::view(&queries),
            Parallel::view_mut(&mut upper),
        )
        .unwrap();
    dispatcher
        .binary_search_many(
            Parallel::view(&sorted),
            Parallel::view(&queries),
            Parallel::view_mut(&mut found),
        )
        .unwrap();
    dispatcher
        .equal_range_many(
            Parallel::view(&sorted),
            Parallel::view(&queries),
            Parallel::view_mut(&mut ranges),
        )
        .unwrap();

    assert_eq!(upper, [4, 4]);
    assert_eq!(found, [true, false]);
    assert_eq!(ranges, [(1, 4), (4, 4)]);
}

/// Test searches under a descending comparator.
#[test]
fn test_searches_descending() {
    let dispatcher = Dispatcher::new();
    let sorted = [9, 7, 7, 3];

    let range = dispatcher
        .equal_range_by(Generic::view(&sorted), &7, Greater::new())
        .unwrap();

    assert_eq!(range, (1, 3));
}

// ============================================================================
// Copy Tests
// ============================================================================

/// Test copy and copy_n through the facade.
#[test]
fn test_copies() {
    let dispatcher = Dispatcher::new();
    let src = [1, 2, 3, 4];
    let mut dest = [0; 4];

    assert_eq!(
        dispatcher
            .copy(Sequential::view(&src), Sequential::view_mut(&mut dest))
            .unwrap(),
        4
    );
    assert_eq!(dest, src);

    let mut partial = [0; 4];
    assert_eq!(
        dispatcher
            .copy_n(Generic::view(&src), 2, Sequential::view_mut(&mut partial))
            .unwrap(),
        2
    );
    assert_eq!(partial, [1, 2, 0, 0]);
}

/// Test that copy_n with a zero count touches nothing.
#[test]
fn test_copy_n_zero() {
    let dispatcher = Dispatcher::new();
    let src = [1, 2];
    let mut dest = [7, 7];

    let end = dispatcher
        .copy_n(Generic::view(&src), 0, Generic::view_mut(&mut dest))
        .unwrap();

    assert_eq!(end, 0);
    assert_eq!(dest, [7, 7]);
}

// ============================================================================
// Validation Tests
// ============================================================================

/// Test that a short output is rejected before the backend runs.
#[test]
fn test_short_output_rejected() {
    let dispatcher = recording();
    let sorted = [1, 2, 3];
    let queries = [1, 2, 3];
    let mut out = [0usize; 2];

    let err = dispatcher
        .lower_bound_many(
            Sequential::view(&sorted),
            Sequential::view(&queries),
            Sequential::view_mut(&mut out),
        )
        .unwrap_err();

    assert!(matches!(err, StrataError::InsufficientCapacity { required: 3, available: 2, .. }));
    assert!(dispatcher.host().calls().is_empty(), "Backend must not run");
}

/// Test that short companion values are rejected.
#[test]
fn test_short_values_rejected() {
    let dispatcher = Dispatcher::new();
    let mut keys = vec![2, 1, 3];
    let mut values = vec![0, 1];

    let err = dispatcher
        .stable_sort_by_key(Generic::view_mut(&mut keys), Generic::view_mut(&mut values))
        .unwrap_err();

    assert!(matches!(err, StrataError::MismatchedLengths { expected: 3, got: 2, .. }));
    assert_eq!(keys, [2, 1, 3], "Keys must be untouched");
}

/// Test copy_n count and capacity errors.
#[test]
fn test_copy_errors() {
    let dispatcher = Dispatcher::new();
    let src = [1, 2];
    let mut dest = [0; 1];

    assert_eq!(
        dispatcher.copy_n(Generic::view(&src), 3, Generic::view_mut(&mut dest)),
        Err(StrataError::CountOutOfRange { count: 3, len: 2 })
    );
    assert!(matches!(
        dispatcher.copy(Generic::view(&src), Generic::view_mut(&mut dest)),
        Err(StrataError::InsufficientCapacity { operation: "copy", .. })
    ));
}
