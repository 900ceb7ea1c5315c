#![cfg(feature = "dev")]
//! Tests for sort specialization.
//!
//! These tests verify:
//! - Which key types count as arithmetic
//! - That only the canonical comparators enable the radix path
//! - Order-preserving encodings for every supported key type
//!
//! ## Test Organization
//!
//! 1. **Predicates** - arithmetic keys and canonical comparators
//! 2. **Decisions** - the strategy chosen per call
//! 3. **Encodings** - order preservation

use proptest::prelude::*;

use strata::internals::algorithms::radix::RadixOrder;
use strata::internals::engine::specialize::{
    RadixKey, Specialization, canonical_order, is_arithmetic, radix_codec, use_radix_sort,
};
use strata::internals::primitives::compare::{Greater, Less};

/// Type of a closure, for predicates taking the comparator as a type parameter.
fn closure_uses_radix<K: 'static, C: 'static>(_: &C) -> bool {
    use_radix_sort::<K, C>()
}

/// User comparator with the same meaning as `Less`.
#[derive(Default)]
struct Ascending;

// ============================================================================
// Predicate Tests
// ============================================================================

/// Test arithmetic key detection.
#[test]
fn test_is_arithmetic() {
    assert!(is_arithmetic::<u8>());
    assert!(is_arithmetic::<u64>());
    assert!(is_arithmetic::<usize>());
    assert!(is_arithmetic::<i32>());
    assert!(is_arithmetic::<isize>());
    assert!(is_arithmetic::<f32>());
    assert!(is_arithmetic::<f64>());
    assert!(is_arithmetic::<u128>());
    assert!(is_arithmetic::<i128>());

    assert!(!is_arithmetic::<bool>());
    assert!(!is_arithmetic::<char>());
    assert!(!is_arithmetic::<String>());
    assert!(!is_arithmetic::<(u32, u32)>());
}

/// Test canonical comparator detection.
#[test]
fn test_canonical_order() {
    assert_eq!(canonical_order::<u32, Less<u32>>(), Some(RadixOrder::Ascending));
    assert_eq!(canonical_order::<u32, Greater<u32>>(), Some(RadixOrder::Descending));
    assert_eq!(canonical_order::<u32, Less<u64>>(), None, "Comparator over another type");
    assert_eq!(canonical_order::<u32, Ascending>(), None);
}

/// Test the combined predicate.
#[test]
fn test_use_radix_sort() {
    assert!(use_radix_sort::<i16, Less<i16>>());
    assert!(use_radix_sort::<f64, Greater<f64>>());

    assert!(use_radix_sort::<u128, Less<u128>>());
    assert!(use_radix_sort::<i128, Greater<i128>>());

    assert!(!use_radix_sort::<String, Less<String>>());
    assert!(!use_radix_sort::<u32, Ascending>());
}

/// Test that an equivalent closure never enables the radix path.
#[test]
fn test_closure_is_not_canonical() {
    let by_hand = |a: &u32, b: &u32| a < b;
    assert!(!closure_uses_radix::<u32, _>(&by_hand));
}

// ============================================================================
// Decision Tests
// ============================================================================

/// Test the strategy chosen for each kind of call.
#[test]
fn test_specialization_decide() {
    let radix = Specialization::<u64>::decide::<Less<u64>>();
    assert!(matches!(radix, Specialization::Radix(_)));
    assert_eq!(radix.name(), "radix");

    let comparison = Specialization::<String>::decide::<Less<String>>();
    assert!(matches!(comparison, Specialization::Comparison));
    assert_eq!(comparison.name(), "comparison");

    match Specialization::<i8>::decide::<Greater<i8>>() {
        Specialization::Radix(codec) => {
            assert_eq!(codec.order(), RadixOrder::Descending);
            assert_eq!(codec.bytes(), 1);
        }
        Specialization::Comparison => panic!("Expected the radix path"),
    }
}

/// Test codec widths.
#[test]
fn test_codec_widths() {
    let width = |bytes: Option<usize>| bytes.unwrap_or(0);

    assert_eq!(width(radix_codec::<u16, Less<u16>>().map(|c| c.bytes())), 2);
    assert_eq!(width(radix_codec::<i32, Less<i32>>().map(|c| c.bytes())), 4);
    assert_eq!(width(radix_codec::<f64, Less<f64>>().map(|c| c.bytes())), 8);
    assert_eq!(width(radix_codec::<i128, Less<i128>>().map(|c| c.bytes())), 16);
    assert!(radix_codec::<char, Less<char>>().is_none());
}

// ============================================================================
// Encoding Tests
// ============================================================================

/// Test that both zeros share one encoding.
#[test]
fn test_float_zero_encoding() {
    assert_eq!((-0.0f64).encode(), 0.0f64.encode());
    assert_eq!((-0.0f32).encode(), 0.0f32.encode());
}

/// Test signed encodings at the extremes.
#[test]
fn test_signed_encoding_extremes() {
    assert!(i8::MIN.encode() < (-1i8).encode());
    assert!((-1i8).encode() < 0i8.encode());
    assert!(0i8.encode() < i8::MAX.encode());
    assert!(i8::MAX.encode() <= 0xFF, "Codes use only the key's bytes");
}

/// Test 128-bit encodings at the extremes.
#[test]
fn test_wide_encoding_extremes() {
    assert!(i128::MIN.encode() < (-1i128).encode());
    assert!((-1i128).encode() < 0i128.encode());
    assert!(0i128.encode() < i128::MAX.encode());
    assert_eq!(u128::MAX.encode(), u128::MAX);
}

proptest! {
    /// Signed encodings preserve order.
    #[test]
    fn prop_i32_order_preserved(a in any::<i32>(), b in any::<i32>()) {
        prop_assert_eq!(a.cmp(&b), a.encode().cmp(&b.encode()));
    }

    /// 128-bit signed encodings preserve order.
    #[test]
    fn prop_i128_order_preserved(a in any::<i128>(), b in any::<i128>()) {
        prop_assert_eq!(a.cmp(&b), a.encode().cmp(&b.encode()));
    }

    /// Float encodings preserve order on non-NaN values.
    #[test]
    fn prop_f64_order_preserved(
        a in any::<f64>().prop_filter("not NaN", |x| !x.is_nan()),
        b in any::<f64>().prop_filter("not NaN", |x| !x.is_nan()),
    ) {
        if let Some(ordering) = a.partial_cmp(&b) {
            prop_assert_eq!(ordering, a.encode().cmp(&b.encode()));
        }
    }

    /// Float codes fit in the key's width.
    #[test]
    fn prop_f32_code_width(a in any::<f32>()) {
        prop_assert!(a.encode() <= u128::from(u32::MAX));
    }
}
