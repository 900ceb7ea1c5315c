//! Sort specialization predicate.
//!
//! ## Purpose
//!
//! This module decides, for one `(key type, comparator type)` pair, whether a
//! stable radix sort may replace the general comparison sort, and if so builds
//! the order-preserving codec the radix sort runs on.
//!
//! ## Design notes
//!
//! * **Type identity**: Both checks compare `TypeId`s. A comparator qualifies
//!   only if it *is* `Less<K>` or `Greater<K>`; a closure computing the same
//!   order is a different type and takes the comparison path.
//! * **Monomorphised**: Every input is a type parameter, so for a fixed pair
//!   the decision is a constant the optimiser folds; both paths are compiled.
//! * **Variant-level**: The decision is the `Specialization` enum. The radix
//!   variant carries the codec, so no separate flag travels downstream.
//! * **Value-agnostic**: Sort-by-key decides on keys and comparator only.
//!
//! ## Key concepts
//!
//! * **Arithmetic key**: a built-in integer (including 128-bit) or float.
//! * **Canonical comparator**: `Less<K>` (ascending) or `Greater<K>` (descending).
//!
//! ## Invariants
//!
//! * `use_radix_sort::<K, C>()` is `true` iff `radix_codec::<K, C>()` is `Some`.
//! * Codecs map `-0.0` and `+0.0` to the same code.
//!
//! ## Non-goals
//!
//! * This module does not detect semantically equivalent comparators.
//! * NaN keys are outside the strict weak ordering of `Less`/`Greater` and have
//!   no guaranteed position on either path.

// External dependencies
use core::any::{Any, TypeId};
use core::mem::size_of;

// Internal dependencies
use crate::algorithms::radix::{RadixCodec, RadixOrder};
use crate::primitives::compare::{Greater, Less};

// ============================================================================
// Radix Keys
// ============================================================================

mod sealed {
    pub trait Sealed {}
}

/// Built-in arithmetic type with an order-preserving unsigned encoding.
pub trait RadixKey: sealed::Sealed + Copy + 'static {
    /// Width of the encoding in bytes.
    const BYTES: usize;

    /// Ascending order-preserving code using the low `BYTES` bytes.
    fn encode(&self) -> u128;
}

macro_rules! unsigned_keys {
    ($($t:ty),*) => {
        $(
            impl sealed::Sealed for $t {}

            impl RadixKey for $t {
                const BYTES: usize = size_of::<$t>();

                #[inline]
                fn encode(&self) -> u128 {
                    *self as u128
                }
            }
        )*
    };
}

macro_rules! signed_keys {
    ($($t:ty => $u:ty),*) => {
        $(
            impl sealed::Sealed for $t {}

            impl RadixKey for $t {
                const BYTES: usize = size_of::<$t>();

                // Flipping the sign bit maps two's complement onto offset binary
                #[inline]
                fn encode(&self) -> u128 {
                    ((*self as $u) ^ (1 << (<$u>::BITS - 1))) as u128
                }
            }
        )*
    };
}

macro_rules! float_keys {
    ($($t:ty => $u:ty),*) => {
        $(
            impl sealed::Sealed for $t {}

            impl RadixKey for $t {
                const BYTES: usize = size_of::<$t>();

                #[inline]
                fn encode(&self) -> u128 {
                    // -0.0 == +0.0 under `<`, so both must share a code
                    let value = if *self == 0.0 { 0.0 } else { *self };
                    let bits = value.to_bits();
                    let sign = 1 << (<$u>::BITS - 1);
                    let code: $u = if bits & sign != 0 { !bits } else { bits | sign };
                    code as u128
                }
            }
        )*
    };
}

unsigned_keys!(u8, u16, u32, u64, u128, usize);
signed_keys!(
    i8 => u8,
    i16 => u16,
    i32 => u32,
    i64 => u64,
    i128 => u128,
    isize => usize
);
float_keys!(f32 => u32, f64 => u64);

/// Encode `key` as `X`; `K` and `X` are the same type whenever this is reached.
fn encode_as<K: 'static, X: RadixKey>(key: &K) -> u128 {
    (key as &dyn Any)
        .downcast_ref::<X>()
        .map_or(0, <X as RadixKey>::encode)
}

fn codec_if<K: 'static, X: RadixKey>(order: RadixOrder) -> Option<RadixCodec<K>> {
    (TypeId::of::<K>() == TypeId::of::<X>())
        .then(|| RadixCodec::new(encode_as::<K, X>, X::BYTES, order))
}

/// Ascending codec for `K`, if `K` is an arithmetic key.
fn arithmetic_codec<K: 'static>(order: RadixOrder) -> Option<RadixCodec<K>> {
    codec_if::<K, u8>(order)
        .or_else(|| codec_if::<K, u16>(order))
        .or_else(|| codec_if::<K, u32>(order))
        .or_else(|| codec_if::<K, u64>(order))
        .or_else(|| codec_if::<K, u128>(order))
        .or_else(|| codec_if::<K, usize>(order))
        .or_else(|| codec_if::<K, i8>(order))
        .or_else(|| codec_if::<K, i16>(order))
        .or_else(|| codec_if::<K, i32>(order))
        .or_else(|| codec_if::<K, i64>(order))
        .or_else(|| codec_if::<K, i128>(order))
        .or_else(|| codec_if::<K, isize>(order))
        .or_else(|| codec_if::<K, f32>(order))
        .or_else(|| codec_if::<K, f64>(order))
}

// ============================================================================
// Predicates
// ============================================================================

/// Whether `K` is a built-in arithmetic key type.
pub fn is_arithmetic<K: 'static>() -> bool {
    arithmetic_codec::<K>(RadixOrder::Ascending).is_some()
}

/// Direction of `C` if it is exactly `Less<K>` or `Greater<K>`.
pub fn canonical_order<K: 'static, C: 'static>() -> Option<RadixOrder> {
    let comp = TypeId::of::<C>();
    if comp == TypeId::of::<Less<K>>() {
        Some(RadixOrder::Ascending)
    } else if comp == TypeId::of::<Greater<K>>() {
        Some(RadixOrder::Descending)
    } else {
        None
    }
}

/// Whether a sort of `K` keys under `C` may use the radix path.
pub fn use_radix_sort<K: 'static, C: 'static>() -> bool {
    is_arithmetic::<K>() && canonical_order::<K, C>().is_some()
}

/// Codec for the radix path, when `use_radix_sort::<K, C>()` holds.
pub fn radix_codec<K: 'static, C: 'static>() -> Option<RadixCodec<K>> {
    canonical_order::<K, C>().and_then(arithmetic_codec::<K>)
}

// ============================================================================
// Decision
// ============================================================================

/// Strategy chosen for one sort call.
#[derive(Debug, Clone, Copy)]
pub enum Specialization<K> {
    /// Stable radix sort over the given codec.
    Radix(RadixCodec<K>),
    /// General stable comparison sort.
    Comparison,
}

impl<K: 'static> Specialization<K> {
    /// Decide the strategy for keys `K` ordered by `C`.
    pub fn decide<C: 'static>() -> Self {
        match radix_codec::<K, C>() {
            Some(codec) => Specialization::Radix(codec),
            None => Specialization::Comparison,
        }
    }
}

impl<K> Specialization<K> {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Specialization::Radix(_) => "radix",
            Specialization::Comparison => "comparison",
        }
    }
}
