//! Strict weak orderings used by searches and sorts.
//!
//! ## Purpose
//!
//! This module defines the comparator abstraction every ordered operation
//! takes, together with the two canonical comparators whose *type identity*
//! enables the radix-sort fast path.
//!
//! ## Design notes
//!
//! * **Closures welcome**: any `Fn(&T, &T) -> bool` is a comparator.
//! * **Identity matters**: `Less<T>` and `Greater<T>` are distinct nominal types.
//!   A closure computing `a < b` behaves like `Less<T>` but is a different type
//!   and therefore always takes the comparison path.
//!
//! ## Invariants
//!
//! * `less` must be a strict weak ordering (irreflexive, transitive).
//!
//! ## Non-goals
//!
//! * This module does not detect semantically equivalent comparators.

// External dependencies
use core::cmp::Ordering;
use core::fmt::{Debug, Formatter, Result as FmtResult};
use core::marker::PhantomData;

// ============================================================================
// Comparator Trait
// ============================================================================

/// Strict weak ordering over `T`.
pub trait Compare<T: ?Sized> {
    /// Whether `a` is ordered strictly before `b`.
    fn less(&self, a: &T, b: &T) -> bool;

    /// Three-way ordering derived from `less`; incomparable pairs are `Equal`.
    #[inline]
    fn ordering(&self, a: &T, b: &T) -> Ordering {
        if self.less(a, b) {
            Ordering::Less
        } else if self.less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

// ============================================================================
// Canonical Comparators
// ============================================================================

/// Canonical ascending order (`a < b`).
pub struct Less<T: ?Sized>(PhantomData<fn(&T)>);

/// Canonical descending order (`a > b`).
pub struct Greater<T: ?Sized>(PhantomData<fn(&T)>);

macro_rules! canonical {
    ($($name:ident => $op:tt;)*) => {
        $(
            impl<T: ?Sized> $name<T> {
                /// Create the comparator.
                #[inline]
                pub const fn new() -> Self {
                    Self(PhantomData)
                }
            }

            impl<T: ?Sized> Default for $name<T> {
                #[inline]
                fn default() -> Self {
                    Self::new()
                }
            }

            impl<T: ?Sized> Clone for $name<T> {
                #[inline]
                fn clone(&self) -> Self {
                    *self
                }
            }

            impl<T: ?Sized> Copy for $name<T> {}

            impl<T: ?Sized> Debug for $name<T> {
                fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                    f.write_str(stringify!($name))
                }
            }

            impl<T: PartialOrd + ?Sized> Compare<T> for $name<T> {
                #[inline]
                fn less(&self, a: &T, b: &T) -> bool {
                    a $op b
                }
            }
        )*
    };
}

canonical! {
    Less => <;
    Greater => >;
}
