//! Backend tags and execution-space resolution.
//!
//! ## Purpose
//!
//! This module defines the closed set of execution backends a sequence handle
//! can belong to, and the rule that combines the backends of every handle
//! participating in one call into the single backend that must execute it.
//!
//! ## Design notes
//!
//! * **Two views of one rule**: `BackendTag` is the runtime sum type and
//!   `BackendTag::combine` / `BackendTag::resolve` are ordinary functions over it.
//!   The zero-sized `Space` markers carry the same tags at the type level, and
//!   the `Resolve` trait encodes the same table so that a call mixing two
//!   concrete backends has no implementation and fails to compile.
//! * **Sealed**: the set of spaces is closed; downstream crates cannot add one.
//!
//! ## Key concepts
//!
//! * **Homogeneous**: every handle carries `B` → `B`.
//! * **Generic absorption**: `Generic` combined with a concrete `B` → `B`.
//! * **Conflict**: two different concrete tags → no resolution.
//!
//! ## Invariants
//!
//! * `combine` is commutative and associative, with `Generic` as identity.
//! * `<A as Resolve<B>>::Output::TAG == A::TAG.combine(B::TAG)` for every
//!   implemented pair.
//!
//! ## Non-goals
//!
//! * This module does not select or invoke implementations (see `engine::dispatch`).

// External dependencies
use core::fmt::{Display, Formatter, Result as FmtResult};

// Internal dependencies
use crate::primitives::errors::StrataError;
use crate::primitives::handle::{View, ViewMut};

// ============================================================================
// Runtime Tag
// ============================================================================

/// Identity of the execution backend a sequence handle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackendTag {
    /// No preference; absorbed by any concrete backend.
    #[default]
    Generic,

    /// Single-threaded host execution.
    Sequential,

    /// Multi-core host execution.
    Parallel,

    /// Accelerator (GPU) execution.
    Accelerator,
}

impl BackendTag {
    /// Every tag, in declaration order.
    pub const ALL: [BackendTag; 4] = [
        BackendTag::Generic,
        BackendTag::Sequential,
        BackendTag::Parallel,
        BackendTag::Accelerator,
    ];

    /// Whether this tag names an actual execution environment.
    #[inline]
    pub const fn is_concrete(self) -> bool {
        !matches!(self, BackendTag::Generic)
    }

    /// Short lowercase name used in logs and error messages.
    pub const fn name(self) -> &'static str {
        match self {
            BackendTag::Generic => "generic",
            BackendTag::Sequential => "sequential",
            BackendTag::Parallel => "parallel",
            BackendTag::Accelerator => "accelerator",
        }
    }

    /// Combine the tags of two handles taking part in the same call.
    ///
    /// Returns `None` when both tags are concrete and differ.
    #[inline]
    pub const fn combine(self, other: BackendTag) -> Option<BackendTag> {
        match (self, other) {
            (BackendTag::Generic, tag) | (tag, BackendTag::Generic) => Some(tag),
            (a, b) if a as u8 == b as u8 => Some(a),
            _ => None,
        }
    }

    /// Resolve the tags of every handle of one call into a single backend.
    ///
    /// An empty set resolves to `Generic`, the identity of `combine`.
    pub fn resolve(tags: &[BackendTag]) -> Result<BackendTag, StrataError> {
        let mut resolved = BackendTag::Generic;
        for &tag in tags {
            resolved = resolved
                .combine(tag)
                .ok_or(StrataError::BackendConflict {
                    first: resolved,
                    second: tag,
                })?;
        }
        Ok(resolved)
    }
}

impl Display for BackendTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

// ============================================================================
// Type-Level Spaces
// ============================================================================

mod sealed {
    pub trait Sealed {}
}

/// Zero-sized marker carrying a `BackendTag` at the type level.
pub trait Space: sealed::Sealed + Copy + Default + Send + Sync + 'static {
    /// Tag this space stands for.
    const TAG: BackendTag;

    /// Wrap a shared slice as a handle belonging to this space.
    #[inline]
    fn view<T>(data: &[T]) -> View<'_, T, Self> {
        View::new(data)
    }

    /// Wrap a mutable slice as a handle belonging to this space.
    #[inline]
    fn view_mut<T>(data: &mut [T]) -> ViewMut<'_, T, Self> {
        ViewMut::new(data)
    }
}

macro_rules! spaces {
    ($($(#[$doc:meta])* $name:ident => $tag:ident;)*) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
            pub struct $name;

            impl sealed::Sealed for $name {}

            impl Space for $name {
                const TAG: BackendTag = BackendTag::$tag;
            }
        )*
    };
}

spaces! {
    /// Handles with no backend preference.
    Generic => Generic;
    /// Handles owned by the single-threaded host.
    Sequential => Sequential;
    /// Handles owned by the multi-core host.
    Parallel => Parallel;
    /// Handles owned by the accelerator.
    Accelerator => Accelerator;
}

/// Compile-time counterpart of [`BackendTag::combine`].
///
/// Implemented only for compatible pairs, so a call whose handles belong to
/// two different concrete spaces has no `Resolve` implementation.
///
/// ```compile_fail
/// use strata::prelude::*;
///
/// let keys = [3u32, 1, 2];
/// let mut out = [0u32; 3];
/// // Parallel source into an Accelerator destination: rejected at build time.
/// Dispatcher::new()
///     .copy(Parallel::view(&keys), Accelerator::view_mut(&mut out))
///     .unwrap();
/// ```
pub trait Resolve<Rhs: Space>: Space {
    /// Space executing a call that involves both `Self` and `Rhs`.
    type Output: Space;
}

/// Space resolved from two handle spaces.
pub type Resolved<A, B> = <A as Resolve<B>>::Output;

/// Space resolved from three handle spaces, folded left to right.
pub type Resolved3<A, B, C> = Resolved<Resolved<A, B>, C>;

macro_rules! compatible {
    ($($lhs:ident, $rhs:ident => $out:ident;)*) => {
        $(
            impl Resolve<$rhs> for $lhs {
                type Output = $out;
            }
        )*
    };
}

compatible! {
    Generic, Generic => Generic;
    Generic, Sequential => Sequential;
    Generic, Parallel => Parallel;
    Generic, Accelerator => Accelerator;

    Sequential, Generic => Sequential;
    Sequential, Sequential => Sequential;

    Parallel, Generic => Parallel;
    Parallel, Parallel => Parallel;

    Accelerator, Generic => Accelerator;
    Accelerator, Accelerator => Accelerator;
}
