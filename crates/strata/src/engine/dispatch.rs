//! Dispatch facade.
//!
//! ## Purpose
//!
//! This module is the public operation surface. For every call it resolves the
//! backend from the spaces of the participating handles, decides the sort
//! strategy for sort-like operations, validates lengths, and forwards the
//! original arguments to the implementation registered for the resolved
//! backend. The implementation's result is returned unchanged.
//!
//! ## Design notes
//!
//! * **Registry**: A `Dispatcher` holds one implementation per concrete
//!   backend. `Select<S>` maps a resolved space to its slot at compile time;
//!   `Generic` resolves to the host slot.
//! * **Decision dimension**: Sort implementations are keyed by the
//!   specialization decision through distinct `Backend` methods
//!   (`stable_sort` vs `stable_radix_sort`).
//! * **Compile-time resolution**: Handle spaces are combined through
//!   `Resolve`, so mixing two concrete backends is a type error and no
//!   implementation is ever instantiated for it. Debug builds cross-check the
//!   runtime resolver against the type-level result.
//! * **Defaults**: Every `Backend` method defaults to the sequential reference
//!   algorithm, so a backend only overrides what it accelerates.
//!
//! ## Key concepts
//!
//! * **Resolved space**: `Resolved<A, B>` / `Resolved3<A, B, C>`.
//! * **Slot**: host, parallel or accelerator implementation.
//!
//! ## Invariants
//!
//! * Decisions are made before any backend work starts.
//! * The dispatcher holds no mutable state; calls do not interact.
//!
//! ## Non-goals
//!
//! * This module does not move data between backends.
//! * This module does not implement parallel or device algorithms.

// External dependencies
use tracing::debug;

// Internal dependencies
use crate::algorithms::radix::RadixCodec;
use crate::algorithms::{comparison, radix, scalar, search};
use crate::engine::sequential::SequentialBackend;
use crate::engine::specialize::Specialization;
use crate::engine::validator::Validator;
use crate::primitives::backend::{
    Accelerator, BackendTag, Generic, Parallel, Resolve, Resolved, Resolved3, Sequential, Space,
};
use crate::primitives::buffer::RadixBuffer;
use crate::primitives::compare::{Compare, Less};
use crate::primitives::errors::StrataError;
use crate::primitives::handle::{View, ViewMut};

// ============================================================================
// Backend Implementations
// ============================================================================

/// Implementation of the dispatched operations for one backend.
///
/// Every method receives the facade's arguments after resolution and
/// validation, and returns the facade's result. The provided bodies run the
/// sequential reference algorithms.
pub trait Backend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    // ------------------------------------------------------------------------
    // Search family
    // ------------------------------------------------------------------------

    /// First position where `value` could be inserted without breaking order.
    fn lower_bound<T, C>(&self, src: &[T], value: &T, comp: &C) -> Result<usize, StrataError>
    where
        T: Send + Sync + 'static,
        C: Compare<T> + Sync + 'static,
    {
        Ok(search::lower_bound(src, value, comp))
    }

    /// First position past every element equivalent to `value`.
    fn upper_bound<T, C>(&self, src: &[T], value: &T, comp: &C) -> Result<usize, StrataError>
    where
        T: Send + Sync + 'static,
        C: Compare<T> + Sync + 'static,
    {
        Ok(search::upper_bound(src, value, comp))
    }

    /// Whether an element equivalent to `value` is present.
    fn binary_search<T, C>(&self, src: &[T], value: &T, comp: &C) -> Result<bool, StrataError>
    where
        T: Send + Sync + 'static,
        C: Compare<T> + Sync + 'static,
    {
        Ok(search::binary_search(src, value, comp))
    }

    /// Range of elements equivalent to `value`.
    fn equal_range<T, C>(
        &self,
        src: &[T],
        value: &T,
        comp: &C,
    ) -> Result<(usize, usize), StrataError>
    where
        T: Send + Sync + 'static,
        C: Compare<T> + Sync + 'static,
    {
        Ok(search::equal_range(src, value, comp))
    }

    /// Lower bound of every query; `out` holds at least `values.len()` slots.
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
        search::lower_bound_many(src, values, out, comp);
        Ok(())
    }

    /// Upper bound of every query; `out` holds at least `values.len()` slots.
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
        search::upper_bound_many(src, values, out, comp);
        Ok(())
    }

    /// Membership of every query; `out` holds at least `values.len()` slots.
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
        search::binary_search_many(src, values, out, comp);
        Ok(())
    }

    /// Equal range of every query; `out` holds at least `values.len()` slots.
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
        search::equal_range_many(src, values, out, comp);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Sort family
    // ------------------------------------------------------------------------

    /// Stable comparison sort.
    fn stable_sort<K, C>(&self, keys: &mut [K], comp: &C) -> Result<(), StrataError>
    where
        K: Send + Sync + 'static,
        C: Compare<K> + Sync + 'static,
    {
        comparison::stable_sort(keys, comp);
        Ok(())
    }

    /// Stable radix sort over `codec`.
    fn stable_radix_sort<K>(&self, keys: &mut [K], codec: &RadixCodec<K>) -> Result<(), StrataError>
    where
        K: Send + Sync + 'static,
    {
        let mut buffer = RadixBuffer::with_capacity(keys.len());
        radix::stable_radix_sort(keys, codec, &mut buffer);
        Ok(())
    }

    /// Stable comparison sort of `keys`, permuting the first `keys.len()` values.
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
        comparison::stable_sort_by_key(keys, values, comp);
        Ok(())
    }

    /// Stable radix sort of `keys`, permuting the first `keys.len()` values.
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
        let mut buffer = RadixBuffer::with_capacity(keys.len());
        radix::stable_radix_sort_by_key(keys, values, codec, &mut buffer);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Copy family
    // ------------------------------------------------------------------------

    /// Copy `src` into the front of `dest`; returns one past the last write.
    fn copy<T>(&self, src: &[T], dest: &mut [T]) -> Result<usize, StrataError>
    where
        T: Clone + Send + Sync + 'static,
    {
        Ok(scalar::copy(src, dest))
    }

    /// Copy the first `n` elements of `src`; returns one past the last write.
    fn copy_n<T>(&self, src: &[T], n: usize, dest: &mut [T]) -> Result<usize, StrataError>
    where
        T: Clone + Send + Sync + 'static,
    {
        Ok(scalar::copy_n(src, n, dest))
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Whether sorts may take the radix path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RadixPolicy {
    /// Use radix sort whenever the key and comparator admit it.
    #[default]
    Auto,

    /// Always use the comparison sort.
    Disabled,
}

/// Configuration shared by every call of a `Dispatcher`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchConfig {
    /// Radix sort policy.
    pub radix_policy: RadixPolicy,
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Registry of backend implementations plus the dispatch protocol.
///
/// `H` serves `Sequential` (and `Generic`) handles, `P` serves `Parallel`
/// handles and `A` serves `Accelerator` handles.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher<H = SequentialBackend, P = SequentialBackend, A = SequentialBackend> {
    host: H,
    parallel: P,
    accelerator: A,
    config: DispatchConfig,
}

impl Dispatcher {
    /// Create a dispatcher that runs every backend sequentially on the host.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H, P, A> Dispatcher<H, P, A> {
    /// Register the implementation serving `Sequential` and `Generic` handles.
    pub fn with_host<B: Backend>(self, host: B) -> Dispatcher<B, P, A> {
        Dispatcher {
            host,
            parallel: self.parallel,
            accelerator: self.accelerator,
            config: self.config,
        }
    }

    /// Register the implementation serving `Parallel` handles.
    pub fn with_parallel<B: Backend>(self, parallel: B) -> Dispatcher<H, B, A> {
        Dispatcher {
            host: self.host,
            parallel,
            accelerator: self.accelerator,
            config: self.config,
        }
    }

    /// Register the implementation serving `Accelerator` handles.
    pub fn with_accelerator<B: Backend>(self, accelerator: B) -> Dispatcher<H, P, B> {
        Dispatcher {
            host: self.host,
            parallel: self.parallel,
            accelerator,
            config: self.config,
        }
    }

    /// Set the radix sort policy.
    pub fn radix_policy(mut self, policy: RadixPolicy) -> Self {
        self.config.radix_policy = policy;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Host implementation.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Parallel-host implementation.
    pub fn parallel(&self) -> &P {
        &self.parallel
    }

    /// Accelerator implementation.
    pub fn accelerator(&self) -> &A {
        &self.accelerator
    }
}

/// Maps a resolved space to the implementation registered for it.
pub trait Select<S: Space> {
    /// Implementation serving `S`.
    type Backend: Backend;

    /// Borrow the implementation serving `S`.
    fn select(&self) -> &Self::Backend;
}

macro_rules! select {
    ($($space:ident => $slot:ident: $param:ident;)*) => {
        $(
            impl<H: Backend, P: Backend, A: Backend> Select<$space> for Dispatcher<H, P, A> {
                type Backend = $param;

                #[inline]
                fn select(&self) -> &$param {
                    &self.$slot
                }
            }
        )*
    };
}

select! {
    Generic => host: H;
    Sequential => host: H;
    Parallel => parallel: P;
    Accelerator => accelerator: A;
}

impl<H, P, A> Dispatcher<H, P, A>
where
    H: Backend,
    P: Backend,
    A: Backend,
{
    /// Look up the implementation for resolved space `S`.
    fn route<S: Space>(
        &self,
        operation: &'static str,
        tags: &[BackendTag],
        len: usize,
    ) -> &<Self as Select<S>>::Backend
    where
        Self: Select<S>,
    {
        debug_assert_eq!(BackendTag::resolve(tags), Ok(S::TAG));

        let backend = <Self as Select<S>>::select(self);
        let resolved = S::TAG;
        debug!(operation, %resolved, backend = backend.name(), len, "dispatch");
        backend
    }

    /// Sort strategy for keys `K` under comparator `C`.
    fn specialize<K: 'static, C: 'static>(&self) -> Specialization<K> {
        match self.config.radix_policy {
            RadixPolicy::Auto => Specialization::<K>::decide::<C>(),
            RadixPolicy::Disabled => Specialization::Comparison,
        }
    }

    // ========================================================================
    // Scalar Search
    // ========================================================================

    /// First position in `src` where `value` could be inserted, ascending order.
    pub fn lower_bound<T, S>(&self, src: View<'_, T, S>, value: &T) -> Result<usize, StrataError>
    where
        T: PartialOrd + Send + Sync + 'static,
        S: Space,
        Self: Select<S>,
    {
        self.lower_bound_by(src, value, Less::new())
    }

    /// First position in `src` where `value` could be inserted under `comp`.
    pub fn lower_bound_by<T, S, C>(
        &self,
        src: View<'_, T, S>,
        value: &T,
        comp: C,
    ) -> Result<usize, StrataError>
    where
        T: Send + Sync + 'static,
        C: Compare<T> + Sync + 'static,
        S: Space,
        Self: Select<S>,
    {
        self.route::<S>("lower_bound", &[src.tag()], src.len())
            .lower_bound(src.as_slice(), value, &comp)
    }

    /// First position in `src` past every element equal to `value`.
    pub fn upper_bound<T, S>(&self, src: View<'_, T, S>, value: &T) -> Result<usize, StrataError>
    where
        T: PartialOrd + Send + Sync + 'static,
        S: Space,
        Self: Select<S>,
    {
        self.upper_bound_by(src, value, Less::new())
    }

    /// First position in `src` past every element equivalent to `value` under `comp`.
    pub fn upper_bound_by<T, S, C>(
        &self,
        src: View<'_, T, S>,
        value: &T,
        comp: C,
    ) -> Result<usize, StrataError>
    where
        T: Send + Sync + 'static,
        C: Compare<T> + Sync + 'static,
        S: Space,
        Self: Select<S>,
    {
        self.route::<S>("upper_bound", &[src.tag()], src.len())
            .upper_bound(src.as_slice(), value, &comp)
    }

    /// Whether `src` contains an element equal to `value`.
    pub fn binary_search<T, S>(&self, src: View<'_, T, S>, value: &T) -> Result<bool, StrataError>
    where
        T: PartialOrd + Send + Sync + 'static,
        S: Space,
        Self: Select<S>,
    {
        self.binary_search_by(src, value, Less::new())
    }

    /// Whether `src` contains an element equivalent to `value` under `comp`.
    pub fn binary_search_by<T, S, C>(
        &self,
        src: View<'_, T, S>,
        value: &T,
        comp: C,
    ) -> Result<bool, StrataError>
    where
        T: Send + Sync + 'static,
        C: Compare<T> + Sync + 'static,
        S: Space,
        Self: Select<S>,
    {
        self.route::<S>("binary_search", &[src.tag()], src.len())
            .binary_search(src.as_slice(), value, &comp)
    }

    /// `(lower_bound, upper_bound)` of `value` in `src`.
    pub fn equal_range<T, S>(
        &self,
        src: View<'_, T, S>,
        value: &T,
    ) -> Result<(usize, usize), StrataError>
    where
        T: PartialOrd + Send + Sync + 'static,
        S: Space,
        Self: Select<S>,
    {
        self.equal_range_by(src, value, Less::new())
    }

    /// `(lower_bound, upper_bound)` of `value` in `src` under `comp`.
    pub fn equal_range_by<T, S, C>(
        &self,
        src: View<'_, T, S>,
        value: &T,
        comp: C,
    ) -> Result<(usize, usize), StrataError>
    where
        T: Send + Sync + 'static,
        C: Compare<T> + Sync + 'static,
        S: Space,
        Self: Select<S>,
    {
        self.route::<S>("equal_range", &[src.tag()], src.len())
            .equal_range(src.as_slice(), value, &comp)
    }

    // ========================================================================
    // Vectorized Search
    // ========================================================================

    /// Lower bound of every query in `values`, written to `out`.
    pub fn lower_bound_many<T, S1, S2, S3>(
        &self,
        src: View<'_, T, S1>,
        values: View<'_, T, S2>,
        out: ViewMut<'_, usize, S3>,
    ) -> Result<(), StrataError>
    where
        T: PartialOrd + Send + Sync + 'static,
        S1: Resolve<S2>,
        S2: Space,
        S3: Space,
        Resolved<S1, S2>: Resolve<S3>,
        Self: Select<Resolved3<S1, S2, S3>>,
    {
        self.lower_bound_many_by(src, values, out, Less::new())
    }

    /// Lower bound of every query in `values` under `comp`, written to `out`.
    pub fn lower_bound_many_by<T, S1, S2, S3, C>(
        &self,
        src: View<'_, T, S1>,
        values: View<'_, T, S2>,
        out: ViewMut<'_, usize, S3>,
        comp: C,
    ) -> Result<(), StrataError>
    where
        T: Send + Sync + 'static,
        C: Compare<T> + Sync + 'static,
        S1: Resolve<S2>,
        S2: Space,
        S3: Space,
        Resolved<S1, S2>: Resolve<S3>,
        Self: Select<Resolved3<S1, S2, S3>>,
    {
        Validator::validate_output("lower_bound_many", values.len(), out.len())?;
        let tags = [src.tag(), values.tag(), out.tag()];
        self.route::<Resolved3<S1, S2, S3>>("lower_bound_many", &tags, values.len())
            .lower_bound_many(src.as_slice(), values.as_slice(), out.into_slice(), &comp)
    }

    /// Upper bound of every query in `values`, written to `out`.
    pub fn upper_bound_many<T, S1, S2, S3>(
        &self,
        src: View<'_, T, S1>,
        values: View<'_, T, S2>,
        out: ViewMut<'_, usize, S3>,
    ) -> Result<(), StrataError>
    where
        T: PartialOrd + Send + Sync + 'static,
        S1: Resolve<S2>,
        S2: Space,
        S3: Space,
        Resolved<S1, S2>: Resolve<S3>,
        Self: Select<Resolved3<S1, S2, S3>>,
    {
        self.upper_bound_many_by(src, values, out, Less::new())
    }

    /// Upper bound of every query in `values` under `comp`, written to `out`.
    pub fn upper_bound_many_by<T, S1, S2, S3, C>(
        &self,
        src: View<'_, T, S1>,
        values: View<'_, T, S2>,
        out: ViewMut<'_, usize, S3>,
        comp: C,
    ) -> Result<(), StrataError>
    where
        T: Send + Sync + 'static,
        C: Compare<T> + Sync + 'static,
        S1: Resolve<S2>,
        S2: Space,
        S3: Space,
        Resolved<S1, S2>: Resolve<S3>,
        Self: Select<Resolved3<S1, S2, S3>>,
    {
        Validator::validate_output("upper_bound_many", values.len(), out.len())?;
        let tags = [src.tag(), values.tag(), out.tag()];
        self.route::<Resolved3<S1, S2, S3>>("upper_bound_many", &tags, values.len())
            .upper_bound_many(src.as_slice(), values.as_slice(), out.into_slice(), &comp)
    }

    /// Membership of every query in `values`, written to `out`.
    pub fn binary_search_many<T, S1, S2, S3>(
        &self,
        src: View<'_, T, S1>,
        values: View<'_, T, S2>,
        out: ViewMut<'_, bool, S3>,
    ) -> Result<(), StrataError>
    where
        T: PartialOrd + Send + Sync + 'static,
        S1: Resolve<S2>,
        S2: Space,
        S3: Space,
        Resolved<S1, S2>: Resolve<S3>,
        Self: Select<Resolved3<S1, S2, S3>>,
    {
        self.binary_search_many_by(src, values, out, Less::new())
    }

    /// Membership of every query in `values` under `comp`, written to `out`.
    pub fn binary_search_many_by<T, S1, S2, S3, C>(
        &self,
        src: View<'_, T, S1>,
        values: View<'_, T, S2>,
        out: ViewMut<'_, bool, S3>,
        comp: C,
    ) -> Result<(), StrataError>
    where
        T: Send + Sync + 'static,
        C: Compare<T> + Sync + 'static,
        S1: Resolve<S2>,
        S2: Space,
        S3: Space,
        Resolved<S1, S2>: Resolve<S3>,
        Self: Select<Resolved3<S1, S2, S3>>,
    {
        Validator::validate_output("binary_search_many", values.len(), out.len())?;
        let tags = [src.tag(), values.tag(), out.tag()];
        self.route::<Resolved3<S1, S2, S3>>("binary_search_many", &tags, values.len())
            .binary_search_many(src.as_slice(), values.as_slice(), out.into_slice(), &comp)
    }

    /// Equal range of every query in `values`, written to `out`.
    pub fn equal_range_many<T, S1, S2, S3>(
        &self,
        src: View<'_, T, S1>,
        values: View<'_, T, S2>,
        out: ViewMut<'_, (usize, usize), S3>,
    ) -> Result<(), StrataError>
    where
        T: PartialOrd + Send + Sync + 'static,
        S1: Resolve<S2>,
        S2: Space,
        S3: Space,
        Resolved<S1, S2>: Resolve<S3>,
        Self: Select<Resolved3<S1, S2, S3>>,
    {
        self.equal_range_many_by(src, values, out, Less::new())
    }

    /// Equal range of every query in `values` under `comp`, written to `out`.
    pub fn equal_range_many_by<T, S1, S2, S3, C>(
        &self,
        src: View<'_, T, S1>,
        values: View<'_, T, S2>,
        out: ViewMut<'_, (usize, usize), S3>,
        comp: C,
    ) -> Result<(), StrataError>
    where
        T: Send + Sync + 'static,
        C: Compare<T> + Sync + 'static,
        S1: Resolve<S2>,
        S2: Space,
        S3: Space,
        Resolved<S1, S2>: Resolve<S3>,
        Self: Select<Resolved3<S1, S2, S3>>,
    {
        Validator::validate_output("equal_range_many", values.len(), out.len())?;
        let tags = [src.tag(), values.tag(), out.tag()];
        self.route::<Resolved3<S1, S2, S3>>("equal_range_many", &tags, values.len())
            .equal_range_many(src.as_slice(), values.as_slice(), out.into_slice(), &comp)
    }

    // ========================================================================
    // Sorting
    // ========================================================================

    /// Stable ascending sort of `keys`.
    pub fn stable_sort<K, S>(&self, keys: ViewMut<'_, K, S>) -> Result<(), StrataError>
    where
        K: PartialOrd + Send + Sync + 'static,
        S: Space,
        Self: Select<S>,
    {
        self.stable_sort_by(keys, Less::new())
    }

    /// Stable sort of `keys` under `comp`.
    ///
    /// Takes the radix path iff `K` is arithmetic and `C` is exactly `Less<K>`
    /// or `Greater<K>`, unless the radix policy is `Disabled`.
    pub fn stable_sort_by<K, S, C>(
        &self,
        keys: ViewMut<'_, K, S>,
        comp: C,
    ) -> Result<(), StrataError>
    where
        K: Send + Sync + 'static,
        C: Compare<K> + Sync + 'static,
        S: Space,
        Self: Select<S>,
    {
        let decision = self.specialize::<K, C>();
        let backend = self.route::<S>("stable_sort", &[keys.tag()], keys.len());
        debug!(path = decision.name(), "stable_sort");

        match decision {
            Specialization::Radix(codec) => backend.stable_radix_sort(keys.into_slice(), &codec),
            Specialization::Comparison => backend.stable_sort(keys.into_slice(), &comp),
        }
    }

    /// Stable ascending sort of `keys`, carrying `values` along.
    pub fn stable_sort_by_key<K, V, S1, S2>(
        &self,
        keys: ViewMut<'_, K, S1>,
        values: ViewMut<'_, V, S2>,
    ) -> Result<(), StrataError>
    where
        K: PartialOrd + Send + Sync + 'static,
        V: Send,
        S1: Resolve<S2>,
        S2: Space,
        Self: Select<Resolved<S1, S2>>,
    {
        self.stable_sort_by_key_by(keys, values, Less::new())
    }

    /// Stable sort of `keys` under `comp`, carrying `values` along.
    ///
    /// The decision depends on `K` and `C` only. Values beyond `keys.len()`
    /// are left untouched.
    pub fn stable_sort_by_key_by<K, V, S1, S2, C>(
        &self,
        keys: ViewMut<'_, K, S1>,
        values: ViewMut<'_, V, S2>,
        comp: C,
    ) -> Result<(), StrataError>
    where
        K: Send + Sync + 'static,
        V: Send,
        C: Compare<K> + Sync + 'static,
        S1: Resolve<S2>,
        S2: Space,
        Self: Select<Resolved<S1, S2>>,
    {
        Validator::validate_by_key(keys.len(), values.len())?;

        let decision = self.specialize::<K, C>();
        let tags = [keys.tag(), values.tag()];
        let backend = self.route::<Resolved<S1, S2>>("stable_sort_by_key", &tags, keys.len());
        debug!(path = decision.name(), "stable_sort_by_key");

        let (keys, values) = (keys.into_slice(), values.into_slice());
        match decision {
            Specialization::Radix(codec) => backend.stable_radix_sort_by_key(keys, values, &codec),
            Specialization::Comparison => backend.stable_sort_by_key(keys, values, &comp),
        }
    }

    // ========================================================================
    // Copy
    // ========================================================================

    /// Copy `src` into the front of `dest`.
    ///
    /// Returns the position in `dest` one past the last element written.
    pub fn copy<T, S1, S2>(
        &self,
        src: View<'_, T, S1>,
        dest: ViewMut<'_, T, S2>,
    ) -> Result<usize, StrataError>
    where
        T: Clone + Send + Sync + 'static,
        S1: Resolve<S2>,
        S2: Space,
        Self: Select<Resolved<S1, S2>>,
    {
        Validator::validate_copy(src.len(), dest.len())?;
        let tags = [src.tag(), dest.tag()];
        self.route::<Resolved<S1, S2>>("copy", &tags, src.len())
            .copy(src.as_slice(), dest.into_slice())
    }

    /// Copy the first `n` elements of `src` into the front of `dest`.
    ///
    /// Returns the position in `dest` one past the last element written; `0`
    /// (the start of `dest`) when `n == 0`, in which case nothing is touched.
    pub fn copy_n<T, S1, S2>(
        &self,
        src: View<'_, T, S1>,
        n: usize,
        dest: ViewMut<'_, T, S2>,
    ) -> Result<usize, StrataError>
    where
        T: Clone + Send + Sync + 'static,
        S1: Resolve<S2>,
        S2: Space,
        Self: Select<Resolved<S1, S2>>,
    {
        Validator::validate_copy_n(src.len(), n, dest.len())?;
        let tags = [src.tag(), dest.tag()];
        self.route::<Resolved<S1, S2>>("copy_n", &tags, n)
            .copy_n(src.as_slice(), n, dest.into_slice())
    }
}

/// Resolve a dynamic set of tags, for callers that hold tags as values.
///
/// Thin wrapper over [`BackendTag::resolve`] that also logs conflicts.
pub fn resolve_tags(tags: &[BackendTag]) -> Result<BackendTag, StrataError> {
    let resolved = BackendTag::resolve(tags);
    if let Err(err) = &resolved {
        debug!(%err, count = tags.len(), "backend resolution failed");
    }
    resolved
}
