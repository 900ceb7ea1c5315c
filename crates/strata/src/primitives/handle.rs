//! Backend-tagged sequence handles.
//!
//! ## Purpose
//!
//! Handles are the position-handle abstraction every dispatched operation
//! consumes: a borrowed sequence plus the `Space` it belongs to. The dispatcher
//! only inspects the space and the element type; the data is handed to the
//! resolved backend untouched.
//!
//! ## Design notes
//!
//! * **Borrowed**: handles never own their data and never outlive the call.
//! * **Zero-cost tag**: the space is a `PhantomData` marker.
//! * **Positions**: results are reported as offsets into the handle.

// External dependencies
use core::fmt::{Debug, Formatter, Result as FmtResult};
use core::marker::PhantomData;

// Internal dependencies
use crate::primitives::backend::{BackendTag, Generic, Space};

// ============================================================================
// Shared Handle
// ============================================================================

/// Read-only handle over a sequence owned by space `S`.
pub struct View<'a, T, S = Generic> {
    data: &'a [T],
    space: PhantomData<S>,
}

impl<'a, T, S: Space> View<'a, T, S> {
    /// Wrap `data` as a handle of space `S`.
    #[inline]
    pub fn new(data: &'a [T]) -> Self {
        Self {
            data,
            space: PhantomData,
        }
    }

    /// Backend tag carried by this handle.
    #[inline]
    pub fn tag(&self) -> BackendTag {
        S::TAG
    }

    /// Number of elements in the sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Underlying elements.
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }
}

impl<T, S> Clone for View<'_, T, S> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S> Copy for View<'_, T, S> {}

impl<T: Debug, S: Space> Debug for View<'_, T, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("View")
            .field("space", &S::TAG)
            .field("data", &self.data)
            .finish()
    }
}

// ============================================================================
// Mutable Handle
// ============================================================================

/// Writable handle over a sequence owned by space `S`.
pub struct ViewMut<'a, T, S = Generic> {
    data: &'a mut [T],
    space: PhantomData<S>,
}

impl<'a, T, S: Space> ViewMut<'a, T, S> {
    /// Wrap `data` as a writable handle of space `S`.
    #[inline]
    pub fn new(data: &'a mut [T]) -> Self {
        Self {
            data,
            space: PhantomData,
        }
    }

    /// Backend tag carried by this handle.
    #[inline]
    pub fn tag(&self) -> BackendTag {
        S::TAG
    }

    /// Number of elements in the sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Underlying elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.data
    }

    /// Underlying elements, writable.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data
    }

    /// Consume the handle, returning the borrowed slice.
    #[inline]
    pub fn into_slice(self) -> &'a mut [T] {
        self.data
    }

    /// Reborrow as a read-only handle of the same space.
    #[inline]
    pub fn as_view(&self) -> View<'_, T, S> {
        View::new(self.data)
    }
}

impl<T: Debug, S: Space> Debug for ViewMut<'_, T, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ViewMut")
            .field("space", &S::TAG)
            .field("data", &self.data)
            .finish()
    }
}
