//! Input abstractions for dispatched operations.
//!
//! ## Purpose
//!
//! This module lets callers hand slices, vectors and one-dimensional `ndarray`
//! arrays to the dispatcher by turning them into space-tagged handles.
//!
//! ## Design notes
//!
//! * **Zero-copy**: Handles borrow the container's buffer directly.
//! * **Fail-fast validation**: Non-contiguous arrays are rejected instead of
//!   being copied.
//!
//! ## Invariants
//!
//! * Returned slices cover every element of the container, in logical order.

// External dependencies
use ndarray::{ArrayBase, Data, DataMut, Ix1};

// Export dependencies from strata crate
use strata::internals::primitives::backend::Space;
use strata::internals::primitives::errors::StrataError;
use strata::internals::primitives::handle::{View, ViewMut};

/// Containers that can be read as a contiguous sequence.
pub trait StrataInput<T> {
    /// Borrow the elements as a contiguous slice.
    fn as_strata_slice(&self) -> Result<&[T], StrataError>;

    /// Borrow the elements as a handle of space `S`.
    fn view_in<S: Space>(&self) -> Result<View<'_, T, S>, StrataError> {
        self.as_strata_slice().map(View::new)
    }
}

/// Containers that can be written as a contiguous sequence.
pub trait StrataInputMut<T> {
    /// Borrow the elements as a contiguous mutable slice.
    fn as_strata_slice_mut(&mut self) -> Result<&mut [T], StrataError>;

    /// Borrow the elements as a writable handle of space `S`.
    fn view_mut_in<S: Space>(&mut self) -> Result<ViewMut<'_, T, S>, StrataError> {
        self.as_strata_slice_mut().map(ViewMut::new)
    }
}

impl<T> StrataInput<T> for [T] {
    fn as_strata_slice(&self) -> Result<&[T], StrataError> {
        Ok(self)
    }
}

impl<T> StrataInput<T> for Vec<T> {
    fn as_strata_slice(&self) -> Result<&[T], StrataError> {
        Ok(self.as_slice())
    }
}

impl<T, S> StrataInput<T> for ArrayBase<S, Ix1>
where
    S: Data<Elem = T>,
{
    fn as_strata_slice(&self) -> Result<&[T], StrataError> {
        self.as_slice().ok_or_else(|| {
            StrataError::InvalidInput("ndarray input must be contiguous in memory".to_string())
        })
    }
}

impl<T> StrataInputMut<T> for [T] {
    fn as_strata_slice_mut(&mut self) -> Result<&mut [T], StrataError> {
        Ok(self)
    }
}

impl<T> StrataInputMut<T> for Vec<T> {
    fn as_strata_slice_mut(&mut self) -> Result<&mut [T], StrataError> {
        Ok(self.as_mut_slice())
    }
}

impl<T, S> StrataInputMut<T> for ArrayBase<S, Ix1>
where
    S: DataMut<Elem = T>,
{
    fn as_strata_slice_mut(&mut self) -> Result<&mut [T], StrataError> {
        self.as_slice_mut().ok_or_else(|| {
            StrataError::InvalidInput("ndarray output must be contiguous in memory".to_string())
        })
    }
}
