//! Scratch memory for radix sorting.
//!
//! ## Purpose
//!
//! This module provides reusable workspaces so that repeated radix passes (and
//! repeated sorts on one worker thread) do not hit the allocator every time.
//!
//! ## Design notes
//!
//! * **Lazy Expansion**: Slots grow on demand but never shrink.
//! * **Per-worker**: Buffers are passed explicitly; parallel backends keep one
//!   per worker thread.
//!
//! ## Key concepts
//!
//! * **Slot**: A reusable vector wrapper with automatic capacity management.
//! * **RadixCell**: An encoded key paired with its original position.
//! * **RadixBuffer**: Cells plus the ping-pong scratch used by counting passes.
//!
//! ## Invariants
//!
//! * Buffers are only logically cleared between uses, never deallocated.

// Feature-gated dependencies
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::ops::{Deref, DerefMut};

// ============================================================================
// Slot - Unified Vector Abstraction
// ============================================================================

/// A reusable vector slot with automatic capacity management.
#[derive(Debug, Clone)]
pub struct Slot<T>(Vec<T>);

impl<T> Slot<T> {
    /// Create a new slot with the given initial capacity.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Clear the slot (sets length to 0, preserves capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<T: Clone> Slot<T> {
    /// Reset the slot to exactly `len` copies of `fill`, reusing capacity.
    #[inline]
    pub fn reset(&mut self, len: usize, fill: T) -> &mut [T] {
        self.0.clear();
        self.0.resize(len, fill);
        &mut self.0
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Deref for Slot<T> {
    type Target = Vec<T>;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Slot<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

// ============================================================================
// Radix Buffers
// ============================================================================

/// Order-preserving key code paired with the key's original position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RadixCell {
    /// Encoded key; unsigned comparison of codes matches the requested order.
    pub code: u128,
    /// Position of the key before sorting.
    pub index: usize,
}

/// Working memory for one radix sort.
#[derive(Debug, Clone, Default)]
pub struct RadixBuffer {
    /// Encoded keys being sorted.
    pub cells: Slot<RadixCell>,
    /// Destination of each counting pass.
    pub scratch: Slot<RadixCell>,
}

impl RadixBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer sized for `n` keys.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            cells: Slot::new(n),
            scratch: Slot::new(n),
        }
    }
}
