//! Layer 2: Algorithms
//!
//! This layer implements the sequential reference algorithms: element-wise
//! copies, binary searches, and the two stable sort strategies (comparison and
//! radix). Every backend may fall back to them, and their results define the
//! contract that accelerated implementations must reproduce.

// Sequential copy and copy-with-count.
pub mod scalar;

// Bounds and membership queries over sorted sequences.
pub mod search;

// Stable comparison sorts and permutation application.
pub mod comparison;

// Stable LSD radix sort over order-preserving codes.
pub mod radix;
