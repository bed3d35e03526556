//! Error types for arraysofarrays.

use thiserror::Error;

/// Errors that can occur when constructing or mutating nested arrays.
#[derive(Debug, Error)]
pub enum ArrayError {
    /// Element index out of range.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Element dimensionality disagrees with the dimensionality of the
    /// containing array.
    #[error("dimension mismatch: expected {expected}-dimensional elements, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Element shape disagrees with the expected shape. `actual` may be a
    /// one-element shape holding a flat data length.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Raw-table adoption failed a consistency check. Reports the first
    /// violated invariant only.
    #[error("invalid structure: {reason}")]
    InvalidStructure { reason: String },

    /// `resize` was asked to grow, which is unsupported because the shapes of
    /// new elements would be unknown.
    #[error("cannot grow from {len} to {requested} elements via resize")]
    GrowthNotSupported { len: usize, requested: usize },

    /// A grouping target's length differs from the key vector's length.
    #[error("length mismatch: source has {expected} entries, target has {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Wrong number of indices for the indexed layer.
    #[error("wrong number of indices: expected {expected}, got {actual}")]
    RankMismatch { expected: usize, actual: usize },
}
