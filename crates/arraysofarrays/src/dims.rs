//! Shape tuples and index linearization.
//!
//! Uses column-major (Fortran) order to match Julia's ArraysOfArrays.jl:
//! the first index varies fastest in memory.

use smallvec::SmallVec;

use crate::error::ArrayError;

/// A shape tuple. Inline storage for up to four dimensions, heap fallback
/// beyond that.
pub type Dims = SmallVec<[usize; 4]>;

/// Total number of elements described by a shape.
///
/// The product of an empty shape is 1 (a scalar).
///
/// # Examples
///
/// ```
/// use arraysofarrays::dims::total_size;
///
/// assert_eq!(total_size(&[2, 3, 4]), 24);
/// assert_eq!(total_size(&[5]), 5);
/// assert_eq!(total_size(&[]), 1);
/// ```
#[inline]
pub fn total_size(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Convert cartesian indices to a column-major linear index, checking rank
/// and bounds.
///
/// # Errors
///
/// Returns `ArrayError::RankMismatch` if the number of indices differs from
/// the number of dimensions, and `ArrayError::IndexOutOfRange` for the first
/// index component that exceeds its dimension.
///
/// # Examples
///
/// ```
/// use arraysofarrays::dims::linear_index;
///
/// // For shape [3, 4]: index [i, j] -> i + 3*j
/// assert_eq!(linear_index(&[0, 0], &[3, 4]).unwrap(), 0);
/// assert_eq!(linear_index(&[2, 1], &[3, 4]).unwrap(), 5);
/// assert!(linear_index(&[3, 0], &[3, 4]).is_err());
/// ```
pub fn linear_index(indices: &[usize], shape: &[usize]) -> Result<usize, ArrayError> {
    if indices.len() != shape.len() {
        return Err(ArrayError::RankMismatch {
            expected: shape.len(),
            actual: indices.len(),
        });
    }
    let mut linear = 0;
    let mut stride = 1;
    for (&idx, &dim) in indices.iter().zip(shape.iter()) {
        if idx >= dim {
            return Err(ArrayError::IndexOutOfRange {
                index: idx,
                len: dim,
            });
        }
        linear += idx * stride;
        stride *= dim;
    }
    Ok(linear)
}
