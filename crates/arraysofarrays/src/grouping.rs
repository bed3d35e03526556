//! Grouping of equal consecutive elements.
//!
//! Following ArraysOfArrays.jl's `consgrouped_ptrs` / `consgroupedview`: a
//! key vector is scanned for maximal runs of adjacent equal keys, yielding an
//! element-pointer table that can be applied to any same-length data vector
//! to view it as a `VectorOfVectors` without copying the payload.

use crate::checks::ConsistencyChecks;
use crate::error::ArrayError;
use crate::vector_of_arrays::{VectorOfArrays, VectorOfVectors};

/// Compute an element-pointer table grouping equal consecutive entries of
/// `keys`.
///
/// Grouping is by adjacency only: equal but non-adjacent keys form separate
/// groups.
///
/// # Examples
///
/// ```
/// use arraysofarrays::consgrouped_ptrs;
///
/// // Runs: [1, 1], [2], [3, 3], [2, 2, 2]
/// assert_eq!(consgrouped_ptrs(&[1, 1, 2, 3, 3, 2, 2, 2]), vec![0, 2, 3, 5, 8]);
/// assert_eq!(consgrouped_ptrs::<i32>(&[]), vec![0]);
/// ```
pub fn consgrouped_ptrs<T: PartialEq>(keys: &[T]) -> Vec<usize> {
    let mut ptrs = Vec::new();
    ptrs.push(0);
    for i in 1..keys.len() {
        if keys[i] != keys[i - 1] {
            ptrs.push(i);
        }
    }
    if !keys.is_empty() {
        ptrs.push(keys.len());
    }
    ptrs
}

/// A data collection that a grouping can be applied to: a single vector, or a
/// tuple of vectors (each becomes its own [`VectorOfVectors`] sharing the one
/// pointer table).
pub trait GroupTarget: Sized {
    /// The grouped form of this target.
    type Grouped;

    /// Adopt `elem_ptr` for this target's payload.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::LengthMismatch` if the target length differs from
    /// the key vector length.
    fn apply_grouping(self, source_len: usize, elem_ptr: &[usize])
        -> Result<Self::Grouped, ArrayError>;
}

impl<U> GroupTarget for Vec<U> {
    type Grouped = VectorOfVectors<U>;

    fn apply_grouping(
        self,
        source_len: usize,
        elem_ptr: &[usize],
    ) -> Result<Self::Grouped, ArrayError> {
        if self.len() != source_len {
            return Err(ArrayError::LengthMismatch {
                expected: source_len,
                actual: self.len(),
            });
        }
        // The grouping is consistent by construction, so the cheapest policy
        // is safe here.
        VectorOfArrays::from_raw(self, elem_ptr.to_vec(), ConsistencyChecks::None)
    }
}

macro_rules! impl_group_target_tuple {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: GroupTarget),+> GroupTarget for ($($name,)+) {
            type Grouped = ($($name::Grouped,)+);

            fn apply_grouping(
                self,
                source_len: usize,
                elem_ptr: &[usize],
            ) -> Result<Self::Grouped, ArrayError> {
                Ok(($(self.$idx.apply_grouping(source_len, elem_ptr)?,)+))
            }
        }
    };
}

impl_group_target_tuple!(A: 0, B: 1);
impl_group_target_tuple!(A: 0, B: 1, C: 2);
impl_group_target_tuple!(A: 0, B: 1, C: 2, D: 3);

/// Group `target` by runs of equal consecutive entries of `keys`.
///
/// The pointer table is computed once and applied to every vector of the
/// target; the payload is moved, never copied.
///
/// # Errors
///
/// Returns `ArrayError::LengthMismatch` if any target vector's length differs
/// from `keys.len()`.
///
/// # Examples
///
/// ```
/// use arraysofarrays::consgroupedview;
///
/// let keys = [1, 1, 2, 3, 3, 2, 2, 2];
/// let grouped = consgroupedview(&keys, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
/// assert_eq!(grouped.len(), 4);
/// assert_eq!(grouped.get(0).unwrap().as_slice(), &[1, 2]);
/// assert_eq!(grouped.get(3).unwrap().as_slice(), &[6, 7, 8]);
///
/// // Tuples of vectors share one computed grouping.
/// let (a, b) = consgroupedview(&keys, (keys.to_vec(), vec![10; 8])).unwrap();
/// assert_eq!(a.get(2).unwrap().as_slice(), &[3, 3]);
/// assert_eq!(b.elem_len(3), Some(3));
/// ```
pub fn consgroupedview<K: PartialEq, G: GroupTarget>(
    keys: &[K],
    target: G,
) -> Result<G::Grouped, ArrayError> {
    let elem_ptr = consgrouped_ptrs(keys);
    target.apply_grouping(keys.len(), &elem_ptr)
}
