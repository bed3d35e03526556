//! Fixed-shape nested/flat duality.
//!
//! Following ArraysOfArrays.jl's `ArrayOfSimilarArrays`: one flat buffer of
//! dimensionality `M + N` viewed as an `N`-dimensional array of
//! `M`-dimensional arrays that all share one shape. Column-major layout puts
//! the inner dimensions first, so each element is a contiguous segment.

use smallvec::SmallVec;

use crate::dims::{linear_index, total_size, Dims};
use crate::error::ArrayError;
use crate::view::{ArrayView, ArrayViewMut};

/// An array of equally-shaped arrays, stored flat.
///
/// The flat and nested views are backed by the same buffer; mutation through
/// either is observable from the other.
///
/// # Examples
///
/// ```
/// use arraysofarrays::ArrayOfSimilarArrays;
///
/// // A 2x3x4 flat array viewed as a 4-vector of 2x3 matrices.
/// let flat: Vec<i32> = (0..24).collect();
/// let nested = ArrayOfSimilarArrays::from_flat(flat, &[2, 3, 4], 2).unwrap();
/// assert_eq!(nested.innersize(), &[2, 3]);
/// assert_eq!(nested.outer_size(), &[4]);
/// assert_eq!(nested.get(&[1]).unwrap().as_slice(), &[6, 7, 8, 9, 10, 11]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayOfSimilarArrays<T> {
    data: Vec<T>,
    inner_shape: Dims,
    outer_shape: Dims,
}

/// A vector of equally-shaped arrays (outer rank 1), the only configuration
/// that supports `push` and `resize`.
pub type VectorOfSimilarArrays<T> = ArrayOfSimilarArrays<T>;

impl<T> ArrayOfSimilarArrays<T> {
    /// Wrap a flat array as a nested one, splitting the first `inner_ndims`
    /// dimensions of `shape` off as the common element shape. Mirrors
    /// ArraysOfArrays.jl's `nestedview`; the data is not copied.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::DimensionMismatch` if `inner_ndims` exceeds the
    /// rank of `shape` and `ArrayError::ShapeMismatch` if the shape's total
    /// size differs from the data length.
    pub fn from_flat(
        data: Vec<T>,
        shape: &[usize],
        inner_ndims: usize,
    ) -> Result<Self, ArrayError> {
        if inner_ndims > shape.len() {
            return Err(ArrayError::DimensionMismatch {
                expected: shape.len(),
                actual: inner_ndims,
            });
        }
        if total_size(shape) != data.len() {
            return Err(ArrayError::ShapeMismatch {
                expected: shape.to_vec(),
                actual: vec![data.len()],
            });
        }
        Ok(Self {
            data,
            inner_shape: Dims::from_slice(&shape[..inner_ndims]),
            outer_shape: Dims::from_slice(&shape[inner_ndims..]),
        })
    }

    /// Shape of the element arrays.
    #[inline]
    pub fn innersize(&self) -> &[usize] {
        &self.inner_shape
    }

    /// Shape of the outer array.
    #[inline]
    pub fn outer_size(&self) -> &[usize] {
        &self.outer_shape
    }

    /// Shape of the flat view: inner dimensions followed by outer ones.
    pub fn flat_shape(&self) -> Dims {
        let mut shape: Dims = SmallVec::with_capacity(self.inner_shape.len() + self.outer_shape.len());
        shape.extend_from_slice(&self.inner_shape);
        shape.extend_from_slice(&self.outer_shape);
        shape
    }

    /// Flat length of one element array.
    #[inline]
    pub fn inner_len(&self) -> usize {
        total_size(&self.inner_shape)
    }

    /// Number of element arrays.
    #[inline]
    pub fn len(&self) -> usize {
        total_size(&self.outer_shape)
    }

    /// Check if there are no element arrays.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The live flat buffer. Its shape may be reinterpreted freely by the
    /// caller; its length cannot change through a slice.
    #[inline]
    pub fn flatview(&self) -> &[T] {
        &self.data
    }

    /// The live flat buffer, mutable.
    #[inline]
    pub fn flatview_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// A non-copying view of the element at `outer_idxs`.
    ///
    /// Returns `None` on wrong index count or out-of-range components.
    pub fn get(&self, outer_idxs: &[usize]) -> Option<ArrayView<'_, T>> {
        let o = linear_index(outer_idxs, &self.outer_shape).ok()?;
        let start = o * self.inner_len();
        let seg = &self.data[start..start + self.inner_len()];
        Some(ArrayView::from_parts(seg, self.inner_shape.clone()))
    }

    /// A non-copying mutable view of the element at `outer_idxs`.
    pub fn get_mut(&mut self, outer_idxs: &[usize]) -> Option<ArrayViewMut<'_, T>> {
        let o = linear_index(outer_idxs, &self.outer_shape).ok()?;
        let inner_len = self.inner_len();
        let start = o * inner_len;
        let seg = &mut self.data[start..start + inner_len];
        Some(ArrayViewMut::from_parts(seg, self.inner_shape.clone()))
    }

    /// The selected element as an aliasing view. Like [`Self::get`], but
    /// reports errors, for use at the outer layer of deep indexing.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::RankMismatch` or `ArrayError::IndexOutOfRange`
    /// for invalid outer indices.
    pub fn deep_view(&self, outer_idxs: &[usize]) -> Result<ArrayView<'_, T>, ArrayError> {
        let o = linear_index(outer_idxs, &self.outer_shape)?;
        let start = o * self.inner_len();
        let seg = &self.data[start..start + self.inner_len()];
        Ok(ArrayView::from_parts(seg, self.inner_shape.clone()))
    }

    /// Apply `f` to every payload element, preserving the inner and outer
    /// shapes. Mirrors ArraysOfArrays.jl's `innermap`.
    pub fn map_inner<U>(&self, f: impl FnMut(&T) -> U) -> ArrayOfSimilarArrays<U> {
        ArrayOfSimilarArrays {
            data: self.data.iter().map(f).collect(),
            inner_shape: self.inner_shape.clone(),
            outer_shape: self.outer_shape.clone(),
        }
    }

    /// Iterate over element views in column-major outer order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            arr: self,
            index: 0,
        }
    }
}

impl<T: Clone> ArrayOfSimilarArrays<T> {
    /// Build a vector of similar arrays by copying a sequence of
    /// equally-shaped arrays.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::InvalidStructure` for an empty sequence (the
    /// element shape cannot be inferred) and `ArrayError::ShapeMismatch` if
    /// the arrays disagree in shape.
    pub fn from_arrays<'a, I>(arrays: I) -> Result<Self, ArrayError>
    where
        T: 'a,
        I: IntoIterator<Item = ArrayView<'a, T>>,
    {
        let mut iter = arrays.into_iter();
        let first = iter.next().ok_or_else(|| ArrayError::InvalidStructure {
            reason: "cannot infer the element shape from an empty sequence".to_string(),
        })?;
        let inner_shape = Dims::from_slice(first.shape());
        let mut data = first.to_vec();
        let mut count = 1;
        for array in iter {
            if array.shape() != inner_shape.as_slice() {
                return Err(ArrayError::ShapeMismatch {
                    expected: inner_shape.to_vec(),
                    actual: array.shape().to_vec(),
                });
            }
            data.extend_from_slice(array.as_slice());
            count += 1;
        }
        Ok(Self {
            data,
            inner_shape,
            outer_shape: smallvec::smallvec![count],
        })
    }

    /// Overwrite the element at `outer_idxs` in place.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::RankMismatch` / `ArrayError::IndexOutOfRange` for
    /// invalid outer indices and `ArrayError::ShapeMismatch` if the source
    /// shape differs from `innersize()`.
    pub fn set(&mut self, outer_idxs: &[usize], src: ArrayView<'_, T>) -> Result<(), ArrayError> {
        let o = linear_index(outer_idxs, &self.outer_shape)?;
        if src.shape() != self.inner_shape.as_slice() {
            return Err(ArrayError::ShapeMismatch {
                expected: self.inner_shape.to_vec(),
                actual: src.shape().to_vec(),
            });
        }
        let inner_len = self.inner_len();
        let start = o * inner_len;
        self.data[start..start + inner_len].clone_from_slice(src.as_slice());
        Ok(())
    }

    /// Append one element array along the outer axis. Supported only for
    /// outer rank 1 (a vector of similar arrays).
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::DimensionMismatch` if the outer rank is not 1 and
    /// `ArrayError::ShapeMismatch` if the source shape differs from
    /// `innersize()`. The array is unchanged on failure.
    pub fn push(&mut self, src: ArrayView<'_, T>) -> Result<(), ArrayError> {
        if self.outer_shape.len() != 1 {
            return Err(ArrayError::DimensionMismatch {
                expected: 1,
                actual: self.outer_shape.len(),
            });
        }
        if src.shape() != self.inner_shape.as_slice() {
            return Err(ArrayError::ShapeMismatch {
                expected: self.inner_shape.to_vec(),
                actual: src.shape().to_vec(),
            });
        }
        self.data.extend_from_slice(src.as_slice());
        self.outer_shape[0] += 1;
        Ok(())
    }

    /// Grow or shrink along the outer axis to `new_outer_len` elements,
    /// cloning `fill` into any new positions. Supported only for outer
    /// rank 1.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::DimensionMismatch` if the outer rank is not 1.
    pub fn resize(&mut self, new_outer_len: usize, fill: T) -> Result<(), ArrayError> {
        if self.outer_shape.len() != 1 {
            return Err(ArrayError::DimensionMismatch {
                expected: 1,
                actual: self.outer_shape.len(),
            });
        }
        self.data.resize(new_outer_len * self.inner_len(), fill);
        self.outer_shape[0] = new_outer_len;
        Ok(())
    }
}

/// Iterator over element views of an [`ArrayOfSimilarArrays`].
pub struct Iter<'a, T> {
    arr: &'a ArrayOfSimilarArrays<T>,
    index: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = ArrayView<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.arr.len() {
            return None;
        }
        let inner_len = self.arr.inner_len();
        let start = self.index * inner_len;
        let seg = &self.arr.data[start..start + inner_len];
        self.index += 1;
        Some(ArrayView::from_parts(seg, self.arr.inner_shape.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.arr.len() - self.index;
        (rem, Some(rem))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a ArrayOfSimilarArrays<T> {
    type Item = ArrayView<'a, T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
