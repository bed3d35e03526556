//! Ragged vector-of-arrays storage.
//!
//! Following ArraysOfArrays.jl's `VectorOfArrays` design: all elements of all
//! arrays live in a single flat vector, element boundaries are kept in an
//! element-pointer table, and (for inner dimensionality >= 2) a kernel-size
//! table holds one shape tuple per element.
//!
//! ```text
//! data:      [a0 a1 a2 | b0 | c0 c1 c2 c3]
//! elem_ptr:  [0, 3, 4, 8]
//! ```
//!
//! Invariant: `elem_ptr` is non-decreasing, starts at 0, ends at
//! `data.len()`, and has `len() + 1` entries. Element `i` occupies
//! `data[elem_ptr[i]..elem_ptr[i + 1]]`.

use smallvec::smallvec;

use crate::checks::{validate_structure, ConsistencyChecks};
use crate::dims::{total_size, Dims};
use crate::error::ArrayError;
use crate::view::{ArrayView, ArrayViewMut};

/// A vector of N-dimensional arrays that may differ in size, stored without
/// per-element allocation.
///
/// Element sizes are fixed once written: `set` requires an identical shape,
/// and `resize` can only shrink. New elements enter via `push`.
///
/// # Examples
///
/// ```
/// use arraysofarrays::VectorOfVectors;
///
/// let mut v: VectorOfVectors<i64> = VectorOfVectors::default();
/// v.push_slice(&[1, 2, 3]).unwrap();
/// v.push_slice(&[4]).unwrap();
/// assert_eq!(v.len(), 2);
/// assert_eq!(v.get(1).unwrap().as_slice(), &[4]);
/// assert_eq!(v.flatview(), &[1, 2, 3, 4]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct VectorOfArrays<T> {
    data: Vec<T>,
    elem_ptr: Vec<usize>,
    kernel_size: Option<Vec<Dims>>,
    elem_ndims: usize,
}

/// A vector of one-dimensional arrays. Mirrors ArraysOfArrays.jl's
/// `VectorOfVectors` alias.
pub type VectorOfVectors<T> = VectorOfArrays<T>;

impl<T> Default for VectorOfArrays<T> {
    /// An empty vector of vectors (inner dimensionality 1).
    fn default() -> Self {
        Self::new(1)
    }
}

impl<T> VectorOfArrays<T> {
    /// Create an empty vector of `elem_ndims`-dimensional arrays.
    ///
    /// # Panics
    ///
    /// Panics if `elem_ndims` is 0.
    pub fn new(elem_ndims: usize) -> Self {
        assert!(elem_ndims >= 1, "element dimensionality must be at least 1");
        Self {
            data: Vec::new(),
            elem_ptr: vec![0],
            kernel_size: (elem_ndims >= 2).then(Vec::new),
            elem_ndims,
        }
    }

    /// Adopt caller-built tables for a vector of one-dimensional arrays.
    ///
    /// Runs the requested consistency checks over the tables before
    /// accepting them.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::InvalidStructure` naming the first violated
    /// invariant if the policy rejects the tables.
    ///
    /// # Examples
    ///
    /// ```
    /// use arraysofarrays::{ConsistencyChecks, VectorOfVectors};
    ///
    /// let v = VectorOfVectors::from_raw(
    ///     vec![1, 2, 3, 4, 5],
    ///     vec![0, 2, 5],
    ///     ConsistencyChecks::Full,
    /// )
    /// .unwrap();
    /// assert_eq!(v.len(), 2);
    /// assert_eq!(v.get(1).unwrap().as_slice(), &[3, 4, 5]);
    /// ```
    pub fn from_raw(
        data: Vec<T>,
        elem_ptr: Vec<usize>,
        checks: ConsistencyChecks,
    ) -> Result<Self, ArrayError> {
        validate_structure(data.len(), &elem_ptr, None, 1, checks)?;
        Ok(Self {
            data,
            elem_ptr,
            kernel_size: None,
            elem_ndims: 1,
        })
    }

    /// Adopt caller-built tables for a vector of `elem_ndims`-dimensional
    /// arrays, `elem_ndims >= 2`, with one kernel shape per element.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::DimensionMismatch` if `elem_ndims < 2` and
    /// `ArrayError::InvalidStructure` if the checking policy rejects the
    /// tables.
    pub fn from_raw_nd(
        elem_ndims: usize,
        data: Vec<T>,
        elem_ptr: Vec<usize>,
        kernel_size: Vec<Dims>,
        checks: ConsistencyChecks,
    ) -> Result<Self, ArrayError> {
        if elem_ndims < 2 {
            return Err(ArrayError::DimensionMismatch {
                expected: 2,
                actual: elem_ndims,
            });
        }
        validate_structure(data.len(), &elem_ptr, Some(&kernel_size), elem_ndims, checks)?;
        Ok(Self {
            data,
            elem_ptr,
            kernel_size: Some(kernel_size),
            elem_ndims,
        })
    }

    /// Number of element arrays.
    #[inline]
    pub fn len(&self) -> usize {
        self.elem_ptr.len() - 1
    }

    /// Check if there are no element arrays.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimensionality of the element arrays.
    #[inline]
    pub fn elem_ndims(&self) -> usize {
        self.elem_ndims
    }

    /// Total number of payload elements across all arrays.
    #[inline]
    pub fn flat_len(&self) -> usize {
        self.data.len()
    }

    /// Flat length of element `i`, or `None` if out of range.
    pub fn elem_len(&self, i: usize) -> Option<usize> {
        if i < self.len() {
            Some(self.elem_ptr[i + 1] - self.elem_ptr[i])
        } else {
            None
        }
    }

    /// Shape of element `i`, or `None` if out of range.
    pub fn elem_shape(&self, i: usize) -> Option<Dims> {
        let len = self.elem_len(i)?;
        Some(match &self.kernel_size {
            Some(kernel) => kernel[i].clone(),
            None => smallvec![len],
        })
    }

    /// A non-copying view of element `i`, reshaped per its kernel size.
    ///
    /// Returns `None` if `i` is out of range.
    pub fn get(&self, i: usize) -> Option<ArrayView<'_, T>> {
        let shape = self.elem_shape(i)?;
        let seg = &self.data[self.elem_ptr[i]..self.elem_ptr[i + 1]];
        Some(ArrayView::from_parts(seg, shape))
    }

    /// A non-copying mutable view of element `i`.
    ///
    /// Returns `None` if `i` is out of range.
    pub fn get_mut(&mut self, i: usize) -> Option<ArrayViewMut<'_, T>> {
        let shape = self.elem_shape(i)?;
        let seg = &mut self.data[self.elem_ptr[i]..self.elem_ptr[i + 1]];
        Some(ArrayViewMut::from_parts(seg, shape))
    }

    /// The selected element as an aliasing view. Like [`Self::get`], but
    /// takes an index tuple and reports errors, for use at the outer layer of
    /// deep indexing.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::RankMismatch` unless exactly one index is given
    /// and `ArrayError::IndexOutOfRange` if it exceeds `len()`.
    pub fn deep_view(&self, idxs: &[usize]) -> Result<ArrayView<'_, T>, ArrayError> {
        if idxs.len() != 1 {
            return Err(ArrayError::RankMismatch {
                expected: 1,
                actual: idxs.len(),
            });
        }
        self.get(idxs[0]).ok_or(ArrayError::IndexOutOfRange {
            index: idxs[0],
            len: self.len(),
        })
    }

    /// The live flat buffer holding all elements' data in order.
    ///
    /// The slice return makes external length changes impossible, so reading
    /// and writing through it can never desynchronize the element-pointer
    /// table.
    #[inline]
    pub fn flatview(&self) -> &[T] {
        &self.data
    }

    /// The live flat buffer, mutable.
    #[inline]
    pub fn flatview_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// A copy of the element-pointer table. The copy may be freely mutated
    /// without affecting this vector.
    pub fn element_ptr(&self) -> Vec<usize> {
        self.elem_ptr.clone()
    }

    /// The live element-pointer table.
    #[inline]
    pub fn internal_element_ptr(&self) -> &[usize] {
        &self.elem_ptr
    }

    /// The kernel-size table, present iff `elem_ndims() >= 2`.
    #[inline]
    pub fn kernel_sizes(&self) -> Option<&[Dims]> {
        self.kernel_size.as_deref()
    }

    /// Reserve capacity for up to `additional` more elements, each at most
    /// `max_elem_shape` in size. Pure performance hint; logical length and
    /// content are unchanged. Mirrors ArraysOfArrays.jl's `sizehint!`.
    pub fn reserve(&mut self, additional: usize, max_elem_shape: &[usize]) {
        self.data.reserve(additional * total_size(max_elem_shape));
        self.elem_ptr.reserve(additional);
        if let Some(kernel) = &mut self.kernel_size {
            kernel.reserve(additional);
        }
    }

    /// Shrink to `new_len` elements, discarding trailing data.
    ///
    /// Growing is rejected: the shapes of fabricated new elements would be
    /// unknown.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::GrowthNotSupported` if `new_len > len()`.
    pub fn resize(&mut self, new_len: usize) -> Result<(), ArrayError> {
        if new_len > self.len() {
            return Err(ArrayError::GrowthNotSupported {
                len: self.len(),
                requested: new_len,
            });
        }
        self.data.truncate(self.elem_ptr[new_len]);
        self.elem_ptr.truncate(new_len + 1);
        if let Some(kernel) = &mut self.kernel_size {
            kernel.truncate(new_len);
        }
        Ok(())
    }

    /// Remove all elements.
    pub fn clear(&mut self) {
        self.data.clear();
        self.elem_ptr.clear();
        self.elem_ptr.push(0);
        if let Some(kernel) = &mut self.kernel_size {
            kernel.clear();
        }
    }

    /// Remove the last element and return its data.
    pub fn pop(&mut self) -> Option<Vec<T>> {
        if self.is_empty() {
            return None;
        }
        let start = self.elem_ptr[self.len() - 1];
        let elem = self.data.split_off(start);
        self.elem_ptr.pop();
        if let Some(kernel) = &mut self.kernel_size {
            kernel.pop();
        }
        Some(elem)
    }

    /// The common shape of all element arrays.
    ///
    /// For an empty vector the result is all-zero with the element rank.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::ShapeMismatch` if the elements are not all of
    /// equal shape.
    pub fn innersize(&self) -> Result<Dims, ArrayError> {
        if self.is_empty() {
            return Ok(smallvec![0; self.elem_ndims]);
        }
        match &self.kernel_size {
            Some(kernel) => {
                let first = &kernel[0];
                for shape in &kernel[1..] {
                    if shape != first {
                        return Err(ArrayError::ShapeMismatch {
                            expected: first.to_vec(),
                            actual: shape.to_vec(),
                        });
                    }
                }
                Ok(first.clone())
            }
            None => {
                let first = self.elem_ptr[1] - self.elem_ptr[0];
                for w in self.elem_ptr.windows(2).skip(1) {
                    let len = w[1] - w[0];
                    if len != first {
                        return Err(ArrayError::ShapeMismatch {
                            expected: vec![first],
                            actual: vec![len],
                        });
                    }
                }
                Ok(smallvec![first])
            }
        }
    }

    /// Apply `f` to every payload element, preserving the ragged structure.
    /// Mirrors ArraysOfArrays.jl's `innermap`.
    pub fn map_inner<U>(&self, f: impl FnMut(&T) -> U) -> VectorOfArrays<U> {
        VectorOfArrays {
            data: self.data.iter().map(f).collect(),
            elem_ptr: self.elem_ptr.clone(),
            kernel_size: self.kernel_size.clone(),
            elem_ndims: self.elem_ndims,
        }
    }

    /// Iterate over element views in order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            vec: self,
            index: 0,
        }
    }

    /// Iterate over mutable element views in order.
    ///
    /// The views are non-overlapping, so all elements can be mutated in one
    /// pass without copying.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            data: &mut self.data,
            elem_ptr: &self.elem_ptr,
            kernel_size: self.kernel_size.as_deref(),
            index: 0,
        }
    }
}

impl<T: Clone> VectorOfArrays<T> {
    /// Build from a sequence of arrays, copying each array's data in order
    /// into the flat buffer. The first array fixes the inner dimensionality.
    ///
    /// An empty sequence yields an empty vector of vectors.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::DimensionMismatch` if the arrays disagree in
    /// dimensionality. Nothing is observably constructed on failure.
    pub fn from_arrays<'a, I>(arrays: I) -> Result<Self, ArrayError>
    where
        T: 'a,
        I: IntoIterator<Item = ArrayView<'a, T>>,
    {
        let mut iter = arrays.into_iter();
        let first = match iter.next() {
            Some(first) => first,
            None => return Ok(Self::new(1)),
        };
        if first.ndim() == 0 {
            return Err(ArrayError::DimensionMismatch {
                expected: 1,
                actual: 0,
            });
        }
        let mut out = Self::new(first.ndim());
        out.push(first)?;
        for array in iter {
            out.push(array)?;
        }
        Ok(out)
    }

    /// Build a vector of vectors from a sequence of slices.
    ///
    /// # Examples
    ///
    /// ```
    /// use arraysofarrays::VectorOfVectors;
    ///
    /// let v = VectorOfVectors::from_vecs([vec![1, 2], vec![], vec![3]]);
    /// assert_eq!(v.len(), 3);
    /// assert_eq!(v.elem_len(1), Some(0));
    /// ```
    pub fn from_vecs<I, V>(vecs: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: AsRef<[T]>,
    {
        let mut out = Self::new(1);
        for v in vecs {
            out.data.extend_from_slice(v.as_ref());
            out.elem_ptr.push(out.data.len());
        }
        out
    }

    /// Append one array: its flat data goes to the buffer, one boundary to
    /// the element-pointer table, and (for inner dimensionality >= 2) its
    /// shape to the kernel-size table.
    ///
    /// Amortized O(1) per payload element via `Vec`'s doubling growth.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::DimensionMismatch` if the array's rank differs
    /// from `elem_ndims()`; the vector is unchanged in that case.
    pub fn push(&mut self, src: ArrayView<'_, T>) -> Result<(), ArrayError> {
        if src.ndim() != self.elem_ndims {
            return Err(ArrayError::DimensionMismatch {
                expected: self.elem_ndims,
                actual: src.ndim(),
            });
        }
        self.data.extend_from_slice(src.as_slice());
        self.elem_ptr.push(self.data.len());
        if let Some(kernel) = &mut self.kernel_size {
            kernel.push(Dims::from_slice(src.shape()));
        }
        Ok(())
    }

    /// Append one vector element. Convenience for the one-dimensional case.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::DimensionMismatch` if `elem_ndims() != 1`.
    pub fn push_slice(&mut self, elem: &[T]) -> Result<(), ArrayError> {
        self.push(ArrayView::from_slice(elem))
    }

    /// Overwrite element `i` in place. The source must match the element's
    /// shape exactly; element shapes are fixed after creation.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::IndexOutOfRange` or `ArrayError::ShapeMismatch`.
    /// The vector is unchanged on failure.
    pub fn set(&mut self, i: usize, src: ArrayView<'_, T>) -> Result<(), ArrayError> {
        if i >= self.len() {
            return Err(ArrayError::IndexOutOfRange {
                index: i,
                len: self.len(),
            });
        }
        let (lo, hi) = (self.elem_ptr[i], self.elem_ptr[i + 1]);
        match &self.kernel_size {
            Some(kernel) => {
                if kernel[i].as_slice() != src.shape() {
                    return Err(ArrayError::ShapeMismatch {
                        expected: kernel[i].to_vec(),
                        actual: src.shape().to_vec(),
                    });
                }
            }
            None => {
                if hi - lo != src.len() {
                    return Err(ArrayError::ShapeMismatch {
                        expected: vec![hi - lo],
                        actual: src.shape().to_vec(),
                    });
                }
            }
        }
        self.data[lo..hi].clone_from_slice(src.as_slice());
        Ok(())
    }
}

impl<'a, T> IntoIterator for &'a VectorOfArrays<T> {
    type Item = ArrayView<'a, T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over element views of a [`VectorOfArrays`].
pub struct Iter<'a, T> {
    vec: &'a VectorOfArrays<T>,
    index: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = ArrayView<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let view = self.vec.get(self.index)?;
        self.index += 1;
        Some(view)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.vec.len() - self.index;
        (rem, Some(rem))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Iterator over mutable element views of a [`VectorOfArrays`].
///
/// Splits the flat buffer segment by segment, so the yielded views are
/// disjoint and may all be held at once.
pub struct IterMut<'a, T> {
    data: &'a mut [T],
    elem_ptr: &'a [usize],
    kernel_size: Option<&'a [Dims]>,
    index: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = ArrayViewMut<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index + 1 >= self.elem_ptr.len() {
            return None;
        }
        let seg_len = self.elem_ptr[self.index + 1] - self.elem_ptr[self.index];
        let (seg, rest) = std::mem::take(&mut self.data).split_at_mut(seg_len);
        self.data = rest;
        let shape = match self.kernel_size {
            Some(kernel) => kernel[self.index].clone(),
            None => smallvec![seg_len],
        };
        self.index += 1;
        Some(ArrayViewMut::from_parts(seg, shape))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.elem_ptr.len() - 1 - self.index;
        (rem, Some(rem))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
