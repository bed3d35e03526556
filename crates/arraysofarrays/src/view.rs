//! Borrowed element views.
//!
//! An element of a nested array is a contiguous segment of the flat buffer
//! reinterpreted under a shape. Views are plain borrows, so the borrow
//! checker bounds their validity: holding a view statically excludes any
//! structural mutation of the owning array.

use smallvec::smallvec;

use crate::dims::{linear_index, total_size, Dims};
use crate::error::ArrayError;

/// An immutable multi-dimensional view over a contiguous data segment.
///
/// Accessors that return references tie them to the underlying buffer
/// lifetime `'a`, not to the view itself, so they stay usable after the view
/// is dropped.
#[derive(Clone, Debug)]
pub struct ArrayView<'a, T> {
    data: &'a [T],
    shape: Dims,
}

impl<'a, T> ArrayView<'a, T> {
    /// Create a view of `data` under `shape`.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::ShapeMismatch` if the shape's total size differs
    /// from the data length (the reported `actual` is the data length).
    ///
    /// # Examples
    ///
    /// ```
    /// use arraysofarrays::ArrayView;
    ///
    /// let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    /// let v = ArrayView::new(&data, &[2, 3]).unwrap();
    /// assert_eq!(v.shape(), &[2, 3]);
    /// // Column-major: [1, 0] is the second element.
    /// assert_eq!(v.get(&[1, 0]), Some(&2.0));
    /// ```
    pub fn new(data: &'a [T], shape: &[usize]) -> Result<Self, ArrayError> {
        if total_size(shape) != data.len() {
            return Err(ArrayError::ShapeMismatch {
                expected: shape.to_vec(),
                actual: vec![data.len()],
            });
        }
        Ok(Self {
            data,
            shape: Dims::from_slice(shape),
        })
    }

    /// Create a one-dimensional view of a slice.
    pub fn from_slice(data: &'a [T]) -> Self {
        Self {
            data,
            shape: smallvec![data.len()],
        }
    }

    pub(crate) fn from_parts(data: &'a [T], shape: Dims) -> Self {
        Self { data, shape }
    }

    /// Shape of the view.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the view has zero elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The viewed data segment in column-major order.
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Get an element by cartesian indices.
    ///
    /// Returns `None` on wrong index count or out-of-range components.
    pub fn get(&self, indices: &[usize]) -> Option<&'a T> {
        let linear = linear_index(indices, &self.shape).ok()?;
        self.data.get(linear)
    }

    /// Get an element by column-major linear index.
    #[inline]
    pub fn get_linear(&self, i: usize) -> Option<&'a T> {
        self.data.get(i)
    }

    /// Iterate over elements in column-major order.
    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.data.iter()
    }

    /// Copy the viewed segment into an owned vector.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.to_vec()
    }
}

impl<T: PartialEq> PartialEq for ArrayView<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.data == other.data
    }
}

/// A mutable multi-dimensional view over a contiguous data segment.
#[derive(Debug)]
pub struct ArrayViewMut<'a, T> {
    data: &'a mut [T],
    shape: Dims,
}

impl<'a, T> ArrayViewMut<'a, T> {
    /// Create a mutable view of `data` under `shape`.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::ShapeMismatch` if the shape's total size differs
    /// from the data length.
    pub fn new(data: &'a mut [T], shape: &[usize]) -> Result<Self, ArrayError> {
        if total_size(shape) != data.len() {
            return Err(ArrayError::ShapeMismatch {
                expected: shape.to_vec(),
                actual: vec![data.len()],
            });
        }
        Ok(Self {
            data,
            shape: Dims::from_slice(shape),
        })
    }

    /// Create a one-dimensional mutable view of a slice.
    pub fn from_slice(data: &'a mut [T]) -> Self {
        let shape = smallvec![data.len()];
        Self { data, shape }
    }

    pub(crate) fn from_parts(data: &'a mut [T], shape: Dims) -> Self {
        Self { data, shape }
    }

    /// Shape of the view.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the view has zero elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The viewed data segment in column-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.data
    }

    /// The viewed data segment, mutable.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data
    }

    /// Reborrow as an immutable view.
    pub fn as_view(&self) -> ArrayView<'_, T> {
        ArrayView::from_parts(self.data, self.shape.clone())
    }

    /// Get an element by cartesian indices.
    pub fn get(&self, indices: &[usize]) -> Option<&T> {
        let linear = linear_index(indices, &self.shape).ok()?;
        self.data.get(linear)
    }

    /// Get a mutable element by cartesian indices.
    pub fn get_mut(&mut self, indices: &[usize]) -> Option<&mut T> {
        let linear = linear_index(indices, &self.shape).ok()?;
        self.data.get_mut(linear)
    }

    /// Set an element by cartesian indices.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::RankMismatch` or `ArrayError::IndexOutOfRange`
    /// for invalid indices.
    pub fn set(&mut self, indices: &[usize], value: T) -> Result<(), ArrayError> {
        let linear = linear_index(indices, &self.shape)?;
        self.data[linear] = value;
        Ok(())
    }

    /// Fill the segment with a value.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.data.fill(value);
    }

    /// Overwrite the segment from a source view of identical shape.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::ShapeMismatch` if the shapes differ.
    pub fn copy_from(&mut self, src: ArrayView<'_, T>) -> Result<(), ArrayError>
    where
        T: Clone,
    {
        if self.shape() != src.shape() {
            return Err(ArrayError::ShapeMismatch {
                expected: self.shape.to_vec(),
                actual: src.shape().to_vec(),
            });
        }
        self.data.clone_from_slice(src.as_slice());
        Ok(())
    }
}
