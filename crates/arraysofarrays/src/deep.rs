//! Recursive deep indexing and mapping across nested arrays.
//!
//! Following ArraysOfArrays.jl's `deepgetindex` / `deepsetindex!` / `deepmap`:
//! each layer of nesting consumes the index components it needs and hands the
//! rest to the layer below. Recursion is by type, so it terminates at the
//! first non-nested layer however many layers exist. Since `deep_get` returns
//! a borrow, it doubles as the aliasing `deepview` at scalar depth; the
//! engine types additionally provide `deep_view` for element-level views.

use smallvec::smallvec;

use crate::dims::{linear_index, Dims};
use crate::error::ArrayError;
use crate::similar_arrays::ArrayOfSimilarArrays;
use crate::vector_of_arrays::VectorOfArrays;

/// Index-based access through an arbitrary number of nesting layers.
///
/// `Scalar` is the innermost element type. Errors are propagated from the
/// layer that detects them: `RankMismatch` for a wrong index-tuple arity,
/// `IndexOutOfRange` for any offending component.
///
/// # Examples
///
/// ```
/// use arraysofarrays::DeepIndex;
///
/// let mut nested = vec![vec![1, 2], vec![3, 4, 5]];
/// assert_eq!(nested.deep_get(&[1, 2]).unwrap(), &5);
/// nested.deep_set(&[0, 0], 9).unwrap();
/// assert_eq!(nested[0][0], 9);
/// ```
pub trait DeepIndex {
    /// The innermost element type.
    type Scalar;

    /// Recursive read access. The index tuple must exactly cover all layers.
    fn deep_get(&self, idxs: &[usize]) -> Result<&Self::Scalar, ArrayError>;

    /// Recursive mutable access.
    fn deep_get_mut(&mut self, idxs: &[usize]) -> Result<&mut Self::Scalar, ArrayError>;

    /// Recursive assignment. Equivalent to writing through `deep_get_mut`.
    fn deep_set(&mut self, idxs: &[usize], value: Self::Scalar) -> Result<(), ArrayError> {
        *self.deep_get_mut(idxs)? = value;
        Ok(())
    }
}

/// Structure-preserving map over the innermost scalars of a nested array.
///
/// Follows ArraysOfArrays.jl's `deepmap`: `f` is applied to every
/// [`DeepIndex::Scalar`] however many nesting layers lie above it, and the
/// result carries the same structure over the mapped scalar type. Compare
/// `map_inner` on the engine types, which maps one layer deep only.
///
/// # Examples
///
/// ```
/// use arraysofarrays::{DeepMap, VectorOfVectors};
///
/// let nested = vec![
///     VectorOfVectors::from_vecs([vec![1, 2], vec![3]]),
///     VectorOfVectors::from_vecs([vec![4]]),
/// ];
/// let doubled = nested.deep_map(|&x| x * 2);
/// assert_eq!(doubled[0].flatview(), &[2, 4, 6]);
/// assert_eq!(doubled[1].get(0).unwrap().as_slice(), &[8]);
/// ```
pub trait DeepMap<U>: DeepIndex {
    /// The same nesting structure over `U`.
    type Output;

    /// Apply `f` to every innermost scalar.
    fn deep_map<F>(&self, mut f: F) -> Self::Output
    where
        Self: Sized,
        F: FnMut(&Self::Scalar) -> U,
    {
        self.deep_map_ref(&mut f)
    }

    /// Like [`Self::deep_map`], taking the closure by reference. The
    /// recursion seam; one closure is threaded through all layers.
    fn deep_map_ref(&self, f: &mut dyn FnMut(&Self::Scalar) -> U) -> Self::Output;
}

macro_rules! impl_deep_scalar {
    ($($t:ty),* $(,)?) => {$(
        impl DeepIndex for $t {
            type Scalar = $t;

            fn deep_get(&self, idxs: &[usize]) -> Result<&$t, ArrayError> {
                if !idxs.is_empty() {
                    return Err(ArrayError::RankMismatch {
                        expected: 0,
                        actual: idxs.len(),
                    });
                }
                Ok(self)
            }

            fn deep_get_mut(&mut self, idxs: &[usize]) -> Result<&mut $t, ArrayError> {
                if !idxs.is_empty() {
                    return Err(ArrayError::RankMismatch {
                        expected: 0,
                        actual: idxs.len(),
                    });
                }
                Ok(self)
            }
        }

        impl<U> DeepMap<U> for $t {
            type Output = U;

            fn deep_map_ref(&self, f: &mut dyn FnMut(&$t) -> U) -> U {
                f(self)
            }
        }
    )*};
}

impl_deep_scalar!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool, char
);

impl<A: DeepIndex> DeepIndex for [A] {
    type Scalar = A::Scalar;

    fn deep_get(&self, idxs: &[usize]) -> Result<&Self::Scalar, ArrayError> {
        let (&i, rest) = idxs.split_first().ok_or(ArrayError::RankMismatch {
            expected: 1,
            actual: 0,
        })?;
        let elem = self.get(i).ok_or(ArrayError::IndexOutOfRange {
            index: i,
            len: self.len(),
        })?;
        elem.deep_get(rest)
    }

    fn deep_get_mut(&mut self, idxs: &[usize]) -> Result<&mut Self::Scalar, ArrayError> {
        let (&i, rest) = idxs.split_first().ok_or(ArrayError::RankMismatch {
            expected: 1,
            actual: 0,
        })?;
        let len = self.len();
        let elem = self
            .get_mut(i)
            .ok_or(ArrayError::IndexOutOfRange { index: i, len })?;
        elem.deep_get_mut(rest)
    }
}

impl<U, A: DeepMap<U>> DeepMap<U> for [A] {
    type Output = Vec<A::Output>;

    fn deep_map_ref(&self, f: &mut dyn FnMut(&A::Scalar) -> U) -> Self::Output {
        self.iter().map(|a| a.deep_map_ref(&mut *f)).collect()
    }
}

impl<A: DeepIndex> DeepIndex for Vec<A> {
    type Scalar = A::Scalar;

    fn deep_get(&self, idxs: &[usize]) -> Result<&Self::Scalar, ArrayError> {
        self.as_slice().deep_get(idxs)
    }

    fn deep_get_mut(&mut self, idxs: &[usize]) -> Result<&mut Self::Scalar, ArrayError> {
        self.as_mut_slice().deep_get_mut(idxs)
    }
}

impl<U, A: DeepMap<U>> DeepMap<U> for Vec<A> {
    type Output = Vec<A::Output>;

    fn deep_map_ref(&self, f: &mut dyn FnMut(&A::Scalar) -> U) -> Self::Output {
        self.as_slice().deep_map_ref(f)
    }
}

impl<T: DeepIndex> DeepIndex for VectorOfArrays<T> {
    type Scalar = T::Scalar;

    fn deep_get(&self, idxs: &[usize]) -> Result<&Self::Scalar, ArrayError> {
        let (offset, deeper) = self.deep_offset(idxs)?;
        self.flatview()[offset].deep_get(deeper)
    }

    fn deep_get_mut(&mut self, idxs: &[usize]) -> Result<&mut Self::Scalar, ArrayError> {
        // The leftover index slice borrows `idxs`, not `self`.
        let (offset, deeper) = self.deep_offset(idxs)?;
        self.flatview_mut()[offset].deep_get_mut(deeper)
    }
}

impl<U, T: DeepMap<U>> DeepMap<U> for VectorOfArrays<T> {
    type Output = VectorOfArrays<T::Output>;

    fn deep_map_ref(&self, f: &mut dyn FnMut(&T::Scalar) -> U) -> Self::Output {
        self.map_inner(|t| t.deep_map_ref(&mut *f))
    }
}

impl<T> VectorOfArrays<T> {
    /// Resolve the outer index and the within-element indices of a deep
    /// index tuple into a flat-buffer offset; returns the leftover index
    /// components for the layer below.
    fn deep_offset<'i>(&self, idxs: &'i [usize]) -> Result<(usize, &'i [usize]), ArrayError> {
        let (&i, rest) = idxs.split_first().ok_or(ArrayError::RankMismatch {
            expected: 1 + self.elem_ndims(),
            actual: 0,
        })?;
        if i >= self.len() {
            return Err(ArrayError::IndexOutOfRange {
                index: i,
                len: self.len(),
            });
        }
        if rest.len() < self.elem_ndims() {
            return Err(ArrayError::RankMismatch {
                expected: self.elem_ndims(),
                actual: rest.len(),
            });
        }
        let (within, deeper) = rest.split_at(self.elem_ndims());
        let shape: Dims = match self.kernel_sizes() {
            Some(kernel) => kernel[i].clone(),
            None => smallvec![self.internal_element_ptr()[i + 1] - self.internal_element_ptr()[i]],
        };
        let linear = linear_index(within, &shape)?;
        Ok((self.internal_element_ptr()[i] + linear, deeper))
    }
}

impl<T: DeepIndex> DeepIndex for ArrayOfSimilarArrays<T> {
    type Scalar = T::Scalar;

    fn deep_get(&self, idxs: &[usize]) -> Result<&Self::Scalar, ArrayError> {
        let (offset, deeper) = self.deep_offset(idxs)?;
        self.flatview()[offset].deep_get(deeper)
    }

    fn deep_get_mut(&mut self, idxs: &[usize]) -> Result<&mut Self::Scalar, ArrayError> {
        let (offset, deeper) = self.deep_offset(idxs)?;
        self.flatview_mut()[offset].deep_get_mut(deeper)
    }
}

impl<U, T: DeepMap<U>> DeepMap<U> for ArrayOfSimilarArrays<T> {
    type Output = ArrayOfSimilarArrays<T::Output>;

    fn deep_map_ref(&self, f: &mut dyn FnMut(&T::Scalar) -> U) -> Self::Output {
        self.map_inner(|t| t.deep_map_ref(&mut *f))
    }
}

impl<T> ArrayOfSimilarArrays<T> {
    fn deep_offset<'i>(&self, idxs: &'i [usize]) -> Result<(usize, &'i [usize]), ArrayError> {
        let outer_rank = self.outer_size().len();
        let inner_rank = self.innersize().len();
        if idxs.len() < outer_rank + inner_rank {
            return Err(ArrayError::RankMismatch {
                expected: outer_rank + inner_rank,
                actual: idxs.len(),
            });
        }
        let (outer, rest) = idxs.split_at(outer_rank);
        let (inner, deeper) = rest.split_at(inner_rank);
        let o = linear_index(outer, self.outer_size())?;
        let linear = linear_index(inner, self.innersize())?;
        Ok((o * self.inner_len() + linear, deeper))
    }
}
