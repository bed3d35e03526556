//! arraysofarrays - Rust port of ArraysOfArrays.jl
//!
//! This crate provides efficient storage and handling of nested
//! (array-of-arrays) data without per-element heap allocation, designed to be
//! compatible with ArraysOfArrays.jl's data model.
//!
//! # Architecture
//!
//! Two storage engines share one idea, a flat and a nested view over the same
//! contiguous buffer:
//!
//! ```text
//! ArrayOfSimilarArrays<T>   - fixed-shape duality: flat (M+N)-dimensional
//!                             buffer <-> N-dimensional array of M-dimensional
//!                             arrays, all elements one shape
//! VectorOfArrays<T>         - ragged engine: flat buffer + element-pointer
//!                             table (+ kernel-size table for inner
//!                             dimensionality >= 2), element sizes may differ
//! ```
//!
//! Supporting utilities:
//!
//! - [`ConsistencyChecks`] - pluggable validation policy for adopting
//!   caller-built tables (`None` / `Simple` / `Full`)
//! - [`consgrouped_ptrs`] / [`consgroupedview`] - group equal consecutive
//!   entries of a key vector and apply the grouping to data vectors without
//!   copying
//! - [`DeepIndex`] / [`DeepMap`] - recursive index access and
//!   structure-preserving mapping across nesting layers
//!
//! # Example
//!
//! ```
//! use arraysofarrays::VectorOfVectors;
//!
//! let mut v: VectorOfVectors<f64> = VectorOfVectors::default();
//! v.push_slice(&[1.0, 2.0, 3.0]).unwrap();
//! v.push_slice(&[4.0]).unwrap();
//!
//! // Nested view...
//! assert_eq!(v.len(), 2);
//! assert_eq!(v.get(0).unwrap().as_slice(), &[1.0, 2.0, 3.0]);
//!
//! // ...and flat view over the same memory.
//! assert_eq!(v.flatview(), &[1.0, 2.0, 3.0, 4.0]);
//! v.flatview_mut()[3] = 8.0;
//! assert_eq!(v.get(1).unwrap().as_slice(), &[8.0]);
//! ```

pub mod checks;
pub mod deep;
pub mod dims;
pub mod error;
pub mod grouping;
pub mod similar_arrays;
pub mod vector_of_arrays;
pub mod view;

pub use checks::ConsistencyChecks;
pub use deep::{DeepIndex, DeepMap};
pub use dims::Dims;
pub use error::ArrayError;
pub use grouping::{consgrouped_ptrs, consgroupedview, GroupTarget};
pub use similar_arrays::{ArrayOfSimilarArrays, VectorOfSimilarArrays};
pub use vector_of_arrays::{VectorOfArrays, VectorOfVectors};
pub use view::{ArrayView, ArrayViewMut};
