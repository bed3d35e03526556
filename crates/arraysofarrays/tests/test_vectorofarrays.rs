//! Tests for VectorOfArrays.
//!
//! These tests mirror ArraysOfArrays.jl's test_vectorofarrays.jl, covering:
//! - Construction (empty, bulk, raw-table adoption)
//! - Element pointer table maintenance under push/pop/resize
//! - Consistency checking policies
//! - Flat/nested view aliasing

use approx::assert_relative_eq;
use rand::Rng;
use smallvec::smallvec;

use arraysofarrays::{
    ArrayError, ArrayView, ConsistencyChecks, Dims, VectorOfArrays, VectorOfVectors,
};

/// After any sequence of pushes, `elem_ptr` has `len + 1` entries and its
/// last entry equals the flat length.
#[test]
fn test_pointer_invariant_random_pushes() {
    let mut rng = rand::thread_rng();
    let mut v: VectorOfVectors<u32> = VectorOfVectors::default();
    let mut total = 0usize;
    for _ in 0..200 {
        let len = rng.gen_range(0..8);
        let elem: Vec<u32> = (0..len as u32).collect();
        v.push_slice(&elem).unwrap();
        total += len;
    }
    assert_eq!(v.len(), 200);
    assert_eq!(v.internal_element_ptr().len(), v.len() + 1);
    assert_eq!(*v.internal_element_ptr().last().unwrap(), v.flat_len());
    assert_eq!(v.flat_len(), total);
}

/// Round-trip: an element read back right after push compares equal.
#[test]
fn test_push_get_roundtrip() {
    let mut v: VectorOfVectors<i64> = VectorOfVectors::default();
    let elems = [vec![5, 4, 3], vec![], vec![7]];
    for e in &elems {
        v.push_slice(e).unwrap();
    }
    for (i, e) in elems.iter().enumerate() {
        assert_eq!(v.get(i).unwrap().as_slice(), e.as_slice());
    }
}

/// A structure built via bulk conversion passes all three checking policies.
#[test]
fn test_from_arrays_passes_all_policies() {
    let a = [1.0, 2.0, 3.0, 4.0];
    let b = [5.0, 6.0];
    let v = VectorOfArrays::from_arrays([
        ArrayView::new(&a, &[2, 2]).unwrap(),
        ArrayView::new(&b, &[2, 1]).unwrap(),
    ])
    .unwrap();

    let kernel = v.kernel_sizes().unwrap().to_vec();
    for checks in [
        ConsistencyChecks::None,
        ConsistencyChecks::Simple,
        ConsistencyChecks::Full,
    ] {
        let adopted = VectorOfArrays::from_raw_nd(
            2,
            v.flatview().to_vec(),
            v.element_ptr(),
            kernel.clone(),
            checks,
        )
        .unwrap();
        assert_eq!(adopted, v);
    }
}

/// Inconsistent element dimensionality fails bulk construction.
#[test]
fn test_from_arrays_dimension_mismatch() {
    let a = [1, 2, 3, 4];
    let b = [5, 6];
    let result = VectorOfArrays::from_arrays([
        ArrayView::new(&a, &[2, 2]).unwrap(),
        ArrayView::from_slice(&b),
    ]);
    assert!(matches!(
        result,
        Err(ArrayError::DimensionMismatch {
            expected: 2,
            actual: 1
        })
    ));
}

/// A non-monotonic pointer table fails full checking and is accepted
/// (incorrectly, by design) under the `None` policy.
#[test]
fn test_from_raw_checking_policies() {
    let bad_ptr = vec![0, 4, 2, 5];
    let data = vec![1, 2, 3, 4, 5];

    let err = VectorOfVectors::from_raw(data.clone(), bad_ptr.clone(), ConsistencyChecks::Full)
        .unwrap_err();
    assert!(matches!(err, ArrayError::InvalidStructure { .. }));

    assert!(
        VectorOfVectors::from_raw(data.clone(), bad_ptr.clone(), ConsistencyChecks::Simple)
            .is_err()
    );
    assert!(VectorOfVectors::from_raw(data, bad_ptr, ConsistencyChecks::None).is_ok());
}

/// A kernel-size table whose products mismatch the segment lengths fails
/// full checking but passes simple checking.
#[test]
fn test_from_raw_nd_kernel_product_check() {
    let data = vec![0.0; 6];
    let elem_ptr = vec![0, 4, 6];
    let bad_kernel: Vec<Dims> = vec![smallvec![2, 2], smallvec![3, 1]];

    let err = VectorOfArrays::from_raw_nd(
        2,
        data.clone(),
        elem_ptr.clone(),
        bad_kernel.clone(),
        ConsistencyChecks::Full,
    )
    .unwrap_err();
    assert!(matches!(err, ArrayError::InvalidStructure { .. }));

    assert!(
        VectorOfArrays::from_raw_nd(2, data, elem_ptr, bad_kernel, ConsistencyChecks::Simple)
            .is_ok()
    );
}

/// `resize(k)` keeps the first `k` elements intact and rejects growth.
#[test]
fn test_resize_keeps_prefix() {
    let elems = [vec![1, 2], vec![3], vec![4, 5, 6], vec![7]];
    let mut v = VectorOfVectors::from_vecs(elems.clone());
    let original = v.clone();

    v.resize(2).unwrap();
    assert_eq!(v.len(), 2);
    for i in 0..2 {
        assert_eq!(v.get(i).unwrap(), original.get(i).unwrap());
    }

    assert!(matches!(
        v.resize(3),
        Err(ArrayError::GrowthNotSupported {
            len: 2,
            requested: 3
        })
    ));
    // Failed resize leaves the vector unchanged.
    assert_eq!(v.len(), 2);
    assert_eq!(v.flatview(), &[1, 2, 3]);
}

/// Mutation through an element view is observable via the flat view at the
/// corresponding offset range, and vice versa.
#[test]
fn test_view_aliasing() {
    let mut v = VectorOfVectors::from_vecs([vec![1, 2], vec![3, 4, 5]]);

    v.get_mut(1).unwrap().set(&[0], 30).unwrap();
    assert_eq!(v.flatview(), &[1, 2, 30, 4, 5]);

    v.flatview_mut()[0] = 10;
    assert_eq!(v.get(0).unwrap().as_slice(), &[10, 2]);
}

/// `set` overwrites in place and rejects any shape change.
#[test]
fn test_set_in_place() {
    let a = [1, 2, 3, 4, 5, 6];
    let mut v: VectorOfArrays<i32> = VectorOfArrays::new(2);
    v.push(ArrayView::new(&a, &[2, 3]).unwrap()).unwrap();

    let replacement = [9, 9, 9, 9, 9, 9];
    v.set(0, ArrayView::new(&replacement, &[2, 3]).unwrap())
        .unwrap();
    assert_eq!(v.flatview(), &replacement);

    // Same element count, different shape: rejected.
    let err = v
        .set(0, ArrayView::new(&replacement, &[3, 2]).unwrap())
        .unwrap_err();
    assert!(matches!(err, ArrayError::ShapeMismatch { .. }));

    let err = v.set(1, ArrayView::new(&replacement, &[2, 3]).unwrap()).unwrap_err();
    assert!(matches!(err, ArrayError::IndexOutOfRange { index: 1, len: 1 }));
}

/// `reserve` pre-grows capacity without changing logical content.
#[test]
fn test_reserve_is_pure_hint() {
    let mut v = VectorOfVectors::from_vecs([vec![1.5, 2.5]]);
    let before = v.clone();
    v.reserve(1000, &[4]);
    assert_eq!(v, before);
}

/// `iter` yields every element view in order.
#[test]
fn test_iter() {
    let v = VectorOfVectors::from_vecs([vec![1], vec![2, 3], vec![]]);
    let collected: Vec<Vec<i32>> = v.iter().map(|view| view.to_vec()).collect();
    assert_eq!(collected, vec![vec![1], vec![2, 3], vec![]]);
    assert_eq!(v.iter().len(), 3);
}

/// `iter_mut` hands out disjoint views usable simultaneously.
#[test]
fn test_iter_mut_writes_land_in_flatview() {
    let mut v = VectorOfVectors::from_vecs([vec![1, 2], vec![3]]);
    for (k, mut view) in v.iter_mut().enumerate() {
        for x in view.as_mut_slice() {
            *x += 10 * (k as i32 + 1);
        }
    }
    assert_eq!(v.flatview(), &[11, 12, 23]);
}

/// `map_inner` transforms the payload but preserves the ragged structure.
#[test]
fn test_map_inner() {
    let v = VectorOfVectors::from_vecs([vec![1.0, 2.0], vec![3.0]]);
    let halved = v.map_inner(|&x| x * 0.5);
    assert_eq!(halved.internal_element_ptr(), v.internal_element_ptr());
    for (a, b) in halved.flatview().iter().zip(v.flatview()) {
        assert_relative_eq!(*a, b * 0.5);
    }
}

/// `pop` removes exactly the last pushed element.
#[test]
fn test_pop_after_push() {
    let mut v: VectorOfArrays<u8> = VectorOfArrays::new(2);
    let a = [1, 2, 3, 4];
    let b = [5, 6];
    v.push(ArrayView::new(&a, &[2, 2]).unwrap()).unwrap();
    v.push(ArrayView::new(&b, &[1, 2]).unwrap()).unwrap();

    assert_eq!(v.pop(), Some(vec![5, 6]));
    assert_eq!(v.len(), 1);
    assert_eq!(v.kernel_sizes().unwrap().len(), 1);
    assert_eq!(v.flatview(), &[1, 2, 3, 4]);
}
