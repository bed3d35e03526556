//! Tests for consecutive-key grouping and deep indexing.
//!
//! These tests mirror ArraysOfArrays.jl's test_functions.jl, covering
//! `consgrouped_ptrs` / `consgroupedview` and `deepgetindex`-style access.

use rand::Rng;

use arraysofarrays::{
    consgrouped_ptrs, consgroupedview, ArrayError, ArrayOfSimilarArrays, DeepIndex, DeepMap,
    VectorOfVectors,
};

/// The worked example: keys [1, 1, 2, 3, 3, 2, 2, 2] group a payload into
/// [[1, 2], [3], [4, 5], [6, 7, 8]].
#[test]
fn test_grouping_example() {
    let keys = [1, 1, 2, 3, 3, 2, 2, 2];
    let grouped = consgroupedview(&keys, (1..=8).collect::<Vec<i32>>()).unwrap();

    assert_eq!(grouped.len(), 4);
    assert_eq!(grouped.get(0).unwrap().as_slice(), &[1, 2]);
    assert_eq!(grouped.get(1).unwrap().as_slice(), &[3]);
    assert_eq!(grouped.get(2).unwrap().as_slice(), &[4, 5]);
    assert_eq!(grouped.get(3).unwrap().as_slice(), &[6, 7, 8]);
}

/// Pointer tables reconstruct the run structure of any key vector: segment
/// boundaries fall exactly where adjacent keys differ.
#[test]
fn test_grouping_ptrs_random_keys() {
    let mut rng = rand::thread_rng();
    let keys: Vec<u8> = (0..500).map(|_| rng.gen_range(0..4)).collect();
    let ptrs = consgrouped_ptrs(&keys);

    assert_eq!(ptrs[0], 0);
    assert_eq!(*ptrs.last().unwrap(), keys.len());
    for w in ptrs.windows(2) {
        // Within a run all keys are equal...
        let run = &keys[w[0]..w[1]];
        assert!(run.iter().all(|k| k == &run[0]));
        // ...and each run is maximal.
        if w[0] > 0 {
            assert_ne!(keys[w[0] - 1], keys[w[0]]);
        }
    }
}

/// Applying one grouping to a tuple shares the pointer table across all
/// members.
#[test]
fn test_grouping_tuple_targets() {
    let keys = ["a", "a", "b", "c", "c"];
    let xs = vec![1, 2, 3, 4, 5];
    let ys = vec![0.1, 0.2, 0.3, 0.4, 0.5];
    let zs = vec!["p", "q", "r", "s", "t"];

    let (gx, gy, gz) = consgroupedview(&keys, (xs, ys, zs)).unwrap();
    assert_eq!(gx.internal_element_ptr(), gy.internal_element_ptr());
    assert_eq!(gy.internal_element_ptr(), gz.internal_element_ptr());
    assert_eq!(gx.get(2).unwrap().as_slice(), &[4, 5]);
    assert_eq!(gz.get(0).unwrap().as_slice(), &["p", "q"]);
}

/// A tuple member of the wrong length fails; the error reports both lengths.
#[test]
fn test_grouping_rejects_length_mismatch() {
    let keys = [1, 1, 2];
    let err = consgroupedview(&keys, (vec![1, 2, 3], vec![9])).unwrap_err();
    assert!(matches!(
        err,
        ArrayError::LengthMismatch {
            expected: 3,
            actual: 1
        }
    ));
}

/// Deep indexing walks a heterogeneous nesting: a plain vector of ragged
/// vectors needs three index components.
#[test]
fn test_deep_get_through_mixed_layers() {
    let nested = vec![
        VectorOfVectors::from_vecs([vec![10, 20], vec![30]]),
        VectorOfVectors::from_vecs([vec![40, 50, 60]]),
    ];
    assert_eq!(nested.deep_get(&[0, 1, 0]).unwrap(), &30);
    assert_eq!(nested.deep_get(&[1, 0, 2]).unwrap(), &60);
    assert!(matches!(
        nested.deep_get(&[0, 1]),
        Err(ArrayError::RankMismatch { .. })
    ));
    assert!(matches!(
        nested.deep_get(&[0, 2, 0]),
        Err(ArrayError::IndexOutOfRange { index: 2, len: 2 })
    ));
}

/// Deep set followed by deep get round-trips, and the write is visible in
/// the flat buffer at the expected column-major offset.
#[test]
fn test_deep_set_roundtrip() {
    let mut a =
        ArrayOfSimilarArrays::from_flat(vec![0i64; 24], &[2, 3, 4], 2).unwrap();
    a.deep_set(&[2, 1, 1], 77).unwrap();
    assert_eq!(a.deep_get(&[2, 1, 1]).unwrap(), &77);
    // Element 2 starts at 12; inner [1, 1] is linear 1 + 2*1 = 3.
    assert_eq!(a.flatview()[15], 77);
}

/// `deep_map` reaches the innermost scalars through every nesting layer and
/// preserves the structure of each: a plain vector of ragged vectors maps to
/// the same shape over the new scalar type.
#[test]
fn test_deep_map_through_mixed_layers() {
    let nested = vec![
        VectorOfVectors::from_vecs([vec![10, 20], vec![30]]),
        VectorOfVectors::from_vecs([vec![40, 50, 60]]),
    ];
    let halved = nested.deep_map(|&x| f64::from(x) / 2.0);
    assert_eq!(halved.len(), 2);
    assert_eq!(
        halved[0].internal_element_ptr(),
        nested[0].internal_element_ptr()
    );
    assert_eq!(halved[0].get(0).unwrap().as_slice(), &[5.0, 10.0]);
    assert_eq!(halved[0].get(1).unwrap().as_slice(), &[15.0]);
    assert_eq!(halved[1].get(0).unwrap().as_slice(), &[20.0, 25.0, 30.0]);
}

/// One layer of nesting is the `map_inner` case: `deep_map` agrees with it.
#[test]
fn test_deep_map_single_layer_matches_map_inner() {
    let v = VectorOfVectors::from_vecs([vec![1, 2], vec![3]]);
    assert_eq!(v.deep_map(|&x| x * 10), v.map_inner(|&x| x * 10));
}

/// A grouped view is itself deep-indexable: group, then address a payload
/// scalar with two components.
#[test]
fn test_deep_on_grouped_view() {
    let keys = [0, 0, 1, 1, 1];
    let grouped = consgroupedview(&keys, vec![5, 6, 7, 8, 9]).unwrap();
    assert_eq!(grouped.deep_get(&[1, 2]).unwrap(), &9);
}

/// Index errors name the offending component wherever it occurs in the
/// tuple.
#[test]
fn test_deep_error_reporting() {
    let v = VectorOfVectors::from_vecs([vec![1, 2, 3]]);
    assert!(matches!(
        v.deep_get(&[1, 0]),
        Err(ArrayError::IndexOutOfRange { index: 1, len: 1 })
    ));
    assert!(matches!(
        v.deep_get(&[0, 3]),
        Err(ArrayError::IndexOutOfRange { index: 3, len: 3 })
    ));
    assert!(matches!(
        v.deep_get(&[]),
        Err(ArrayError::RankMismatch { .. })
    ));
}
