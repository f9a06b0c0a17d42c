//! Every precondition violation surfaces a distinguishable error kind

use smolar_array::ops::{add, dot, matmul};
use smolar_array::{api, Array, ArrayConfig, ArrayError, ErrorKind, Shape};

fn arange_2x3() -> Array {
    Array::arange(0.0, 6.0, 1.0).unwrap().reshape_new([2, 3]).unwrap()
}

#[test]
fn test_invalid_shape() {
    let err = api::create(&[3, -1]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidShape);
    assert_eq!(err.code(), "SHAPE_NEGATIVE_EXTENT");
    assert!(err.is_shape_error());
    assert!(Shape::from_signed(&[-5]).is_err());
}

#[test]
fn test_size_mismatch() {
    let a = arange_2x3();
    let err = a.reshape_new([4, 2]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SizeMismatch);
    assert_eq!(err.code(), "RESHAPE_SIZE_MISMATCH");

    let mut b = Array::zeros([3]).unwrap();
    let err = b.fill_from_values(&[1.0, 2.0]).unwrap_err();
    assert!(matches!(err, ArrayError::SizeMismatch { expected: 3, actual: 2, .. }));
}

#[test]
fn test_incompatible_shapes() {
    let err = add(&Array::zeros([2, 3]).unwrap(), &Array::zeros([4, 5]).unwrap()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IncompatibleShapes);
    assert_eq!(err.code(), "BINARY_BROADCAST_INCOMPATIBLE");

    let err = matmul(&Array::zeros([2, 3]).unwrap(), &Array::zeros([2, 3]).unwrap()).unwrap_err();
    assert_eq!(err.code(), "MATMUL_INNER_DIM_MISMATCH");
}

#[test]
fn test_invalid_permutation() {
    let a = arange_2x3();
    for axes in [&[0usize][..], &[1, 1][..], &[0, 2][..], &[0, 1, 2][..]] {
        assert_eq!(a.transpose_new(axes).unwrap_err().kind(), ErrorKind::InvalidPermutation);
    }
}

#[test]
fn test_axis_out_of_range() {
    let a = arange_2x3();
    let err = a.expand_dims(5).unwrap_err();
    assert!(matches!(err, ArrayError::AxisOutOfRange { axis: 5, ndim: 2, .. }));
    assert_eq!(a.squeeze(2).unwrap_err().kind(), ErrorKind::AxisOutOfRange);
    assert_eq!(api::squeeze(&a, -3).unwrap_err().kind(), ErrorKind::AxisOutOfRange);
}

#[test]
fn test_cannot_squeeze() {
    let err = arange_2x3().squeeze(1).unwrap_err();
    assert!(matches!(err, ArrayError::CannotSqueeze { axis: 1, extent: 3, .. }));
}

#[test]
fn test_rank_mismatch() {
    let m = arange_2x3();
    let v = Array::zeros([3]).unwrap();
    assert_eq!(dot(&m, &v).unwrap_err().kind(), ErrorKind::RankMismatch);
    assert_eq!(matmul(&v, &m).unwrap_err().kind(), ErrorKind::RankMismatch);
}

#[test]
fn test_invalid_range() {
    let err = Array::arange(0.0, 10.0, 0.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRange);
    assert_eq!(Array::arange(0.0, f32::NAN, 1.0).unwrap_err().kind(), ErrorKind::InvalidRange);
    assert!(!err.is_shape_error());
}

#[test]
fn test_allocation_failure() {
    let err = Array::zeros([usize::MAX, 4]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AllocationFailure);

    let config = ArrayConfig::default().with_max_elements(100);
    let err = Array::random_with([20, 20], &config).unwrap_err();
    assert_eq!(err.code(), "ALLOC_EXCEEDS_LIMIT");
}

#[test]
fn test_non_contiguous_inplace_reshape() {
    let mut t = arange_2x3().transpose_new(&[1, 0]).unwrap();
    let err = t.reshape_inplace([6]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NonContiguous);
    // the failed call leaves the view untouched
    assert_eq!(t.shape().dims(), &[3, 2]);
}

#[test]
fn test_error_messages_carry_context() {
    let err = arange_2x3().reshape_new([7]).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("RESHAPE_SIZE_MISMATCH"));
    assert!(message.contains("Suggestion"));
}
