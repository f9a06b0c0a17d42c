//! Flat function surface for foreign bindings
//!
//! Mirrors the [`Array`] methods with signed integer extents and axes, the
//! way a host language hands them over. Negative extents are rejected;
//! negative axes count from the end.

use crate::array::Array;
use crate::error::{ArrayError, Result};
use crate::ops;
use crate::shape::Shape;
use crate::validation::ArrayValidator;

fn to_signed(dims: &[usize]) -> Vec<i64> {
    dims.iter().map(|&d| d as i64).collect()
}

/// Zero-filled C-order array
pub fn create(shape: &[i64]) -> Result<Array> {
    Array::zeros(Shape::from_signed(shape)?)
}

/// Uniform `[0, 1)` samples
pub fn random(shape: &[i64]) -> Result<Array> {
    Array::random(Shape::from_signed(shape)?)
}

/// See [`Array::arange`]
pub fn arange(start: f32, stop: f32, step: f32) -> Result<Array> {
    Array::arange(start, stop, step)
}

/// Overwrites `array` with `values` in logical order
pub fn from_values(array: &mut Array, values: &[f32]) -> Result<()> {
    array.fill_from_values(values)
}

/// Prints shape, strides and order flags
pub fn print_info(array: &Array) {
    array.print_info();
}

/// Prints the elements
pub fn show(array: &Array) {
    print!("{}", array);
}

/// Exact shape equality
pub fn check_shapes_equal(a: &Array, b: &Array) -> bool {
    a.shapes_equal(b)
}

/// Extents of `array`
pub fn shape(array: &Array) -> Vec<i64> {
    to_signed(array.shape().dims())
}

/// Logical-order elements and the shape needed to rebuild them
pub fn export(array: &Array) -> (Vec<f32>, Vec<i64>) {
    let (data, dims) = array.export();
    (data, to_signed(&dims))
}

/// See [`Array::reshape_new`]
pub fn reshape_new(array: &Array, shape: &[i64]) -> Result<Array> {
    array.reshape_new(Shape::from_signed(shape)?)
}

/// See [`Array::reshape_inplace`]
pub fn reshape_inplace(array: &mut Array, shape: &[i64]) -> Result<()> {
    array.reshape_inplace(Shape::from_signed(shape)?)
}

/// Axis permutation; `-1` names the last axis
pub fn transpose_new(array: &Array, axes: &[i64]) -> Result<Array> {
    let ndim = array.ndim() as i64;
    let resolved = axes
        .iter()
        .map(|&axis| {
            let r = if axis < 0 { axis + ndim } else { axis };
            usize::try_from(r).map_err(|_| {
                ArrayError::invalid_permutation(
                    "TRANSPOSE_AXIS_OUT_OF_BOUNDS",
                    format!("Transpose axis {} is out of bounds", axis),
                    format!("{:?}", axes),
                    array.ndim(),
                    format!("Use axis values between -{} and {}", ndim, ndim - 1),
                )
            })
        })
        .collect::<Result<Vec<_>>>()?;
    array.transpose_new(&resolved)
}

/// Inserts a unit axis; `-1` appends after the last axis
pub fn expand_dims(array: &Array, axis: i64) -> Result<Array> {
    let ndim = array.ndim();
    // insertion positions span 0..=ndim
    let axis = ArrayValidator::normalize_axis(axis, ndim + 1, ndim, "expand_dims")?;
    array.expand_dims(axis)
}

/// Removes a unit axis; `-1` names the last axis
pub fn squeeze(array: &Array, axis: i64) -> Result<Array> {
    let ndim = array.ndim();
    let axis = ArrayValidator::normalize_axis(axis, ndim, ndim, "squeeze")?;
    array.squeeze(axis)
}

/// See [`ops::add`]
pub fn add(a: &Array, b: &Array) -> Result<Array> {
    ops::add(a, b)
}

/// See [`ops::multiply`]
pub fn multiply(a: &Array, b: &Array) -> Result<Array> {
    ops::multiply(a, b)
}

/// See [`ops::dot`]
pub fn dot(a: &Array, b: &Array) -> Result<Array> {
    ops::dot(a, b)
}

/// See [`ops::matmul`]
pub fn matmul(a: &Array, b: &Array) -> Result<Array> {
    ops::matmul(a, b)
}

/// In-place element-wise application of a caller-supplied function
pub fn apply_inplace(array: &mut Array, f: &dyn Fn(f32) -> f32) {
    array.apply_inplace(f)
}

/// Copying element-wise application of a caller-supplied function
pub fn apply(array: &Array, f: &dyn Fn(f32) -> f32) -> Result<Array> {
    array.apply(f)
}

/// Releases a handle; see [`Array::release`]
pub fn release(array: Array) {
    array.release()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_negative_extent() {
        assert_eq!(create(&[2, -3]).unwrap_err().kind(), ErrorKind::InvalidShape);
        assert_eq!(reshape_new(&create(&[4]).unwrap(), &[-2, -2]).unwrap_err().kind(), ErrorKind::InvalidShape);
    }

    #[test]
    fn test_negative_axes() {
        let a = create(&[2, 3]).unwrap();
        assert_eq!(shape(&expand_dims(&a, -1).unwrap()), vec![2, 3, 1]);
        assert_eq!(shape(&expand_dims(&a, -3).unwrap()), vec![1, 2, 3]);
        assert!(expand_dims(&a, -4).is_err());

        let b = create(&[2, 1]).unwrap();
        assert_eq!(shape(&squeeze(&b, -1).unwrap()), vec![2]);

        assert_eq!(shape(&transpose_new(&a, &[-1, 0]).unwrap()), vec![3, 2]);
        assert_eq!(
            transpose_new(&a, &[-3, 0]).unwrap_err().kind(),
            ErrorKind::InvalidPermutation
        );
    }

    #[test]
    fn test_apply_trait_object() {
        let mut a = arange(0.0, 3.0, 1.0).unwrap();
        let offset = 2.0;
        let f = move |x: f32| x + offset;
        apply_inplace(&mut a, &f);
        assert_eq!(export(&a), (vec![2.0, 3.0, 4.0], vec![3]));
        let b = apply(&a, &|x| x * 2.0).unwrap();
        assert_eq!(b.to_vec(), vec![4.0, 6.0, 8.0]);
        release(b);
        release(a);
    }
}
