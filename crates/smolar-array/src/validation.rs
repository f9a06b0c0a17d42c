//! Precondition checks shared by view and compute operations
//!
//! Every check here returns the distinguishable [`ArrayError`] kind for the
//! violation it detects, so callers never build a malformed array.

use crate::error::{ArrayError, Result};
use crate::shape::Shape;

/// Resolved operand geometry for a batched matrix product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatmulDims {
    /// Broadcast batch axes
    pub batch: Shape,
    /// Rows of the left operand
    pub m: usize,
    /// Shared inner dimension
    pub k: usize,
    /// Columns of the right operand
    pub n: usize,
}

impl MatmulDims {
    /// Shape of the product: batch axes followed by `(m, n)`
    pub fn output_shape(&self) -> Shape {
        let mut dims = self.batch.dims().to_vec();
        dims.push(self.m);
        dims.push(self.n);
        Shape::new(dims)
    }
}

/// Array validation utilities
pub struct ArrayValidator;

impl ArrayValidator {
    /// Validate that a flat value list fills an array exactly
    pub fn validate_value_count(expected: usize, actual: usize, operation: &str) -> Result<()> {
        if expected != actual {
            return Err(ArrayError::size_mismatch(
                "VALUES_SIZE_MISMATCH",
                format!("Got {} values for an array of {} elements", actual, expected),
                expected,
                actual,
                operation,
                "Supply exactly one value per element",
            ));
        }
        Ok(())
    }

    /// Validate reshape operation
    pub fn validate_reshape(input_shape: &Shape, target_shape: &Shape) -> Result<()> {
        let input_numel = input_shape.numel();
        let target_numel = target_shape
            .checked_numel()
            .ok_or_else(|| {
                ArrayError::invalid_shape(
                    "RESHAPE_TARGET_OVERFLOW",
                    "Element count of the target shape overflows",
                    target_shape.to_string(),
                    "reshape operation",
                    "Use smaller extents",
                )
            })?;

        if input_numel != target_numel {
            return Err(ArrayError::size_mismatch(
                "RESHAPE_SIZE_MISMATCH",
                format!(
                    "Cannot reshape {} into {}: element counts differ",
                    input_shape, target_shape
                ),
                input_numel,
                target_numel,
                "reshape operation",
                "Ensure the product of target dimensions equals the original size",
            ));
        }
        Ok(())
    }

    /// Validate that `axes` is a permutation of `0..ndim`
    pub fn validate_permutation(ndim: usize, axes: &[usize]) -> Result<()> {
        if axes.len() != ndim {
            return Err(ArrayError::invalid_permutation(
                "TRANSPOSE_AXES_LENGTH_MISMATCH",
                format!("Array has {} dimensions but {} axes provided", ndim, axes.len()),
                format!("{:?}", axes),
                ndim,
                format!("Provide exactly {} axes", ndim),
            ));
        }

        let mut seen = vec![false; ndim];
        for &axis in axes {
            if axis >= ndim {
                return Err(ArrayError::invalid_permutation(
                    "TRANSPOSE_AXIS_OUT_OF_BOUNDS",
                    format!("Transpose axis {} is out of bounds", axis),
                    format!("{:?}", axes),
                    ndim,
                    format!("Use axis values between 0 and {}", ndim.saturating_sub(1)),
                ));
            }
            if seen[axis] {
                return Err(ArrayError::invalid_permutation(
                    "TRANSPOSE_DUPLICATE_AXES",
                    format!("Axis {} appears more than once", axis),
                    format!("{:?}", axes),
                    ndim,
                    "Each axis should appear exactly once",
                ));
            }
            seen[axis] = true;
        }
        Ok(())
    }

    /// Validate an existing axis (`0..ndim`)
    pub fn validate_axis(ndim: usize, axis: usize, operation: &str) -> Result<()> {
        if axis >= ndim {
            return Err(ArrayError::axis_out_of_range(
                "AXIS_OUT_OF_RANGE",
                format!("Axis {} does not exist in an array of rank {}", axis, ndim),
                axis as i64,
                ndim,
                operation,
                format!("Use an axis between 0 and {}", ndim as i64 - 1),
            ));
        }
        Ok(())
    }

    /// Validate an insertion position (`0..=ndim`)
    pub fn validate_insert_axis(ndim: usize, axis: usize, operation: &str) -> Result<()> {
        if axis > ndim {
            return Err(ArrayError::axis_out_of_range(
                "INSERT_AXIS_OUT_OF_RANGE",
                format!("Cannot insert an axis at {} in an array of rank {}", axis, ndim),
                axis as i64,
                ndim,
                operation,
                format!("Use a position between 0 and {}", ndim),
            ));
        }
        Ok(())
    }

    /// Resolve a possibly negative axis against `bound` (exclusive upper limit).
    ///
    /// Negative values count from the end: `-1` maps to `bound - 1`.
    pub fn normalize_axis(axis: i64, bound: usize, ndim: usize, operation: &str) -> Result<usize> {
        let resolved = if axis < 0 { axis + bound as i64 } else { axis };
        if resolved < 0 || resolved >= bound as i64 {
            return Err(ArrayError::axis_out_of_range(
                "AXIS_OUT_OF_RANGE",
                format!("Axis {} is out of range for {}", axis, operation),
                axis,
                ndim,
                operation,
                format!("Use an axis in -{}..{}", bound, bound),
            ));
        }
        Ok(resolved as usize)
    }

    /// Validate operands of a dot product
    pub fn validate_dot_shapes(left: &Shape, right: &Shape) -> Result<usize> {
        for shape in [left, right] {
            if shape.ndim() != 1 {
                return Err(ArrayError::rank_mismatch(
                    "DOT_NOT_VECTORS",
                    "Dot product is defined for rank-1 arrays only",
                    "1",
                    shape.ndim(),
                    "dot product",
                    "Reshape the operands to vectors or use matmul",
                ));
            }
        }
        if left[0] != right[0] {
            return Err(ArrayError::size_mismatch(
                "DOT_LENGTH_MISMATCH",
                format!("Vectors have lengths {} and {}", left[0], right[0]),
                left[0],
                right[0],
                "dot product",
                "Use vectors of equal length",
            ));
        }
        Ok(left[0])
    }

    /// Validate matrix multiplication shapes
    pub fn validate_matmul_shapes(left: &Shape, right: &Shape) -> Result<MatmulDims> {
        for (side, shape) in [("Left", left), ("Right", right)] {
            if shape.ndim() < 2 {
                return Err(ArrayError::rank_mismatch(
                    "MATMUL_TOO_FEW_DIMS",
                    format!("{} operand must have at least 2 dimensions", side),
                    ">= 2",
                    shape.ndim(),
                    "matrix multiplication",
                    "Use an array with shape [..., M, K] / [..., K, N]",
                ));
            }
        }

        let ld = left.dims();
        let rd = right.dims();
        let (m, k) = (ld[ld.len() - 2], ld[ld.len() - 1]);
        let (k2, n) = (rd[rd.len() - 2], rd[rd.len() - 1]);

        if k != k2 {
            return Err(ArrayError::incompatible_shapes(
                "MATMUL_INNER_DIM_MISMATCH",
                "Inner dimensions must match for matrix multiplication",
                "matrix multiplication",
                left.to_string(),
                right.to_string(),
                format!(
                    "Left last dimension ({}) must equal right second-to-last dimension ({})",
                    k, k2
                ),
            ));
        }

        let left_batch = Shape::from_slice(&ld[..ld.len() - 2]);
        let right_batch = Shape::from_slice(&rd[..rd.len() - 2]);
        let batch = left_batch.broadcast_shape(&right_batch).map_err(|_| {
            ArrayError::incompatible_shapes(
                "MATMUL_BATCH_DIM_MISMATCH",
                "Batch dimensions are not broadcastable for matrix multiplication",
                "matrix multiplication",
                left.to_string(),
                right.to_string(),
                "Ensure batch dimensions follow broadcasting rules",
            )
        })?;

        Ok(MatmulDims { batch, m, k, n })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_validate_matmul_shapes_valid() {
        let dims = ArrayValidator::validate_matmul_shapes(
            &Shape::from([2, 3]),
            &Shape::from([3, 4]),
        )
        .unwrap();
        assert_eq!(dims.output_shape().dims(), &[2, 4]);
    }

    #[test]
    fn test_validate_matmul_batch_broadcast() {
        let dims = ArrayValidator::validate_matmul_shapes(
            &Shape::from([4, 1, 2, 3]),
            &Shape::from([5, 3, 7]),
        )
        .unwrap();
        assert_eq!(dims.batch.dims(), &[4, 5]);
        assert_eq!(dims.output_shape().dims(), &[4, 5, 2, 7]);
    }

    #[test]
    fn test_validate_matmul_shapes_incompatible() {
        let err = ArrayValidator::validate_matmul_shapes(
            &Shape::from([2, 3]),
            &Shape::from([4, 5]),
        )
        .unwrap_err();
        assert_eq!(err.code(), "MATMUL_INNER_DIM_MISMATCH");

        let err = ArrayValidator::validate_matmul_shapes(
            &Shape::from([2, 2, 3]),
            &Shape::from([3, 3, 4]),
        )
        .unwrap_err();
        assert_eq!(err.code(), "MATMUL_BATCH_DIM_MISMATCH");
        assert_eq!(err.kind(), ErrorKind::IncompatibleShapes);
    }

    #[test]
    fn test_validate_matmul_rank() {
        let err = ArrayValidator::validate_matmul_shapes(&Shape::vector(3), &Shape::from([3, 4]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RankMismatch);
    }

    #[test]
    fn test_validate_reshape() {
        assert!(ArrayValidator::validate_reshape(&Shape::from([2, 3, 4]), &Shape::from([6, 4])).is_ok());
        let err = ArrayValidator::validate_reshape(&Shape::from([2, 3, 4]), &Shape::from([5, 4]))
            .unwrap_err();
        assert_eq!(err.code(), "RESHAPE_SIZE_MISMATCH");
    }

    #[test]
    fn test_validate_permutation() {
        assert!(ArrayValidator::validate_permutation(3, &[2, 0, 1]).is_ok());
        assert_eq!(
            ArrayValidator::validate_permutation(3, &[0, 1, 1]).unwrap_err().code(),
            "TRANSPOSE_DUPLICATE_AXES"
        );
        assert_eq!(
            ArrayValidator::validate_permutation(3, &[0, 1]).unwrap_err().code(),
            "TRANSPOSE_AXES_LENGTH_MISMATCH"
        );
        assert_eq!(
            ArrayValidator::validate_permutation(2, &[0, 2]).unwrap_err().code(),
            "TRANSPOSE_AXIS_OUT_OF_BOUNDS"
        );
    }

    #[test]
    fn test_normalize_axis() {
        assert_eq!(ArrayValidator::normalize_axis(-1, 3, 2, "expand").unwrap(), 2);
        assert_eq!(ArrayValidator::normalize_axis(1, 3, 2, "expand").unwrap(), 1);
        assert!(ArrayValidator::normalize_axis(3, 3, 2, "expand").is_err());
        assert!(ArrayValidator::normalize_axis(-4, 3, 2, "expand").is_err());
    }

    #[test]
    fn test_validate_dot_shapes() {
        assert_eq!(ArrayValidator::validate_dot_shapes(&Shape::vector(4), &Shape::vector(4)).unwrap(), 4);
        assert_eq!(
            ArrayValidator::validate_dot_shapes(&Shape::vector(4), &Shape::vector(3)).unwrap_err().kind(),
            ErrorKind::SizeMismatch
        );
        assert_eq!(
            ArrayValidator::validate_dot_shapes(&Shape::matrix(2, 2), &Shape::vector(4)).unwrap_err().kind(),
            ErrorKind::RankMismatch
        );
    }
}
