//! Vector dot product and batched matrix multiplication

use tracing::{debug, trace};

use crate::array::Array;
use crate::error::Result;
use crate::index;
use crate::ops::read_operands;
use crate::shape::{Shape, Strides};
use crate::validation::ArrayValidator;

/// Sum of element-wise products of two equal-length vectors, as a rank-0 array
pub fn dot(a: &Array, b: &Array) -> Result<Array> {
    let len = ArrayValidator::validate_dot_shapes(a.shape(), b.shape())?;
    trace!("dot over {} elements", len);

    let sum = read_operands(a, b, |a_data, b_data| {
        a.linear_indices()
            .iter()
            .zip(b.linear_indices().iter())
            .fold(0.0f32, |acc, (ia, ib)| acc + a_data[ia] * b_data[ib])
    });
    Array::from_shape_vec(Shape::scalar(), vec![sum])
}

/// Splits an operand into (batch shape, batch strides, row stride, column stride)
fn matrix_layout(array: &Array) -> (Shape, Strides, isize, isize) {
    let nd = array.ndim();
    let strides = array.strides().as_slice();
    (
        Shape::from_slice(&array.shape().dims()[..nd - 2]),
        Strides::new(strides[..nd - 2].to_vec()),
        strides[nd - 2],
        strides[nd - 1],
    )
}

/// Batched matrix product.
///
/// The last two axes of each operand are the matrix axes (`M x K` and
/// `K x N`); the leading axes are broadcast against each other. Each output
/// element is accumulated left to right over `K` in `f32`.
pub fn matmul(a: &Array, b: &Array) -> Result<Array> {
    let dims = ArrayValidator::validate_matmul_shapes(a.shape(), b.shape())?;
    let out_shape = dims.output_shape();
    debug!("matmul {} x {} -> {}", a.shape(), b.shape(), out_shape);

    let (a_batch, a_batch_strides, a_row, a_col) = matrix_layout(a);
    let (b_batch, b_batch_strides, b_row, b_col) = matrix_layout(b);
    let a_bases = index::linearize(&dims.batch, &a_batch_strides.broadcast_to(&a_batch, &dims.batch))?;
    let b_bases = index::linearize(&dims.batch, &b_batch_strides.broadcast_to(&b_batch, &dims.batch))?;

    let out = Array::zeros(out_shape)?;
    read_operands(a, b, |a_data, b_data| {
        let mut dst = out.storage().write();
        let mut slots = dst.iter_mut();
        for (a_base, b_base) in a_bases.iter().zip(b_bases.iter()) {
            let (a_base, b_base) = (a_base as isize, b_base as isize);
            for i in 0..dims.m as isize {
                for j in 0..dims.n as isize {
                    let mut acc = 0.0f32;
                    for p in 0..dims.k as isize {
                        let ia = a_base + i * a_row + p * a_col;
                        let ib = b_base + p * b_row + j * b_col;
                        acc += a_data[ia as usize] * b_data[ib as usize];
                    }
                    if let Some(slot) = slots.next() {
                        *slot = acc;
                    }
                }
            }
        }
    });
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_dot() {
        let a = Array::arange(1.0, 4.0, 1.0).unwrap();
        let b = Array::from_shape_vec([3], vec![4.0, 5.0, 6.0]).unwrap();
        let d = dot(&a, &b).unwrap();
        assert_eq!(d.ndim(), 0);
        assert_eq!(d.get(&[]).unwrap(), 32.0);
    }

    #[test]
    fn test_dot_errors() {
        let a = Array::zeros([3]).unwrap();
        let b = Array::zeros([4]).unwrap();
        assert_eq!(dot(&a, &b).unwrap_err().kind(), ErrorKind::SizeMismatch);
        let m = Array::zeros([3, 1]).unwrap();
        assert_eq!(dot(&a, &m).unwrap_err().kind(), ErrorKind::RankMismatch);
    }

    #[test]
    fn test_matmul_2d() {
        let a = Array::from_shape_vec([2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let b = Array::from_shape_vec([3, 2], vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]).unwrap();
        let c = matmul(&a, &b).unwrap();
        assert_eq!(c.shape().dims(), &[2, 2]);
        assert_eq!(c.to_vec(), vec![58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn test_matmul_transposed_operand() {
        let a = Array::from_shape_vec([2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let at = a.transpose_new(&[1, 0]).unwrap();
        // a @ a^T
        let c = matmul(&a, &at).unwrap();
        assert_eq!(c.to_vec(), vec![14.0, 32.0, 32.0, 77.0]);
    }

    #[test]
    fn test_matmul_batch_broadcast() {
        let a = Array::ones([2, 1, 2, 3]).unwrap();
        let b = Array::full([4, 3, 5], 2.0).unwrap();
        let c = matmul(&a, &b).unwrap();
        assert_eq!(c.shape().dims(), &[2, 4, 2, 5]);
        assert!(c.to_vec().iter().all(|&v| v == 6.0));
    }

    #[test]
    fn test_matmul_errors() {
        let a = Array::zeros([2, 3]).unwrap();
        let b = Array::zeros([4, 2]).unwrap();
        assert_eq!(matmul(&a, &b).unwrap_err().kind(), ErrorKind::IncompatibleShapes);
        let v = Array::zeros([3]).unwrap();
        assert_eq!(matmul(&a, &v).unwrap_err().kind(), ErrorKind::RankMismatch);
    }
}
