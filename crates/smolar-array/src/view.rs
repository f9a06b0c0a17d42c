//! Layout-changing operations
//!
//! Every operation here reinterprets an existing buffer where the layout
//! allows it. The only copy happens in [`Array::reshape_new`] when the source
//! is not C-contiguous.

use tracing::{debug, trace};

use crate::array::Array;
use crate::error::{ArrayError, Result};
use crate::shape::{Shape, Strides};
use crate::validation::ArrayValidator;

impl Array {
    /// Returns an array of `new_shape` holding the same elements in the
    /// same logical order.
    ///
    /// A C-contiguous source yields a view on its buffer; anything else is
    /// first materialized into a new C-order owner.
    pub fn reshape_new(&self, new_shape: impl Into<Shape>) -> Result<Array> {
        let new_shape = new_shape.into();
        ArrayValidator::validate_reshape(self.shape(), &new_shape)?;

        let strides = Strides::from_shape(&new_shape);
        if self.is_c_contiguous() {
            debug!("reshape {} -> {}: sharing buffer", self.shape(), new_shape);
            return self.view_with(new_shape, strides);
        }

        debug!("reshape {} -> {}: copying non-contiguous source", self.shape(), new_shape);
        let mut copy = self.contiguous()?;
        copy.set_layout(new_shape, strides)?;
        Ok(copy)
    }

    /// Reinterprets this array's own buffer under `new_shape`.
    ///
    /// Only C-contiguous arrays can be reshaped in place; every owner built
    /// by the C-order constructors qualifies.
    pub fn reshape_inplace(&mut self, new_shape: impl Into<Shape>) -> Result<()> {
        let new_shape = new_shape.into();
        ArrayValidator::validate_reshape(self.shape(), &new_shape)?;

        if !self.is_c_contiguous() {
            return Err(ArrayError::non_contiguous(
                "RESHAPE_INPLACE_NON_CONTIGUOUS",
                "In-place reshape requires a C-contiguous layout",
                self.shape().to_string(),
                self.strides().to_string(),
                "reshape_inplace",
                "Use reshape_new, which copies when needed",
            ));
        }

        trace!("reshape_inplace {} -> {}", self.shape(), new_shape);
        let strides = Strides::from_shape(&new_shape);
        self.set_layout(new_shape, strides)
    }

    /// Permutes the axes; output axis `i` is input axis `axes[i]`.
    ///
    /// The result always shares the buffer.
    pub fn transpose_new(&self, axes: &[usize]) -> Result<Array> {
        ArrayValidator::validate_permutation(self.ndim(), axes)?;
        let shape = self.shape().permuted(axes);
        let strides = self.strides().permuted(axes);
        trace!("transpose {} by {:?} -> {} strides {}", self.shape(), axes, shape, strides);
        self.view_with(shape, strides)
    }

    /// Reverses the axis order
    pub fn t(&self) -> Result<Array> {
        let axes: Vec<usize> = (0..self.ndim()).rev().collect();
        self.transpose_new(&axes)
    }

    /// Inserts an axis of extent 1 at position `axis` (`0..=ndim`)
    pub fn expand_dims(&self, axis: usize) -> Result<Array> {
        ArrayValidator::validate_insert_axis(self.ndim(), axis, "expand_dims")?;
        // the new axis is never stepped over; this choice keeps C-contiguous inputs C-contiguous
        let stride = if axis < self.ndim() {
            self.strides()[axis] * self.shape()[axis] as isize
        } else {
            1
        };
        let shape = self.shape().with_inserted(axis);
        let strides = self.strides().with_inserted(axis, stride);
        self.view_with(shape, strides)
    }

    /// Removes `axis`, which must have extent 1
    pub fn squeeze(&self, axis: usize) -> Result<Array> {
        ArrayValidator::validate_axis(self.ndim(), axis, "squeeze")?;
        let extent = self.shape()[axis];
        if extent != 1 {
            return Err(ArrayError::cannot_squeeze(
                "SQUEEZE_EXTENT_NOT_ONE",
                format!("Axis {} has extent {}, only extent 1 can be removed", axis, extent),
                axis,
                extent,
                "Choose an axis of extent 1",
            ));
        }
        let shape = self.shape().with_removed(axis);
        let strides = self.strides().with_removed(axis);
        self.view_with(shape, strides)
    }
}

#[cfg(test)]
mod tests {
    use crate::array::Array;
    use crate::error::ErrorKind;

    fn arange_2x3() -> Array {
        let mut a = Array::arange(0.0, 6.0, 1.0).unwrap();
        a.reshape_inplace([2, 3]).unwrap();
        a
    }

    #[test]
    fn test_reshape_new_shares_contiguous() {
        let a = Array::arange(1.0, 11.0, 1.0).unwrap();
        let b = a.reshape_new([5, 2]).unwrap();
        assert!(b.is_view());
        assert!(b.shares_buffer_with(&a));
        assert_eq!(b.get(&[2, 1]).unwrap(), 6.0);
        assert_eq!(b.totalsize(), a.totalsize());
    }

    #[test]
    fn test_reshape_new_copies_transposed() {
        let a = arange_2x3();
        let t = a.transpose_new(&[1, 0]).unwrap();
        let r = t.reshape_new([6]).unwrap();
        assert!(r.is_owner());
        assert!(!r.shares_buffer_with(&a));
        assert_eq!(r.to_vec(), vec![0.0, 3.0, 1.0, 4.0, 2.0, 5.0]);
    }

    #[test]
    fn test_reshape_size_mismatch() {
        let a = arange_2x3();
        assert_eq!(a.reshape_new([4]).unwrap_err().kind(), ErrorKind::SizeMismatch);
    }

    #[test]
    fn test_reshape_inplace_non_contiguous() {
        let a = arange_2x3();
        let mut t = a.transpose_new(&[1, 0]).unwrap();
        assert_eq!(t.reshape_inplace([6]).unwrap_err().kind(), ErrorKind::NonContiguous);
    }

    #[test]
    fn test_transpose() {
        let a = arange_2x3();
        let t = a.transpose_new(&[1, 0]).unwrap();
        assert_eq!(t.shape().dims(), &[3, 2]);
        assert_eq!(t.strides().as_slice(), &[1, 3]);
        assert!(t.is_f_order());
        for i in 0..3 {
            for j in 0..2 {
                assert_eq!(t.get(&[i, j]).unwrap(), a.get(&[j, i]).unwrap());
            }
        }
        assert_eq!(t.t().unwrap().to_vec(), a.to_vec());
    }

    #[test]
    fn test_transpose_invalid() {
        let a = arange_2x3();
        assert_eq!(
            a.transpose_new(&[0, 0]).unwrap_err().kind(),
            ErrorKind::InvalidPermutation
        );
    }

    #[test]
    fn test_expand_and_squeeze_round_trip() {
        let a = arange_2x3();
        let e = a.expand_dims(0).unwrap();
        assert_eq!(e.shape().dims(), &[1, 2, 3]);
        assert!(e.is_c_contiguous());

        let last = a.expand_dims(2).unwrap();
        assert_eq!(last.shape().dims(), &[2, 3, 1]);

        let s = e.squeeze(0).unwrap();
        assert_eq!(s.shape().dims(), &[2, 3]);
        assert_eq!(s.to_vec(), a.to_vec());
    }

    #[test]
    fn test_expand_squeeze_errors() {
        let a = arange_2x3();
        assert_eq!(a.expand_dims(3).unwrap_err().kind(), ErrorKind::AxisOutOfRange);
        assert_eq!(a.squeeze(0).unwrap_err().kind(), ErrorKind::CannotSqueeze);
        assert_eq!(a.squeeze(2).unwrap_err().kind(), ErrorKind::AxisOutOfRange);
    }

    #[test]
    fn test_view_writes_visible_to_owner() {
        let a = arange_2x3();
        let mut v = a.transpose_new(&[1, 0]).unwrap();
        v.fill_from_values(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0]).unwrap();
        // view (i, j) maps to owner (j, i)
        assert_eq!(a.get(&[0, 1]).unwrap(), 12.0);
        assert_eq!(a.get(&[1, 0]).unwrap(), 11.0);
        v.release();
        assert_eq!(a.get(&[1, 2]).unwrap(), 15.0);
    }
}
