//! Element-wise function application

use std::ops;

use crate::array::Array;
use crate::error::Result;

impl Array {
    /// Replaces every element `x` with `f(x)`, visiting elements in logical
    /// order. On a view the change is visible through the owner.
    pub fn apply_inplace<F>(&mut self, f: F)
    where
        F: Fn(f32) -> f32,
    {
        let mut data = self.storage().write();
        for offset in self.linear_indices().iter() {
            data[offset] = f(data[offset]);
        }
    }

    /// Returns a new C-order owner holding `f(x)` for every element `x`
    pub fn apply<F>(&self, f: F) -> Result<Array>
    where
        F: Fn(f32) -> f32,
    {
        let out = Array::zeros(self.shape().clone())?;
        {
            let src = self.storage().read();
            let mut dst = out.storage().write();
            for (slot, offset) in dst.iter_mut().zip(self.linear_indices().iter()) {
                *slot = f(src[offset]);
            }
        }
        Ok(out)
    }
}

/// Applies `f` to every element of `array` in place
pub fn apply_inplace<F: Fn(f32) -> f32>(array: &mut Array, f: F) {
    array.apply_inplace(f)
}

/// Applies `f` to every element of `array` into a new array
pub fn apply<F: Fn(f32) -> f32>(array: &Array, f: F) -> Result<Array> {
    array.apply(f)
}

/// Element-wise negation
pub fn negate(array: &Array) -> Result<Array> {
    array.apply(|x| -x)
}

impl ops::Neg for &Array {
    type Output = Result<Array>;

    fn neg(self) -> Self::Output {
        negate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_inplace_on_view() {
        let a = Array::arange(0.0, 6.0, 1.0).unwrap();
        let mut v = a.reshape_new([2, 3]).unwrap().transpose_new(&[1, 0]).unwrap();
        let visited = std::cell::RefCell::new(Vec::new());
        v.apply_inplace(|x| {
            visited.borrow_mut().push(x);
            x * 10.0
        });
        // logical order of the transposed view
        assert_eq!(visited.into_inner(), vec![0.0, 3.0, 1.0, 4.0, 2.0, 5.0]);
        assert_eq!(a.to_vec(), vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0]);
    }

    #[test]
    fn test_apply_leaves_source() {
        let a = Array::arange(1.0, 4.0, 1.0).unwrap();
        let b = a.apply(|x| x * x).unwrap();
        assert_eq!(b.to_vec(), vec![1.0, 4.0, 9.0]);
        assert_eq!(a.to_vec(), vec![1.0, 2.0, 3.0]);
        assert!(!b.shares_buffer_with(&a));
    }

    #[test]
    fn test_negate() {
        let a = Array::from_shape_vec([2], vec![1.0, -2.0]).unwrap();
        assert_eq!((-&a).unwrap().to_vec(), vec![-1.0, 2.0]);
    }
}
