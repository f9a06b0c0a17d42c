//! Broadcasting element-wise binary operations

use std::ops;

use tracing::trace;

use crate::array::Array;
use crate::error::{ArrayError, Result};
use crate::index;
use crate::ops::read_operands;

/// A scalar combinator applied element by element
pub trait BinaryOp {
    /// Operation name used in errors and logs
    const NAME: &'static str;

    /// Combines one element of each operand
    fn combine(a: f32, b: f32) -> f32;
}

/// Element-wise addition
pub struct Add;

impl BinaryOp for Add {
    const NAME: &'static str = "add";

    fn combine(a: f32, b: f32) -> f32 {
        a + b
    }
}

/// Element-wise subtraction
pub struct Sub;

impl BinaryOp for Sub {
    const NAME: &'static str = "subtract";

    fn combine(a: f32, b: f32) -> f32 {
        a - b
    }
}

/// Element-wise multiplication
pub struct Mul;

impl BinaryOp for Mul {
    const NAME: &'static str = "multiply";

    fn combine(a: f32, b: f32) -> f32 {
        a * b
    }
}

/// Applies `Op` over the broadcast of `a` and `b`.
///
/// Each operand is read through its own strides, with padded and unit
/// axes pinned at offset 0, so views are handled without copying.
pub fn broadcast_apply<Op: BinaryOp>(a: &Array, b: &Array) -> Result<Array> {
    let out_shape = a.shape().broadcast_shape(b.shape()).map_err(|_| {
        ArrayError::incompatible_shapes(
            "BINARY_BROADCAST_INCOMPATIBLE",
            format!("Cannot broadcast {} with {}", a.shape(), b.shape()),
            Op::NAME,
            a.shape().to_string(),
            b.shape().to_string(),
            "Each right-aligned axis pair must be equal or contain a 1",
        )
    })?;
    trace!("{} {} with {} -> {}", Op::NAME, a.shape(), b.shape(), out_shape);

    let a_offsets = index::linearize(&out_shape, &a.strides().broadcast_to(a.shape(), &out_shape))?;
    let b_offsets = index::linearize(&out_shape, &b.strides().broadcast_to(b.shape(), &out_shape))?;

    let out = Array::zeros(out_shape)?;
    read_operands(a, b, |a_data, b_data| {
        let mut dst = out.storage().write();
        for ((slot, ia), ib) in dst.iter_mut().zip(a_offsets.iter()).zip(b_offsets.iter()) {
            *slot = Op::combine(a_data[ia], b_data[ib]);
        }
    });
    Ok(out)
}

/// Broadcasting element-wise sum
pub fn add(a: &Array, b: &Array) -> Result<Array> {
    broadcast_apply::<Add>(a, b)
}

/// Broadcasting element-wise difference
pub fn subtract(a: &Array, b: &Array) -> Result<Array> {
    broadcast_apply::<Sub>(a, b)
}

/// Broadcasting element-wise product
pub fn multiply(a: &Array, b: &Array) -> Result<Array> {
    broadcast_apply::<Mul>(a, b)
}

impl ops::Add for &Array {
    type Output = Result<Array>;

    fn add(self, rhs: &Array) -> Self::Output {
        add(self, rhs)
    }
}

impl ops::Sub for &Array {
    type Output = Result<Array>;

    fn sub(self, rhs: &Array) -> Self::Output {
        subtract(self, rhs)
    }
}

impl ops::Mul for &Array {
    type Output = Result<Array>;

    fn mul(self, rhs: &Array) -> Self::Output {
        multiply(self, rhs)
    }
}
