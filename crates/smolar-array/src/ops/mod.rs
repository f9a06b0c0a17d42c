//! Array computations
//!
//! Every operation returns a freshly allocated C-order owner except
//! [`Array::apply_inplace`](crate::Array::apply_inplace), which writes
//! through the caller's buffer.

pub mod binary;
pub mod linalg;
pub mod unary;

pub use binary::{add, multiply, subtract, BinaryOp};
pub use linalg::{dot, matmul};
pub use unary::{apply, apply_inplace, negate};

use crate::array::Array;

/// Runs `f` with read access to both operand buffers.
///
/// Operands that share one buffer are read through a single guard.
pub(crate) fn read_operands<R>(a: &Array, b: &Array, f: impl FnOnce(&[f32], &[f32]) -> R) -> R {
    let a_data = a.storage().read();
    if a.shares_buffer_with(b) {
        f(&a_data, &a_data)
    } else {
        let b_data = b.storage().read();
        f(&a_data, &b_data)
    }
}
