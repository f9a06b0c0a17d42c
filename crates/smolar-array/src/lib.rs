//! Smolar Array: a small N-dimensional `f32` array engine
//!
//! Arrays are dense buffers described by a shape/stride model. Layout
//! operations (reshape, transpose, expand/squeeze) produce views that share
//! the buffer whenever the layout allows; compute operations broadcast their
//! operands and return freshly allocated arrays.
//!
//! # Features
//!
//! - **Shape/stride arithmetic**: C and F orders, backstrides, broadcasting
//! - **Zero-copy views**: owner/view tracking on a shared buffer
//! - **Broadcasting arithmetic**: add, subtract, multiply
//! - **Linear algebra**: vector dot and batched matrix multiplication
//! - **Flat API**: signed-integer entry points for foreign bindings
//!
//! # Example
//!
//! ```rust
//! use smolar_array::prelude::*;
//!
//! let a = Array::arange(1.0, 11.0, 1.0)?.reshape_new([5, 2])?;
//! assert_eq!(a.get(&[2, 1])?, 6.0);
//!
//! let t = a.transpose_new(&[1, 0])?;
//! assert!(t.shares_buffer_with(&a));
//!
//! let gram = matmul(&t, &a)?;
//! assert_eq!(gram.shape().dims(), &[2, 2]);
//!
//! let col = Array::from_shape_vec([3, 1], vec![1.0, 2.0, 3.0])?;
//! let row = Array::ones([1, 4])?;
//! assert_eq!(add(&col, &row)?.shape().dims(), &[3, 4]);
//! # Ok::<(), smolar_array::ArrayError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod array;
pub mod config;
pub mod display;
pub mod error;
pub mod index;
pub mod ops;
pub mod shape;
pub mod storage;
pub mod validation;
mod view;

// Re-export main types
pub use array::{Array, ITEMSIZE};
pub use config::ArrayConfig;
pub use display::ArrayInfo;
pub use error::{ArrayError, ErrorKind, Result};
pub use index::{ArrayIndices, CoordinateIter, LinearIndices};
pub use shape::{Order, Shape, Strides};
pub use storage::Ownership;
pub use validation::ArrayValidator;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ops::{add, apply, dot, matmul, multiply, negate, subtract};
    pub use crate::{Array, ArrayConfig, ArrayError, ErrorKind, Order, Result, Shape, Strides};
}
