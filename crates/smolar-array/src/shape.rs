//! Shape, stride and memory-order types for array dimensions

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::{ArrayError, Result};

/// Interpretation of the strides of an array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Row-major: the last axis has unit stride
    #[default]
    C,
    /// Column-major: the first axis has unit stride
    F,
}

impl Order {
    /// Classifies a shape/stride pair, falling back to `fallback` when the
    /// strides match neither contiguous layout
    pub fn detect(shape: &Shape, strides: &Strides, fallback: Order) -> Order {
        if strides.is_c_contiguous(shape) {
            Order::C
        } else if strides.is_f_contiguous(shape) {
            Order::F
        } else {
            fallback
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::C => write!(f, "C"),
            Order::F => write!(f, "F"),
        }
    }
}

/// Represents the shape of an array
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Creates a new shape from a vector of dimensions
    pub fn new(dims: Vec<usize>) -> Self {
        Self { dims }
    }

    /// Creates a shape from a slice of dimensions
    pub fn from_slice(dims: &[usize]) -> Self {
        Self { dims: dims.to_vec() }
    }

    /// Creates a shape from signed extents, rejecting negative values
    pub fn from_signed(dims: &[i64]) -> Result<Self> {
        let mut out = Vec::with_capacity(dims.len());
        for (axis, &dim) in dims.iter().enumerate() {
            let dim = usize::try_from(dim).map_err(|_| {
                ArrayError::invalid_shape(
                    "SHAPE_NEGATIVE_EXTENT",
                    format!("Extent {} at axis {} is negative", dim, axis),
                    format!("{:?}", dims),
                    "shape construction",
                    "All extents must be zero or positive",
                )
            })?;
            out.push(dim);
        }
        Ok(Self { dims: out })
    }

    /// Creates a scalar shape (0 dimensions)
    pub fn scalar() -> Self {
        Self { dims: vec![] }
    }

    /// Creates a 1D shape
    pub fn vector(size: usize) -> Self {
        Self { dims: vec![size] }
    }

    /// Creates a 2D shape
    pub fn matrix(rows: usize, cols: usize) -> Self {
        Self { dims: vec![rows, cols] }
    }

    /// Returns the number of dimensions (rank)
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Returns the dimensions as a slice
    pub fn as_slice(&self) -> &[usize] {
        &self.dims
    }

    /// Returns the dimensions as a slice (alias for as_slice)
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Returns the total number of elements; a scalar holds one element
    pub fn numel(&self) -> usize {
        self.dims.iter().product()
    }

    /// Returns the total number of elements, or `None` on overflow
    pub fn checked_numel(&self) -> Option<usize> {
        self.dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
    }

    /// Exact equality: same rank and same extent on every axis
    pub fn shapes_equal(&self, other: &Shape) -> bool {
        self.dims == other.dims
    }

    /// Checks if this shape is compatible with another for broadcasting
    pub fn is_broadcast_compatible(&self, other: &Shape) -> bool {
        let min_ndim = self.ndim().min(other.ndim());
        let self_offset = self.ndim() - min_ndim;
        let other_offset = other.ndim() - min_ndim;

        (0..min_ndim).all(|i| {
            let a = self.dims[self_offset + i];
            let b = other.dims[other_offset + i];
            a == b || a == 1 || b == 1
        })
    }

    /// Returns the broadcasted shape of two shapes
    pub fn broadcast_shape(&self, other: &Shape) -> Result<Shape> {
        if !self.is_broadcast_compatible(other) {
            return Err(ArrayError::incompatible_shapes(
                "SHAPE_BROADCAST_INCOMPATIBLE",
                "Shapes are not compatible for broadcasting",
                "shape broadcasting",
                self.to_string(),
                other.to_string(),
                "Each right-aligned axis pair must be equal or contain a 1",
            ));
        }

        let max_ndim = self.ndim().max(other.ndim());
        let self_offset = max_ndim - self.ndim();
        let other_offset = max_ndim - other.ndim();

        let dims = (0..max_ndim)
            .map(|i| {
                let a = if i >= self_offset { self.dims[i - self_offset] } else { 1 };
                let b = if i >= other_offset { other.dims[i - other_offset] } else { 1 };
                // a zero extent broadcast against 1 stays zero
                if a == 1 { b } else { a }
            })
            .collect();

        Ok(Shape::new(dims))
    }

    /// Computes strides for the given memory order
    pub fn strides_for(&self, order: Order) -> Strides {
        match order {
            Order::C => Strides::from_shape(self),
            Order::F => Strides::from_shape_fortran(self),
        }
    }

    /// Returns a copy with the axes reordered by `axes`
    pub fn permuted(&self, axes: &[usize]) -> Shape {
        Shape::new(axes.iter().map(|&a| self.dims[a]).collect())
    }

    /// Returns a copy with a unit axis inserted at `axis`
    pub fn with_inserted(&self, axis: usize) -> Shape {
        let mut dims = self.dims.clone();
        dims.insert(axis, 1);
        Shape::new(dims)
    }

    /// Returns a copy with `axis` removed
    pub fn with_removed(&self, axis: usize) -> Shape {
        let mut dims = self.dims.clone();
        dims.remove(axis);
        Shape::new(dims)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, dim) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", dim)?;
        }
        if self.dims.len() == 1 {
            write!(f, ",")?;
        }
        write!(f, ")")
    }
}

impl Index<usize> for Shape {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.dims[index]
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self::new(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self::from_slice(dims)
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Self::new(dims.to_vec())
    }
}

/// Represents the strides of an array, in elements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Strides {
    strides: Vec<isize>,
}

impl Strides {
    /// Creates new strides from a vector
    pub fn new(strides: Vec<isize>) -> Self {
        Self { strides }
    }

    /// Creates strides from a shape in row-major (C) order
    pub fn from_shape(shape: &Shape) -> Self {
        let mut strides = vec![1isize; shape.ndim()];
        for i in (0..shape.ndim().saturating_sub(1)).rev() {
            strides[i] = strides[i + 1] * shape[i + 1] as isize;
        }
        Self { strides }
    }

    /// Creates strides from a shape in column-major (Fortran) order
    pub fn from_shape_fortran(shape: &Shape) -> Self {
        let mut strides = vec![1isize; shape.ndim()];
        for i in 1..shape.ndim() {
            strides[i] = strides[i - 1] * shape[i - 1] as isize;
        }
        Self { strides }
    }

    /// Returns the strides as a slice
    pub fn as_slice(&self) -> &[isize] {
        &self.strides
    }

    /// Returns the number of dimensions
    pub fn ndim(&self) -> usize {
        self.strides.len()
    }

    /// Computes the offset for a given multi-dimensional index
    pub fn offset(&self, indices: &[usize]) -> isize {
        crate::index::coordinate_to_offset(indices, &self.strides)
    }

    /// Wrap-around corrections: `strides[i] * (shape[i] - 1)` per axis
    pub fn backstrides(&self, shape: &Shape) -> Vec<isize> {
        self.strides
            .iter()
            .zip(shape.dims())
            .map(|(&s, &d)| s * d.saturating_sub(1) as isize)
            .collect()
    }

    /// Whether these strides address `shape` as a dense row-major block.
    /// Axes of extent 1 are never stepped over and are ignored.
    pub fn is_c_contiguous(&self, shape: &Shape) -> bool {
        if shape.ndim() != self.ndim() {
            return false;
        }
        let mut expected = 1isize;
        for i in (0..self.ndim()).rev() {
            if shape[i] != 1 && self.strides[i] != expected {
                return false;
            }
            expected *= shape[i] as isize;
        }
        true
    }

    /// Whether these strides address `shape` as a dense column-major block
    pub fn is_f_contiguous(&self, shape: &Shape) -> bool {
        if shape.ndim() != self.ndim() {
            return false;
        }
        let mut expected = 1isize;
        for i in 0..self.ndim() {
            if shape[i] != 1 && self.strides[i] != expected {
                return false;
            }
            expected *= shape[i] as isize;
        }
        true
    }

    /// Returns whether the strides represent either contiguous layout
    pub fn is_contiguous(&self, shape: &Shape) -> bool {
        self.is_c_contiguous(shape) || self.is_f_contiguous(shape)
    }

    /// Creates strides for a permuted view; `axes` must already be validated
    pub fn permuted(&self, axes: &[usize]) -> Strides {
        Strides::new(axes.iter().map(|&a| self.strides[a]).collect())
    }

    /// Returns a copy with `stride` inserted at `axis`
    pub fn with_inserted(&self, axis: usize, stride: isize) -> Strides {
        let mut strides = self.strides.clone();
        strides.insert(axis, stride);
        Strides::new(strides)
    }

    /// Returns a copy with `axis` removed
    pub fn with_removed(&self, axis: usize) -> Strides {
        let mut strides = self.strides.clone();
        strides.remove(axis);
        Strides::new(strides)
    }

    /// Strides that read an array of `shape` as if it had the broadcast
    /// shape `target`. Padded and stretched axes get stride 0, so every
    /// coordinate along them maps to the same element.
    ///
    /// `shape` must be broadcast-compatible with `target`.
    pub fn broadcast_to(&self, shape: &Shape, target: &Shape) -> Strides {
        let pad = target.ndim() - shape.ndim();
        let strides = (0..target.ndim())
            .map(|i| {
                if i < pad || shape[i - pad] == 1 {
                    0
                } else {
                    self.strides[i - pad]
                }
            })
            .collect();
        Strides::new(strides)
    }
}

impl Index<usize> for Strides {
    type Output = isize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.strides[index]
    }
}

impl fmt::Display for Strides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, stride) in self.strides.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", stride)?;
        }
        if self.strides.len() == 1 {
            write!(f, ",")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_creation() {
        let shape = Shape::vector(10);
        assert_eq!(shape.ndim(), 1);
        assert_eq!(shape.numel(), 10);

        let shape = Shape::matrix(3, 4);
        assert_eq!(shape.ndim(), 2);
        assert_eq!(shape.numel(), 12);

        assert_eq!(Shape::scalar().numel(), 1);
        assert_eq!(Shape::from([2, 0, 3]).numel(), 0);
    }

    #[test]
    fn test_from_signed_rejects_negative() {
        let err = Shape::from_signed(&[2, -1]).unwrap_err();
        assert_eq!(err.code(), "SHAPE_NEGATIVE_EXTENT");
        assert_eq!(Shape::from_signed(&[2, 3]).unwrap().dims(), &[2, 3]);
    }

    #[test]
    fn test_broadcasting() {
        let shape1 = Shape::from_slice(&[1, 3, 1]);
        let shape2 = Shape::from_slice(&[5, 1, 4]);

        assert!(shape1.is_broadcast_compatible(&shape2));

        let broadcast = shape1.broadcast_shape(&shape2).unwrap();
        assert_eq!(broadcast.as_slice(), &[5, 3, 4]);

        let padded = Shape::from([4]).broadcast_shape(&Shape::from([3, 1])).unwrap();
        assert_eq!(padded.as_slice(), &[3, 4]);
    }

    #[test]
    fn test_broadcasting_incompatible() {
        let err = Shape::from([2, 3]).broadcast_shape(&Shape::from([4, 5])).unwrap_err();
        assert_eq!(err.code(), "SHAPE_BROADCAST_INCOMPATIBLE");
    }

    #[test]
    fn test_strides() {
        let shape = Shape::from([2, 3, 4]);
        assert_eq!(shape.strides_for(Order::C).as_slice(), &[12, 4, 1]);
        assert_eq!(shape.strides_for(Order::F).as_slice(), &[1, 2, 6]);
        assert_eq!(Shape::scalar().strides_for(Order::C).ndim(), 0);

        let strides = Shape::matrix(3, 4).strides_for(Order::C);
        assert_eq!(strides.offset(&[1, 2]), 6);
        assert_eq!(strides.backstrides(&Shape::matrix(3, 4)), vec![8, 3]);
    }

    #[test]
    fn test_contiguity_ignores_unit_axes() {
        let shape = Shape::from([3, 1]);
        assert!(Strides::new(vec![1, 99]).is_c_contiguous(&shape));
        assert!(Strides::new(vec![1, 3]).is_f_contiguous(&shape));

        let transposed = Shape::from([3, 2]);
        let strides = Strides::new(vec![1, 3]);
        assert!(!strides.is_c_contiguous(&transposed));
        assert!(strides.is_f_contiguous(&transposed));
        assert_eq!(Order::detect(&transposed, &strides, Order::C), Order::F);
    }

    #[test]
    fn test_broadcast_strides() {
        let shape = Shape::from([3, 1]);
        let strides = shape.strides_for(Order::C);
        let target = Shape::from([2, 3, 4]);
        assert_eq!(strides.broadcast_to(&shape, &target).as_slice(), &[0, 1, 0]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Shape::from([2, 3]).to_string(), "(2, 3)");
        assert_eq!(Shape::vector(5).to_string(), "(5,)");
        assert_eq!(Shape::scalar().to_string(), "()");
    }
}
