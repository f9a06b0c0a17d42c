//! Coordinate enumeration and coordinate-to-offset mapping
//!
//! Every traversal in the engine visits coordinates in row-major nesting
//! order (last axis fastest), independent of the memory order of the buffer.
//! [`LinearIndices`] caches the flat buffer offsets of that traversal for a
//! given shape/stride pair so that non-contiguous views can be walked
//! without recomputing dot products per element.

use std::ops::Range;

use crate::error::{ArrayError, Result};
use crate::shape::{Shape, Strides};

/// Dot product of a coordinate tuple with a stride vector
pub fn coordinate_to_offset(coord: &[usize], strides: &[isize]) -> isize {
    debug_assert_eq!(coord.len(), strides.len(), "coordinate rank mismatch");
    coord
        .iter()
        .zip(strides)
        .map(|(&c, &s)| c as isize * s)
        .sum()
}

/// Lazily enumerates every coordinate of a shape in row-major order
pub fn enumerate_coordinates(shape: &Shape) -> CoordinateIter {
    CoordinateIter::new(shape)
}

/// Flat offsets visited by [`enumerate_coordinates`] mapped through `strides`.
///
/// The offset table holds one `usize` per element, so it is reserved
/// fallibly like the element buffer itself.
pub fn linearize(shape: &Shape, strides: &Strides) -> Result<LinearIndices> {
    let total = shape.numel();
    let mut offsets = Vec::new();
    offsets.try_reserve_exact(total).map_err(|e| {
        ArrayError::allocation_failure(
            "INDEX_ALLOCATION_FAILED",
            format!("Failed to allocate offset table: {}", e),
            total,
            "Reduce the array size",
        )
    })?;
    if total == 0 {
        return Ok(LinearIndices { offsets });
    }

    let ndim = shape.ndim();
    let backstrides = strides.backstrides(shape);
    let mut coord = vec![0usize; ndim];
    let mut offset = 0isize;

    for _ in 0..total {
        debug_assert!(offset >= 0, "negative buffer offset");
        offsets.push(offset as usize);
        for axis in (0..ndim).rev() {
            if coord[axis] + 1 < shape[axis] {
                coord[axis] += 1;
                offset += strides[axis];
                break;
            }
            coord[axis] = 0;
            offset -= backstrides[axis];
        }
    }

    Ok(LinearIndices { offsets })
}

/// Restartable row-major coordinate iterator
#[derive(Debug, Clone)]
pub struct CoordinateIter {
    dims: Vec<usize>,
    next: Option<Vec<usize>>,
    remaining: usize,
}

impl CoordinateIter {
    /// Creates an iterator positioned at the first coordinate of `shape`
    pub fn new(shape: &Shape) -> Self {
        let remaining = shape.numel();
        let next = (remaining > 0).then(|| vec![0; shape.ndim()]);
        Self {
            dims: shape.dims().to_vec(),
            next,
            remaining,
        }
    }

    /// Rewinds to the first coordinate
    pub fn restart(&mut self) {
        *self = Self::new(&Shape::from_slice(&self.dims));
    }
}

impl Iterator for CoordinateIter {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.remaining -= 1;

        let mut successor = current.clone();
        for axis in (0..self.dims.len()).rev() {
            successor[axis] += 1;
            if successor[axis] < self.dims[axis] {
                self.next = Some(successor);
                return Some(current);
            }
            successor[axis] = 0;
        }
        // every axis wrapped: the traversal is complete
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for CoordinateIter {}

/// Valid coordinate values per axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayIndices {
    axes: Vec<Range<usize>>,
}

impl ArrayIndices {
    /// Builds the per-axis ranges `0..shape[i]`
    pub fn from_shape(shape: &Shape) -> Self {
        Self {
            axes: shape.dims().iter().map(|&d| 0..d).collect(),
        }
    }

    /// Valid coordinate range along `axis`
    pub fn axis(&self, axis: usize) -> Option<Range<usize>> {
        self.axes.get(axis).cloned()
    }

    /// Number of axes
    pub fn ndim(&self) -> usize {
        self.axes.len()
    }

    /// Number of coordinate tuples
    pub fn count(&self) -> usize {
        self.axes.iter().map(|r| r.len()).product()
    }

    /// Whether `coord` lies inside every axis range
    pub fn contains(&self, coord: &[usize]) -> bool {
        coord.len() == self.axes.len()
            && coord.iter().zip(&self.axes).all(|(c, r)| r.contains(c))
    }

    /// Enumerates every coordinate tuple in row-major order
    pub fn coordinates(&self) -> CoordinateIter {
        CoordinateIter::new(&Shape::new(self.axes.iter().map(|r| r.end).collect()))
    }
}

/// Cached flat offsets of a row-major traversal
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinearIndices {
    offsets: Vec<usize>,
}

impl LinearIndices {
    /// Offsets in traversal order
    pub fn as_slice(&self) -> &[usize] {
        &self.offsets
    }

    /// Number of offsets
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether there are no offsets
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Iterates offsets in traversal order
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, usize>> {
        self.offsets.iter().copied()
    }

    /// Whether the offsets are exactly `0..len`, i.e. logical order equals memory order
    pub fn is_identity(&self) -> bool {
        self.offsets.iter().enumerate().all(|(i, &o)| i == o)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Order;

    #[test]
    fn test_enumerate_row_major() {
        let coords: Vec<_> = enumerate_coordinates(&Shape::from([2, 3])).collect();
        assert_eq!(coords.len(), 6);
        assert_eq!(coords[0], vec![0, 0]);
        assert_eq!(coords[1], vec![0, 1]);
        assert_eq!(coords[3], vec![1, 0]);
        assert_eq!(coords[5], vec![1, 2]);
    }

    #[test]
    fn test_enumerate_edge_shapes() {
        let scalar: Vec<_> = enumerate_coordinates(&Shape::scalar()).collect();
        assert_eq!(scalar, vec![Vec::<usize>::new()]);

        assert_eq!(enumerate_coordinates(&Shape::from([3, 0])).count(), 0);
    }

    #[test]
    fn test_restart() {
        let mut iter = enumerate_coordinates(&Shape::from([2, 2]));
        iter.next();
        iter.next();
        iter.restart();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(vec![0, 0]));
    }

    #[test]
    fn test_linearize_matches_coordinate_offsets() {
        let shape = Shape::from([2, 3, 4]);
        for order in [Order::C, Order::F] {
            let strides = shape.strides_for(order);
            let lidxs = linearize(&shape, &strides).unwrap();
            let expected: Vec<usize> = enumerate_coordinates(&shape)
                .map(|c| coordinate_to_offset(&c, strides.as_slice()) as usize)
                .collect();
            assert_eq!(lidxs.as_slice(), expected.as_slice());
        }
    }

    #[test]
    fn test_linearize_transposed() {
        // (2, 3) C-order transposed to (3, 2) with strides (1, 3)
        let lidxs = linearize(&Shape::from([3, 2]), &Strides::new(vec![1, 3])).unwrap();
        assert_eq!(lidxs.as_slice(), &[0, 3, 1, 4, 2, 5]);
        assert!(!lidxs.is_identity());

        let contiguous = linearize(&Shape::from([3, 2]), &Strides::new(vec![2, 1])).unwrap();
        assert!(contiguous.is_identity());
    }

    #[test]
    fn test_linearize_allocation_failure() {
        let shape = Shape::from([usize::MAX / 2]);
        let err = linearize(&shape, &Strides::new(vec![1])).unwrap_err();
        assert_eq!(err.code(), "INDEX_ALLOCATION_FAILED");
    }

    #[test]
    fn test_array_indices() {
        let idxs = ArrayIndices::from_shape(&Shape::from([2, 3]));
        assert_eq!(idxs.ndim(), 2);
        assert_eq!(idxs.count(), 6);
        assert_eq!(idxs.axis(1), Some(0..3));
        assert!(idxs.contains(&[1, 2]));
        assert!(!idxs.contains(&[2, 0]));
        assert_eq!(idxs.coordinates().count(), 6);
    }
}
