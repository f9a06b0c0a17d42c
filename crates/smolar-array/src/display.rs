//! Structural dumps and element printing

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::array::Array;
use crate::shape::{Shape, Strides};
use crate::storage::Ownership;

/// Snapshot of an array's descriptors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayInfo {
    /// Extent per axis
    pub shape: Vec<usize>,
    /// Element stride per axis
    pub strides: Vec<isize>,
    /// Wrap-around correction per axis
    pub backstrides: Vec<isize>,
    /// Rank
    pub ndim: usize,
    /// Element width in bytes
    pub itemsize: usize,
    /// Number of elements
    pub totalsize: usize,
    /// Strides are interpreted as row-major
    pub c_order: bool,
    /// Strides are interpreted as column-major
    pub f_order: bool,
    /// Owner or view
    pub ownership: Ownership,
}

impl fmt::Display for ArrayInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shape: {}", Shape::from_slice(&self.shape))?;
        writeln!(f, "Strides: {}", Strides::new(self.strides.clone()))?;
        writeln!(f, "Array is C-contiguous? {}", self.c_order)?;
        write!(f, "Array is F-contiguous? {}", self.f_order)
    }
}

impl Array {
    /// Descriptor snapshot
    pub fn info(&self) -> ArrayInfo {
        ArrayInfo {
            shape: self.shape().dims().to_vec(),
            strides: self.strides().as_slice().to_vec(),
            backstrides: self.backstrides().to_vec(),
            ndim: self.ndim(),
            itemsize: self.itemsize(),
            totalsize: self.totalsize(),
            c_order: self.is_c_order(),
            f_order: self.is_f_order(),
            ownership: self.ownership(),
        }
    }

    /// Prints the descriptor snapshot to stdout
    pub fn print_info(&self) {
        println!("{}", self.info());
    }
}

/// Walks `axis` starting at `offset` and returns the offset after stepping
/// back to the start of the axis.
fn write_axis(
    f: &mut fmt::Formatter<'_>,
    data: &[f32],
    array: &Array,
    axis: usize,
    mut offset: isize,
    precision: usize,
) -> Result<isize, fmt::Error> {
    let shape = array.shape();
    let strides = array.strides();
    let last = array.ndim() - 1;

    for i in 0..shape[axis] {
        if i > 0 {
            offset += strides[axis];
        }
        if axis == last {
            write!(f, "{:.*} ", precision, data[offset as usize])?;
        } else {
            offset = write_axis(f, data, array, axis + 1, offset, precision)?;
        }
    }
    offset -= array.backstrides()[axis];

    if axis == last || axis != 0 {
        writeln!(f)?;
    }
    Ok(offset)
}

/// Rows of the last axis on separate lines, with a blank line between
/// blocks of higher axes. Precision defaults to 3 decimals.
impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(3);
        let data = self.storage().read();
        if self.ndim() == 0 {
            return writeln!(f, "{:.*}", precision, data[0]);
        }
        if self.totalsize() == 0 {
            return Ok(());
        }
        write_axis(f, &data, self, 0, 0, precision).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_matrix() {
        let a = Array::arange(0.0, 6.0, 1.0).unwrap().reshape_new([2, 3]).unwrap();
        assert_eq!(a.to_string(), "0.000 1.000 2.000 \n3.000 4.000 5.000 \n");
    }

    #[test]
    fn test_show_transposed_and_precision() {
        let a = Array::arange(0.0, 4.0, 1.0).unwrap().reshape_new([2, 2]).unwrap();
        let t = a.transpose_new(&[1, 0]).unwrap();
        assert_eq!(format!("{:.1}", t), "0.0 2.0 \n1.0 3.0 \n");
    }

    #[test]
    fn test_show_3d_block_separator() {
        let a = Array::ones([2, 1, 2]).unwrap();
        assert_eq!(a.to_string(), "1.000 1.000 \n\n1.000 1.000 \n\n");
    }

    #[test]
    fn test_info() {
        let a = Array::zeros([2, 3]).unwrap();
        let info = a.info();
        assert_eq!(info.shape, vec![2, 3]);
        assert_eq!(info.strides, vec![3, 1]);
        assert_eq!(info.backstrides, vec![3, 2]);
        assert_eq!(info.itemsize, 4);
        assert!(info.c_order && !info.f_order);
        assert_eq!(
            info.to_string(),
            "Shape: (2, 3)\nStrides: (3, 1)\nArray is C-contiguous? true\nArray is F-contiguous? false"
        );

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["ownership"], "owner");
    }
}
