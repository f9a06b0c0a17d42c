//! The array entity and its constructors
//!
//! An [`Array`] couples a shared [`Storage`] buffer with the descriptors that
//! interpret it: shape, strides, backstrides, order flag and the cached index
//! structures. All descriptor fields are recomputed together whenever the
//! layout changes, so they never disagree with each other.

use rand::Rng;
use tracing::{debug, trace};

use crate::config::ArrayConfig;
use crate::error::{ArrayError, Result};
use crate::index::{self, ArrayIndices, LinearIndices};
use crate::shape::{Order, Shape, Strides};
use crate::storage::{Ownership, Storage};
use crate::validation::ArrayValidator;

/// Width in bytes of one element
pub const ITEMSIZE: usize = std::mem::size_of::<f32>();

/// Dense N-dimensional array of `f32`
#[derive(Debug)]
pub struct Array {
    storage: Storage,
    shape: Shape,
    strides: Strides,
    backstrides: Vec<isize>,
    order: Order,
    idxs: ArrayIndices,
    lidxs: LinearIndices,
}

impl Array {
    /// Assembles an array over `storage`, deriving every cached descriptor
    fn with_layout(storage: Storage, shape: Shape, strides: Strides, order: Order) -> Result<Self> {
        let backstrides = strides.backstrides(&shape);
        let idxs = ArrayIndices::from_shape(&shape);
        let lidxs = index::linearize(&shape, &strides)?;
        Ok(Self {
            storage,
            shape,
            strides,
            backstrides,
            order,
            idxs,
            lidxs,
        })
    }

    /// Creates a view sharing this array's buffer under a new layout.
    ///
    /// The order flag is re-detected from the strides and falls back to this
    /// array's order when the layout is neither C- nor F-contiguous.
    pub(crate) fn view_with(&self, shape: Shape, strides: Strides) -> Result<Self> {
        let order = Order::detect(&shape, &strides, self.order);
        Self::with_layout(self.storage.share(), shape, strides, order)
    }

    /// Replaces the layout in place, keeping the buffer and ownership tag
    pub(crate) fn set_layout(&mut self, shape: Shape, strides: Strides) -> Result<()> {
        self.lidxs = index::linearize(&shape, &strides)?;
        self.order = Order::detect(&shape, &strides, self.order);
        self.backstrides = strides.backstrides(&shape);
        self.idxs = ArrayIndices::from_shape(&shape);
        self.shape = shape;
        self.strides = strides;
        Ok(())
    }

    pub(crate) fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Allocates a zero-filled owner with the given shape, in C order
    pub fn zeros(shape: impl Into<Shape>) -> Result<Self> {
        Self::zeros_with(shape, &ArrayConfig::default())
    }

    /// Allocates a zero-filled owner using `config` for order and limits
    pub fn zeros_with(shape: impl Into<Shape>, config: &ArrayConfig) -> Result<Self> {
        let shape = shape.into();
        let len = config.checked_len(&shape)?;
        debug!("Allocating {} array of {} elements ({} order)", shape, len, config.order);
        let storage = Storage::zeroed(len)?;
        let strides = shape.strides_for(config.order);
        Self::with_layout(storage, shape, strides, config.order)
    }

    /// Allocates an owner filled with ones
    pub fn ones(shape: impl Into<Shape>) -> Result<Self> {
        Self::full(shape, 1.0)
    }

    /// Allocates an owner with every element set to `value`
    pub fn full(shape: impl Into<Shape>, value: f32) -> Result<Self> {
        let array = Self::zeros(shape)?;
        array.storage.write().fill(value);
        Ok(array)
    }

    /// Allocates an owner filled with independent uniform samples in `[0, 1)`
    pub fn random(shape: impl Into<Shape>) -> Result<Self> {
        Self::random_with(shape, &ArrayConfig::default())
    }

    /// Like [`Array::random`], seeded from `config` when a seed is set
    pub fn random_with(shape: impl Into<Shape>, config: &ArrayConfig) -> Result<Self> {
        let array = Self::zeros_with(shape, config)?;
        let mut rng = config.rng();
        for value in array.storage.write().iter_mut() {
            *value = rng.gen::<f32>();
        }
        Ok(array)
    }

    /// Rank-1 sequence `start, start + step, ...` strictly bounded by `stop`
    pub fn arange(start: f32, stop: f32, step: f32) -> Result<Self> {
        if step == 0.0 || !start.is_finite() || !stop.is_finite() || !step.is_finite() {
            return Err(ArrayError::invalid_range(
                "ARANGE_INVALID_STEP",
                "Range requires a finite, non-zero step and finite bounds",
                start,
                stop,
                step,
                "Use a non-zero step such as 1.0",
            ));
        }

        let span = (f64::from(stop) - f64::from(start)) / f64::from(step);
        let len = if span > 0.0 { span.ceil() as usize } else { 0 };
        trace!("arange({}, {}, {}) -> {} elements", start, stop, step, len);

        let array = Self::zeros(Shape::vector(len))?;
        {
            let mut data = array.storage.write();
            for (i, value) in data.iter_mut().enumerate() {
                *value = (f64::from(start) + i as f64 * f64::from(step)) as f32;
            }
        }
        Ok(array)
    }

    /// Allocates a C-order owner of `shape` holding `values` in logical order
    pub fn from_shape_vec(shape: impl Into<Shape>, values: Vec<f32>) -> Result<Self> {
        let shape = shape.into();
        let expected = ArrayConfig::default().checked_len(&shape)?;
        ArrayValidator::validate_value_count(expected, values.len(), "array from values")?;
        let strides = Strides::from_shape(&shape);
        Self::with_layout(Storage::from_vec(values), shape, strides, Order::C)
    }

    /// Overwrites every element with `values`, taken in logical order.
    ///
    /// Writes through a view are visible to the owner and to every other
    /// view of the same buffer.
    pub fn fill_from_values(&mut self, values: &[f32]) -> Result<()> {
        ArrayValidator::validate_value_count(self.totalsize(), values.len(), "fill_from_values")?;
        let mut data = self.storage.write();
        for (offset, &value) in self.lidxs.iter().zip(values) {
            data[offset] = value;
        }
        Ok(())
    }

    /// Releases this handle.
    ///
    /// The buffer is freed once the last array referencing it is released;
    /// releasing a view leaves the owner and sibling views intact.
    pub fn release(self) {
        trace!(
            "Releasing {:?} of shape {} ({} handles on buffer)",
            self.storage.ownership(),
            self.shape,
            self.storage.handle_count()
        );
        drop(self);
    }

    /// Shape of the array
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Strides of the array, in elements
    pub fn strides(&self) -> &Strides {
        &self.strides
    }

    /// Per-axis wrap-around corrections, `strides[i] * (shape[i] - 1)`
    pub fn backstrides(&self) -> &[isize] {
        &self.backstrides
    }

    /// Rank of the array
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    /// Element width in bytes
    pub fn itemsize(&self) -> usize {
        ITEMSIZE
    }

    /// Number of elements; one for a scalar
    pub fn totalsize(&self) -> usize {
        self.shape.numel()
    }

    /// Memory order flag
    pub fn order(&self) -> Order {
        self.order
    }

    /// Whether the strides are interpreted as row-major
    pub fn is_c_order(&self) -> bool {
        self.order == Order::C
    }

    /// Whether the strides are interpreted as column-major
    pub fn is_f_order(&self) -> bool {
        self.order == Order::F
    }

    /// Valid coordinate ranges per axis
    pub fn indices(&self) -> &ArrayIndices {
        &self.idxs
    }

    /// Buffer offsets of the row-major logical traversal
    pub fn linear_indices(&self) -> &LinearIndices {
        &self.lidxs
    }

    /// Ownership tag of this handle
    pub fn ownership(&self) -> Ownership {
        self.storage.ownership()
    }

    /// Whether this array allocated its buffer
    pub fn is_owner(&self) -> bool {
        self.ownership() == Ownership::Owner
    }

    /// Whether this array borrows another array's buffer
    pub fn is_view(&self) -> bool {
        self.ownership() == Ownership::View
    }

    /// Whether both arrays read and write the same buffer
    pub fn shares_buffer_with(&self, other: &Array) -> bool {
        self.storage.same_buffer(&other.storage)
    }

    /// Whether the layout is a dense C- or F-order block
    pub fn is_contiguous(&self) -> bool {
        self.strides.is_contiguous(&self.shape)
    }

    /// Whether the layout is a dense row-major block
    pub fn is_c_contiguous(&self) -> bool {
        self.strides.is_c_contiguous(&self.shape)
    }

    /// Whether the layout is a dense column-major block
    pub fn is_f_contiguous(&self) -> bool {
        self.strides.is_f_contiguous(&self.shape)
    }

    /// Exact shape equality; no broadcasting
    pub fn shapes_equal(&self, other: &Array) -> bool {
        self.shape.shapes_equal(&other.shape)
    }

    /// Reads the element at `coord`
    pub fn get(&self, coord: &[usize]) -> Result<f32> {
        if coord.len() != self.ndim() {
            return Err(ArrayError::rank_mismatch(
                "INDEX_RANK_MISMATCH",
                format!("Coordinate has {} entries, array has rank {}", coord.len(), self.ndim()),
                self.ndim().to_string(),
                coord.len(),
                "element access",
                "Supply one coordinate per axis",
            ));
        }
        for (axis, (&c, &extent)) in coord.iter().zip(self.shape.dims()).enumerate() {
            if c >= extent {
                return Err(ArrayError::axis_out_of_range(
                    "INDEX_OUT_OF_BOUNDS",
                    format!("Index {} is out of bounds for axis {} with extent {}", c, axis, extent),
                    axis as i64,
                    self.ndim(),
                    "element access",
                    format!("Use an index below {}", extent),
                ));
            }
        }
        let offset = self.strides.offset(coord) as usize;
        Ok(self.storage.read()[offset])
    }

    /// Elements in logical (row-major) order
    pub fn to_vec(&self) -> Vec<f32> {
        let data = self.storage.read();
        self.lidxs.iter().map(|offset| data[offset]).collect()
    }

    /// Flat logical-order buffer together with its shape, for reconstruction
    /// by a host numeric type
    pub fn export(&self) -> (Vec<f32>, Vec<usize>) {
        (self.to_vec(), self.shape.dims().to_vec())
    }

    /// Materializes the array as a fresh C-order owner
    pub fn contiguous(&self) -> Result<Self> {
        let out = Self::zeros(self.shape.clone())?;
        {
            let src = self.storage.read();
            let mut dst = out.storage.write();
            for (slot, offset) in dst.iter_mut().zip(self.lidxs.iter()) {
                *slot = src[offset];
            }
        }
        Ok(out)
    }
}
