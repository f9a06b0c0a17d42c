//! Element buffers and the owner/view tag
//!
//! A buffer is allocated once by a constructor and shared by every view
//! derived from it. Each [`Storage`] handle records whether it is the
//! owner that allocated the buffer or a view that borrowed it; the buffer
//! itself is freed when the last handle referencing it is released, so a
//! view never observes freed memory and no buffer is freed twice.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ArrayError, Result};

/// Whether an array allocated its buffer or borrows another array's
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ownership {
    /// Allocated the buffer
    Owner,
    /// Shares a buffer allocated by another array
    View,
}

/// Handle to a shared `f32` buffer
#[derive(Debug)]
pub struct Storage {
    buffer: Arc<RwLock<Vec<f32>>>,
    ownership: Ownership,
}

impl Storage {
    /// Allocates a zero-filled buffer of `len` elements
    pub fn zeroed(len: usize) -> Result<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|e| {
            ArrayError::allocation_failure(
                "STORAGE_ALLOCATION_FAILED",
                format!("Failed to allocate element buffer: {}", e),
                len,
                "Reduce the array size",
            )
        })?;
        data.resize(len, 0.0);
        trace!("Allocated buffer of {} elements", len);
        Ok(Self::from_vec(data))
    }

    /// Takes ownership of an existing vector
    pub fn from_vec(data: Vec<f32>) -> Self {
        Self {
            buffer: Arc::new(RwLock::new(data)),
            ownership: Ownership::Owner,
        }
    }

    /// Creates a view handle onto the same buffer
    pub fn share(&self) -> Self {
        Self {
            buffer: Arc::clone(&self.buffer),
            ownership: Ownership::View,
        }
    }

    /// Ownership tag of this handle
    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    /// Number of elements in the underlying buffer
    pub fn len(&self) -> usize {
        self.buffer.read().len()
    }

    /// Whether the buffer holds no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shared read access to the buffer
    pub fn read(&self) -> RwLockReadGuard<'_, Vec<f32>> {
        self.buffer.read()
    }

    /// Exclusive write access to the buffer; visible through every view
    pub fn write(&self) -> RwLockWriteGuard<'_, Vec<f32>> {
        self.buffer.write()
    }

    /// Whether two handles address the same buffer
    pub fn same_buffer(&self, other: &Storage) -> bool {
        Arc::ptr_eq(&self.buffer, &other.buffer)
    }

    /// Number of live handles (owner and views) on this buffer
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.buffer)
    }
}
