//! Construction-time configuration for arrays

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{ArrayError, Result};
use crate::shape::{Order, Shape};

/// Configuration applied by the `*_with` constructors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrayConfig {
    /// Memory order of freshly allocated arrays
    pub order: Order,
    /// Upper bound on elements per allocation; `None` means unbounded
    pub max_elements: Option<usize>,
    /// Seed for `random_with`; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            order: Order::C,
            max_elements: None,
            seed: None,
        }
    }
}

impl ArrayConfig {
    /// Sets the memory order
    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    /// Sets the per-allocation element ceiling
    pub fn with_max_elements(mut self, max_elements: usize) -> Self {
        self.max_elements = Some(max_elements);
        self
    }

    /// Sets the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Element count for `shape`, checked against overflow and the ceiling
    pub fn checked_len(&self, shape: &Shape) -> Result<usize> {
        let len = shape.checked_numel().ok_or_else(|| {
            ArrayError::allocation_failure(
                "ALLOC_ELEMENT_COUNT_OVERFLOW",
                format!("Element count of shape {} overflows usize", shape),
                usize::MAX,
                "Use smaller extents",
            )
        })?;

        match self.max_elements {
            Some(max) if len > max => Err(ArrayError::allocation_failure(
                "ALLOC_EXCEEDS_LIMIT",
                format!("Shape {} needs {} elements, limit is {}", shape, len, max),
                len,
                "Raise max_elements or use a smaller shape",
            )),
            _ => Ok(len),
        }
    }

    /// Random generator honouring `seed`
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
