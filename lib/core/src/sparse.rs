//! Sparse feature vectors

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A sparse feature vector: only nonzero entries are stored, in increasing index order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SparseVector {
    dim: usize,
    indices: Vec<u32>,
    values: Vec<f32>,
}

impl SparseVector {
    /// An all-zero vector of the given dimension
    #[inline]
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build from `(index, value)` pairs.
    ///
    /// Pairs may arrive in any order; zero values are dropped. Duplicate or
    /// out-of-range indices are rejected.
    pub fn from_pairs(dim: usize, mut pairs: Vec<(u32, f32)>) -> Result<Self> {
        pairs.sort_by_key(|(idx, _)| *idx);

        let mut indices = Vec::with_capacity(pairs.len());
        let mut values = Vec::with_capacity(pairs.len());
        let mut previous: Option<u32> = None;
        for (idx, value) in pairs {
            if idx as usize >= dim {
                return Err(Error::InvalidDimension {
                    expected: dim,
                    actual: idx as usize + 1,
                });
            }
            if previous == Some(idx) {
                return Err(Error::InvalidArtifact(format!(
                    "duplicate feature index {}",
                    idx
                )));
            }
            previous = Some(idx);
            if value != 0.0 {
                indices.push(idx);
                values.push(value);
            }
        }

        Ok(Self { dim, indices, values })
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored (nonzero) entries
    #[inline]
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Value at `index`, zero when the entry is not stored
    #[inline]
    pub fn get(&self, index: usize) -> f32 {
        match self.indices.binary_search(&(index as u32)) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    /// Nonzero entries in feature order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.indices
            .iter()
            .zip(self.values.iter())
            .map(|(&idx, &value)| (idx as usize, value))
    }

    #[inline]
    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }

    /// Dot product against a dense weight vector of the same dimension
    #[inline]
    pub fn dot(&self, dense: &[f32]) -> f32 {
        self.iter()
            .map(|(idx, value)| value * dense.get(idx).copied().unwrap_or(0.0))
            .sum()
    }

    #[must_use]
    pub fn to_dense(&self) -> Vec<f32> {
        let mut dense = vec![0.0; self.dim];
        for (idx, value) in self.iter() {
            dense[idx] = value;
        }
        dense
    }
}
