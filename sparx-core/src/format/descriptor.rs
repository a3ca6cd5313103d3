//! Description of a stored compressed sparse matrix

use super::types::{DataType, IndexType, Orientation};
use crate::error::{Result, SparxError};

/// Shape, orientation and element types of a compressed sparse matrix
///
/// Produced by whatever layer reads the matrix from disk; the access engine
/// only needs it to size the resolver and to sanity-check array lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StorageDescriptor {
    pub orientation: Orientation,
    /// Logical `(rows, cols)` shape
    pub shape: [u64; 2],
    /// Number of explicitly stored entries
    pub nnz: u64,
    pub data_type: DataType,
    pub index_type: IndexType,
}

impl StorageDescriptor {
    pub const fn new(
        orientation: Orientation,
        shape: [u64; 2],
        nnz: u64,
        data_type: DataType,
        index_type: IndexType,
    ) -> Self {
        Self {
            orientation,
            shape,
            nnz,
            data_type,
            index_type,
        }
    }

    pub const fn nrows(&self) -> u64 {
        self.shape[0]
    }

    pub const fn ncols(&self) -> u64 {
        self.shape[1]
    }

    /// Number of runs, i.e. `indptr.len() - 1`
    pub const fn major_extent(&self) -> u64 {
        self.shape[self.orientation.major_axis()]
    }

    pub const fn minor_extent(&self) -> u64 {
        self.shape[self.orientation.minor_axis()]
    }

    /// Expected length of each backing array as `(data, indices, indptr)`
    pub fn array_lengths(&self) -> Result<(usize, usize, usize)> {
        let nnz = usize::try_from(self.nnz).map_err(|_| SparxError::ArraySizeOverflow)?;
        let runs = usize::try_from(self.major_extent()).map_err(|_| SparxError::ArraySizeOverflow)?;
        let indptr = runs.checked_add(1).ok_or(SparxError::ArraySizeOverflow)?;
        Ok((nnz, nnz, indptr))
    }

    /// Check that the descriptor is internally consistent
    pub fn validate(&self) -> Result<()> {
        let total = self
            .shape[0]
            .checked_mul(self.shape[1])
            .ok_or(SparxError::ArraySizeOverflow)?;

        if self.nnz > total {
            return Err(SparxError::corruption(
                0,
                "more stored entries than matrix cells",
            ));
        }

        self.array_lengths().map(|_| ())
    }

    /// Fraction of cells explicitly stored
    pub fn density(&self) -> f64 {
        let total = self.shape[0] as f64 * self.shape[1] as f64;
        if total == 0.0 {
            0.0
        } else {
            self.nnz as f64 / total
        }
    }
}
