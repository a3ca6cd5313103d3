//! Coordinate to compressed-storage translation
//!
//! Maps a dense `(row, col)` coordinate onto the run that holds it and the
//! secondary-axis value to look for inside that run.

use crate::error::{Result, SparxError};
use crate::format::constants::MATRIX_DIMENSIONS;
use crate::format::{Orientation, StorageDescriptor};

/// Pure mapping from coordinates to `(run index, target value)`
///
/// Must use the same orientation the storage was populated with; a CSR
/// resolver over CSC arrays yields well-formed but meaningless lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerResolver {
    orientation: Orientation,
    extents: [usize; MATRIX_DIMENSIONS],
}

impl PointerResolver {
    /// Create a resolver for a matrix of `(rows, cols)` extents
    pub const fn new(orientation: Orientation, extents: [usize; MATRIX_DIMENSIONS]) -> Self {
        Self {
            orientation,
            extents,
        }
    }

    pub fn from_descriptor(descriptor: &StorageDescriptor) -> Result<Self> {
        let rows = usize::try_from(descriptor.nrows()).map_err(|_| SparxError::ArraySizeOverflow)?;
        let cols = usize::try_from(descriptor.ncols()).map_err(|_| SparxError::ArraySizeOverflow)?;
        Ok(Self::new(descriptor.orientation, [rows, cols]))
    }

    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub const fn extents(&self) -> [usize; MATRIX_DIMENSIONS] {
        self.extents
    }

    pub const fn num_dimensions(&self) -> usize {
        MATRIX_DIMENSIONS
    }

    /// Number of runs, so `indptr` must hold one more entry than this
    pub const fn major_extent(&self) -> usize {
        self.extents[self.orientation.major_axis()]
    }

    /// Exclusive upper bound of every value stored in `indices`
    pub const fn minor_extent(&self) -> usize {
        self.extents[self.orientation.minor_axis()]
    }

    /// Validate `coordinate` and return `(major index, secondary target)`
    pub fn resolve(&self, coordinate: &[i64]) -> Result<(usize, i64)> {
        self.check(coordinate)?;
        let major = coordinate[self.orientation.major_axis()];
        let minor = coordinate[self.orientation.minor_axis()];
        // check() guarantees 0 <= major < extent
        Ok((major as usize, minor))
    }

    /// Run index addressed by `coordinate`
    pub fn target_pointer(&self, coordinate: &[i64]) -> Result<usize> {
        self.resolve(coordinate).map(|(major, _)| major)
    }

    /// Secondary-axis value searched for inside the run
    pub fn target_cursor(&self, coordinate: &[i64]) -> Result<i64> {
        self.resolve(coordinate).map(|(_, minor)| minor)
    }

    /// Whether `coordinate` lies inside the declared extents
    pub fn contains(&self, coordinate: &[i64]) -> bool {
        self.check(coordinate).is_ok()
    }

    fn check(&self, coordinate: &[i64]) -> Result<()> {
        if coordinate.len() != MATRIX_DIMENSIONS {
            return Err(SparxError::DimensionMismatch {
                expected: MATRIX_DIMENSIONS,
                actual: coordinate.len(),
            });
        }

        for (axis, (&position, &extent)) in coordinate.iter().zip(self.extents.iter()).enumerate() {
            let inside = usize::try_from(position).is_ok_and(|p| p < extent);
            if !inside {
                return Err(SparxError::OutOfRangeCoordinate {
                    axis,
                    position,
                    extent,
                });
            }
        }

        Ok(())
    }
}
