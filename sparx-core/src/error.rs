//! Error types for sparse random access
//!
//! Every failure surfaced by this workspace is one of these variants. They are
//! plain values: a traversal that hits one can abort itself without taking the
//! rest of the process down with it.

use thiserror::Error;

/// Errors that can occur while resolving or reading compressed sparse storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SparxError {
    /// Coordinate lies outside the declared extent on one axis
    #[error("coordinate {position} on axis {axis} is outside extent {extent}")]
    OutOfRangeCoordinate {
        axis: usize,
        position: i64,
        extent: usize,
    },
    /// Coordinate has a different number of dimensions than the matrix
    #[error("expected a {expected}-dimensional coordinate, got {actual} dimensions")]
    DimensionMismatch { expected: usize, actual: usize },
    /// Backing arrays violate the compressed storage invariants
    #[error("storage corruption at position {position}: {reason}")]
    StorageCorruption {
        position: usize,
        reason: &'static str,
    },
    /// An underlying block or region could not be fetched
    #[error("backing store failure at offset {offset}: {reason}")]
    BackingStoreFailure {
        offset: usize,
        reason: &'static str,
    },
    /// Malformed range or shape specification
    #[error("invalid range")]
    InvalidRange,
    /// Byte region is not aligned for the requested element type
    #[error("array alignment error")]
    ArrayAlignment,
    /// Byte region is too large to index safely
    #[error("array size overflow")]
    ArraySizeOverflow,
    /// Axis label appears more than once
    #[error("duplicate label at index {index}")]
    DuplicateLabel { index: usize },
}

/// Broad classification used by callers deciding whether to abort a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller asked for something invalid
    Caller,
    /// The stored arrays themselves are invalid
    Corruption,
    /// The external store failed to deliver data
    Backend,
    /// Raw bytes or textual input could not be interpreted
    Format,
}

impl SparxError {
    pub const fn corruption(position: usize, reason: &'static str) -> Self {
        SparxError::StorageCorruption { position, reason }
    }

    pub const fn backing_store(offset: usize, reason: &'static str) -> Self {
        SparxError::BackingStoreFailure { offset, reason }
    }

    pub const fn category(&self) -> ErrorCategory {
        match self {
            SparxError::OutOfRangeCoordinate { .. } | SparxError::DimensionMismatch { .. } => {
                ErrorCategory::Caller
            }
            SparxError::StorageCorruption { .. } => ErrorCategory::Corruption,
            SparxError::BackingStoreFailure { .. } => ErrorCategory::Backend,
            SparxError::InvalidRange
            | SparxError::ArrayAlignment
            | SparxError::ArraySizeOverflow
            | SparxError::DuplicateLabel { .. } => ErrorCategory::Format,
        }
    }

    /// True when the backing data itself is invalid and no retry can help
    pub const fn is_fatal(&self) -> bool {
        matches!(self.category(), ErrorCategory::Corruption)
    }
}

/// Result type for sparx operations
pub type Result<T> = core::result::Result<T, SparxError>;
