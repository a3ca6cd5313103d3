//! Sparx - random access over compressed sparse matrices
//!
//! This library presents CSR and CSC matrices held in external storage as
//! dense, point-addressable arrays, reading only what each lookup touches.
//!
//! ## Architecture
//!
//! Sparx keeps format definitions apart from their I/O:
//!
//! - **sparx-core**: error types, element traits, orientation, the pointer
//!   resolver and structural validation (`no_std`, no I/O)
//! - **sparx**: storage handles, the stateful accessor, cursors, parallel
//!   traversal and the inspection CLI
//!
//! ## Quick Start
//!
//! ```rust
//! use sparx::{ArraySequence, CompressedStorage, Orientation, PointerResolver, SparseAccessor};
//!
//! fn example() -> sparx::Result<()> {
//!     // [[5, 0, 9],
//!     //  [0, 0, 0]]
//!     let storage = CompressedStorage::new(
//!         ArraySequence::from(vec![5.0f32, 9.0]),
//!         ArraySequence::from(vec![0i32, 2]),
//!         ArraySequence::from(vec![0i32, 2, 2]),
//!         PointerResolver::new(Orientation::Csr, [2, 3]),
//!     )?;
//!     let mut accessor = SparseAccessor::new(storage);
//!
//!     assert_eq!(accessor.get_at(&[0, 2])?, 9.0);
//!     assert_eq!(accessor.get_at(&[0, 1])?, 0.0);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! ## Concurrency
//!
//! An accessor serves one traversal at a time. Use
//! [`SparseAccessor::duplicate`] to give each thread its own; duplicates
//! share the backing arrays but never search state. [`par_map_lines`] does
//! this for you on the rayon pool.

pub use sparx_core::{
    // Core traits
    IndexElement, MatrixElement, PointSampler, PositionalAccess,
    // Format definitions
    DataType, IndexType, Orientation, PointerResolver, StorageDescriptor,
    // Error handling
    ErrorCategory, Result, SparxError,
    // Validation utilities
    parse_range, parse_shape,
};

pub mod accessor;
pub mod config;
pub mod cursor;
pub mod labels;
pub mod parallel;
pub mod storage;

pub use accessor::{SearchState, SearchStrategy, SparseAccessor};
pub use config::AccessConfig;
pub use cursor::LineCursor;
pub use labels::AxisLabels;
pub use parallel::{line_sums, par_map_lines};
pub use storage::lazy::{CacheStats, ChunkedArraySource};
pub use storage::{ArraySequence, BlockSource, CompressedStorage, LazySequence, Run};

#[cfg(feature = "mmap")]
pub use storage::MmapSequence;

#[cfg(all(feature = "mmap", feature = "serde"))]
pub use storage::{directory::MappedStorage, RawArrayDirectory};
