//! Storage layout definitions
//!
//! Pure descriptions of how a compressed sparse matrix is laid out. No I/O
//! happens here; loaders in the implementation crate consume these types.

pub mod constants;
pub mod descriptor;
pub mod types;

pub use descriptor::StorageDescriptor;
pub use types::{DataType, IndexType, Orientation};
