//! Validation utilities
//!
//! Pure functions with no I/O dependencies: byte-region checks used when
//! arrays are opened, structural checks of the compressed layout, and parsing
//! of textual specifications.

pub mod bounds;
pub mod parsing;
pub mod structure;

pub use bounds::{validate_alignment, validate_array_bounds, validate_region, validate_typed_slice};
pub use parsing::{parse_range, parse_shape};
pub use structure::{validate_indptr, validate_runs};
