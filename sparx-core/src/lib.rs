#![no_std]

//! Sparx Core - definitions for random access over compressed sparse matrices
//!
//! This crate holds the pure, I/O-free half of sparx: the error taxonomy,
//! element and index traits, orientation and descriptor types, the
//! coordinate resolver and the structural validation helpers.

#[cfg(test)]
extern crate std;

pub mod error;
pub mod format;
pub mod resolver;
pub mod traits;
pub mod validation;

pub use error::*;
pub use format::*;
pub use resolver::PointerResolver;
pub use traits::*;
pub use validation::{
    parse_range, parse_shape, validate_array_bounds, validate_indptr, validate_runs,
};
