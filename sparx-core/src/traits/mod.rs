//! Abstract interfaces
//!
//! Traits are pure interfaces; concrete handles and accessors live in the
//! implementation crate.

pub mod access;
pub mod element;
pub mod index;
pub mod sampler;

pub use access::PositionalAccess;
pub use element::MatrixElement;
pub use index::IndexElement;
pub use sampler::PointSampler;
