//! Matrix element type constraints
//!
//! This module defines the trait that constrains what types can be stored
//! in the `data` array of a compressed sparse matrix.

use crate::format::DataType;
use num_traits::Zero;

/// Trait for types that can be stored as matrix elements
///
/// Elements are plain old data so raw byte regions can be reinterpreted
/// without copying, and they carry an additive identity which is what a
/// structurally absent entry reads as.
pub trait MatrixElement:
    Copy + PartialEq + core::fmt::Debug + Send + Sync + bytemuck::Pod + Zero + 'static
{
    /// Get the DataType tag for this element type
    fn data_type() -> DataType;

    /// Get the size in bytes of this element type
    fn size_bytes() -> usize {
        core::mem::size_of::<Self>()
    }

    /// Value returned for entries that are not stored
    ///
    /// Always the additive identity. A fresh value is produced per call so
    /// every accessor owns its own copy.
    fn fill_value() -> Self {
        Self::zero()
    }

    /// Convert from f64 for generic construction
    fn from_f64(value: f64) -> Self;

    /// Convert to f64 for generic aggregation
    fn to_f64(self) -> f64;
}

macro_rules! impl_matrix_element {
    ($type:ty, $tag:ident) => {
        impl MatrixElement for $type {
            fn data_type() -> DataType {
                DataType::$tag
            }

            fn from_f64(value: f64) -> Self {
                value as $type
            }

            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

impl_matrix_element!(f32, F32);
impl_matrix_element!(f64, F64);
impl_matrix_element!(i32, I32);
impl_matrix_element!(i64, I64);
impl_matrix_element!(u32, U32);
impl_matrix_element!(u64, U64);
