//! Integer types usable for `indices` and `indptr`

use crate::error::{Result, SparxError};
use crate::format::IndexType;

/// Trait for integer types stored in the `indices` and `indptr` arrays
///
/// Secondary-axis coordinates are compared as exact `i64` values. Offsets read
/// from `indptr` must convert to a `usize` position; a negative or oversized
/// offset means the storage is corrupt.
pub trait IndexElement:
    Copy + Ord + core::fmt::Debug + Send + Sync + bytemuck::Pod + 'static
{
    fn index_type() -> IndexType;

    /// Widen to `i64` for comparison against a target coordinate
    ///
    /// Unsigned values beyond `i64::MAX` saturate, which keeps them ordered
    /// after every valid coordinate.
    fn to_i64(self) -> i64;

    /// Narrow from a position, failing if it does not fit
    fn from_usize(value: usize) -> Option<Self>;

    /// Interpret as an array position read from `indptr` slot `slot`
    fn to_offset(self, slot: usize) -> Result<usize> {
        usize::try_from(self.to_i64())
            .map_err(|_| SparxError::corruption(slot, "negative offset in indptr"))
    }
}

macro_rules! impl_index_element {
    ($type:ty, $tag:ident) => {
        impl IndexElement for $type {
            fn index_type() -> IndexType {
                IndexType::$tag
            }

            fn to_i64(self) -> i64 {
                i64::try_from(self).unwrap_or(i64::MAX)
            }

            fn from_usize(value: usize) -> Option<Self> {
                <$type>::try_from(value).ok()
            }
        }
    };
}

impl_index_element!(i32, I32);
impl_index_element!(i64, I64);
impl_index_element!(u32, U32);
impl_index_element!(u64, U64);
