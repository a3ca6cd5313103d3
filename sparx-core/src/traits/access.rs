//! Positional access to the backing arrays
//!
//! The access engine reads `data`, `indices` and `indptr` only through this
//! interface, so where the bytes come from (a slice, a memory map, a lazily
//! fetched remote store) stays invisible to it.

use crate::error::{Result, SparxError};

/// Random-access handle over one backing sequence
///
/// Reads take `&mut self` because a handle is allowed to materialize blocks
/// into a cache it owns. One handle therefore serves one traversal at a time;
/// independent traversals each obtain their own handle through
/// [`PositionalAccess::duplicate`].
pub trait PositionalAccess {
    /// Element type stored in the sequence
    type Item: Copy;

    /// Number of elements in the sequence
    fn len(&self) -> usize;

    /// Whether the sequence has no elements
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the element at `pos`
    ///
    /// Fails with `BackingStoreFailure` if the position is past the end or if
    /// the underlying block could not be fetched.
    fn get(&mut self, pos: usize) -> Result<Self::Item>;

    /// Create an independent handle over the same immutable storage
    ///
    /// Must not re-read the backing store: only in-memory state is copied.
    fn duplicate(&self) -> Self
    where
        Self: Sized;
}

/// Borrowed slices are the simplest handle: duplication copies the reference
impl<'a, T: Copy> PositionalAccess for &'a [T] {
    type Item = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn get(&mut self, pos: usize) -> Result<T> {
        <[T]>::get(self, pos)
            .copied()
            .ok_or(SparxError::backing_store(pos, "position past end of sequence"))
    }

    fn duplicate(&self) -> Self {
        *self
    }
}
