//! In-memory sequence handle

use sparx_core::{PositionalAccess, Result, SparxError};
use std::sync::Arc;

/// Shared, immutable in-memory sequence
///
/// Duplication clones the `Arc`, so any number of traversals can read the
/// same allocation without copying it.
#[derive(Debug)]
pub struct ArraySequence<T> {
    values: Arc<[T]>,
}

impl<T: Copy> ArraySequence<T> {
    pub fn new(values: impl Into<Arc<[T]>>) -> Self {
        Self {
            values: values.into(),
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }
}

impl<T: Copy> From<Vec<T>> for ArraySequence<T> {
    fn from(values: Vec<T>) -> Self {
        Self::new(values)
    }
}

impl<T: Copy> PositionalAccess for ArraySequence<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.values.len()
    }

    fn get(&mut self, pos: usize) -> Result<T> {
        self.values
            .get(pos)
            .copied()
            .ok_or(SparxError::backing_store(pos, "position past end of sequence"))
    }

    fn duplicate(&self) -> Self {
        Self {
            values: Arc::clone(&self.values),
        }
    }
}
