//! Lazily materialized sequence handle
//!
//! Blocks are pulled from an external [`BlockSource`] on first touch and kept
//! in a bounded cache owned by the handle. Duplicates start with a copy of
//! the cache (the blocks themselves are shared), so duplication never goes
//! back to the store.

use hashbrown::HashMap;
use sparx_core::{PositionalAccess, Result, SparxError};
use std::collections::VecDeque;
use std::sync::Arc;

/// External store delivering a sequence in fixed-length blocks
///
/// Implementations must be safe to call from several handles at once; each
/// handle fetches independently. Retry policy, if any, belongs here and not
/// in the access engine.
pub trait BlockSource<T>: Send + Sync {
    /// Total number of elements in the sequence
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements per block; only the final block may be shorter
    fn block_len(&self) -> usize;

    /// Fetch block `block`, covering positions `block * block_len()..`
    fn fetch_block(&self, block: usize) -> Result<Vec<T>>;
}

/// In-memory block source, useful as a stand-in for a chunked remote array
pub struct ChunkedArraySource<T> {
    values: Vec<T>,
    block_len: usize,
}

impl<T: Copy + Send + Sync> ChunkedArraySource<T> {
    pub fn new(values: Vec<T>, block_len: usize) -> Self {
        Self {
            values,
            block_len: block_len.max(1),
        }
    }
}

impl<T: Copy + Send + Sync> BlockSource<T> for ChunkedArraySource<T> {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn block_len(&self) -> usize {
        self.block_len
    }

    fn fetch_block(&self, block: usize) -> Result<Vec<T>> {
        let start = block * self.block_len;
        if start >= self.values.len() {
            return Err(SparxError::backing_store(start, "block index past end of source"));
        }
        let end = (start + self.block_len).min(self.values.len());
        Ok(self.values[start..end].to_vec())
    }
}

/// Hit/miss counters for one handle's block cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub fetches: u64,
    pub evictions: u64,
}

/// Sequence handle backed by a [`BlockSource`]
pub struct LazySequence<T> {
    source: Arc<dyn BlockSource<T>>,
    len: usize,
    block_len: usize,
    capacity: usize,
    blocks: HashMap<usize, Arc<[T]>>,
    // insertion order for FIFO eviction
    order: VecDeque<usize>,
    stats: CacheStats,
}

impl<T: Copy + 'static> LazySequence<T> {
    /// Create a handle caching at most `cache_blocks` blocks (minimum one)
    pub fn new(source: Arc<dyn BlockSource<T>>, cache_blocks: usize) -> Self {
        let len = source.len();
        let block_len = source.block_len().max(1);
        Self {
            source,
            len,
            block_len,
            capacity: cache_blocks.max(1),
            blocks: HashMap::new(),
            order: VecDeque::new(),
            stats: CacheStats::default(),
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn cached_blocks(&self) -> usize {
        self.blocks.len()
    }

    fn expected_block_len(&self, block: usize) -> usize {
        let start = block * self.block_len;
        self.block_len.min(self.len - start)
    }

    fn load(&mut self, block: usize) -> Result<Arc<[T]>> {
        if let Some(values) = self.blocks.get(&block) {
            self.stats.hits += 1;
            return Ok(Arc::clone(values));
        }

        tracing::trace!(block, block_len = self.block_len, "fetching block");
        let values = self.source.fetch_block(block)?;
        let start = block * self.block_len;
        if values.len() != self.expected_block_len(block) {
            tracing::warn!(
                block,
                expected = self.expected_block_len(block),
                actual = values.len(),
                "block source returned a block of unexpected length"
            );
            return Err(SparxError::backing_store(start, "block has unexpected length"));
        }
        self.stats.fetches += 1;

        let values: Arc<[T]> = values.into();
        if self.blocks.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.blocks.remove(&oldest);
                self.stats.evictions += 1;
            }
        }
        self.blocks.insert(block, Arc::clone(&values));
        self.order.push_back(block);

        Ok(values)
    }
}

impl<T: Copy + 'static> PositionalAccess for LazySequence<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.len
    }

    fn get(&mut self, pos: usize) -> Result<T> {
        if pos >= self.len {
            return Err(SparxError::backing_store(pos, "position past end of sequence"));
        }

        let block = pos / self.block_len;
        let values = self.load(block)?;
        values
            .get(pos % self.block_len)
            .copied()
            .ok_or(SparxError::backing_store(pos, "block has unexpected length"))
    }

    fn duplicate(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            len: self.len,
            block_len: self.block_len,
            capacity: self.capacity,
            blocks: self.blocks.clone(),
            order: self.order.clone(),
            stats: CacheStats::default(),
        }
    }
}
