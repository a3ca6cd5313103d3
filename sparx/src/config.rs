//! Access configuration

use crate::accessor::SearchStrategy;
use crate::storage::lazy::{ChunkedArraySource, LazySequence};
use std::sync::Arc;

/// Default number of elements per lazily fetched block
pub const DEFAULT_BLOCK_LEN: usize = 64 * 1024;

/// Default number of blocks each lazy handle keeps cached
pub const DEFAULT_CACHE_BLOCKS: usize = 16;

/// Tuning knobs for opening storage and building accessors
///
/// `search` and `validate_on_open` apply to [`SparseAccessor::open`](crate::SparseAccessor::open).
/// The block settings only shape in-memory lazy handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AccessConfig {
    /// In-run search used by accessors
    pub search: SearchStrategy,
    /// Run full structural validation before the first read
    pub validate_on_open: bool,
    /// Elements per block for handles built by [`AccessConfig::chunked`]
    pub block_len: usize,
    /// Blocks cached per handle built by [`AccessConfig::chunked`]
    ///
    /// Handles over a custom [`BlockSource`](crate::BlockSource) take their
    /// block length from the source and their cache size from
    /// [`LazySequence::new`].
    pub cache_blocks: usize,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            search: SearchStrategy::default(),
            validate_on_open: false,
            block_len: DEFAULT_BLOCK_LEN,
            cache_blocks: DEFAULT_CACHE_BLOCKS,
        }
    }
}

impl AccessConfig {
    pub fn with_search(mut self, search: SearchStrategy) -> Self {
        self.search = search;
        self
    }

    pub fn with_validate_on_open(mut self, validate: bool) -> Self {
        self.validate_on_open = validate;
        self
    }

    /// Set the block length, clamped to at least one element
    pub fn with_block_len(mut self, block_len: usize) -> Self {
        self.block_len = block_len.max(1);
        self
    }

    /// Set the per-handle cache size, clamped to at least one block
    pub fn with_cache_blocks(mut self, cache_blocks: usize) -> Self {
        self.cache_blocks = cache_blocks.max(1);
        self
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    #[cfg(feature = "serde")]
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Lazy handle over in-memory values, blocked and cached as configured
    pub fn chunked<T>(&self, values: Vec<T>) -> LazySequence<T>
    where
        T: Copy + Send + Sync + 'static,
    {
        let source = Arc::new(ChunkedArraySource::new(values, self.block_len));
        LazySequence::new(source, self.cache_blocks)
    }
}
