//! Memory-mapped sequence handle
//!
//! Views a region of a read-only memory map as a typed array. The map is
//! shared between duplicates through an `Arc`, so the mapping stays alive as
//! long as any handle does.

use memmap2::{Mmap, MmapOptions};
use sparx_core::validation::{validate_region, validate_typed_slice};
use sparx_core::{PositionalAccess, Result, SparxError};
use std::{fs::File, marker::PhantomData, path::Path, sync::Arc};

/// Typed, zero-copy view over a region of a memory-mapped file
///
/// Values are read in host byte order; files written little-endian are only
/// accepted on little-endian hosts.
pub struct MmapSequence<T> {
    // None for zero-length files, which cannot be mapped portably
    map: Option<Arc<Mmap>>,
    offset: usize,
    len: usize,
    _phantom: PhantomData<T>,
}

impl<T: bytemuck::Pod> MmapSequence<T> {
    /// Map a whole file holding nothing but raw `T` values
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if cfg!(target_endian = "big") {
            return Err(SparxError::backing_store(
                0,
                "raw little-endian arrays are not supported on big-endian hosts",
            ));
        }

        let path = path.as_ref();
        let file = File::open(path).map_err(|err| {
            tracing::error!(path = %path.display(), %err, "failed to open array file");
            SparxError::backing_store(0, "failed to open array file")
        })?;

        let file_len = file
            .metadata()
            .map_err(|err| {
                tracing::error!(path = %path.display(), %err, "failed to stat array file");
                SparxError::backing_store(0, "failed to stat array file")
            })?
            .len();

        if file_len == 0 {
            return Ok(Self::empty());
        }

        // SAFETY: The mapping is read-only and the file is treated as
        // immutable for the lifetime of every handle, matching the storage
        // lifecycle. Every read is bounds-checked against the mapped length.
        let map = unsafe {
            MmapOptions::new().map(&file).map_err(|err| {
                tracing::error!(path = %path.display(), %err, "failed to memory map array file");
                SparxError::backing_store(0, "failed to memory map array file")
            })?
        };

        let byte_len = map.len();
        tracing::debug!(path = %path.display(), bytes = byte_len, "mapped array file");
        Self::from_shared(Arc::new(map), 0, byte_len)
    }

    /// View `byte_len` bytes starting at `offset` of an existing mapping
    pub fn from_shared(map: Arc<Mmap>, offset: usize, byte_len: usize) -> Result<Self> {
        validate_region(offset, byte_len, map.len())?;
        let len = validate_typed_slice::<T>(&map[offset..offset + byte_len])?;

        Ok(Self {
            map: Some(map),
            offset,
            len,
            _phantom: PhantomData,
        })
    }

    fn empty() -> Self {
        Self {
            map: None,
            offset: 0,
            len: 0,
            _phantom: PhantomData,
        }
    }

    /// Typed view of the whole region
    pub fn as_slice(&self) -> Result<&[T]> {
        let Some(map) = &self.map else {
            return Ok(&[]);
        };
        let end = self.offset + self.len * std::mem::size_of::<T>();
        bytemuck::try_cast_slice(&map[self.offset..end])
            .map_err(|_| SparxError::ArrayAlignment)
    }
}

impl<T: bytemuck::Pod> PositionalAccess for MmapSequence<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.len
    }

    fn get(&mut self, pos: usize) -> Result<T> {
        self.as_slice()?
            .get(pos)
            .copied()
            .ok_or(SparxError::backing_store(pos, "position past end of mapped array"))
    }

    fn duplicate(&self) -> Self {
        Self {
            map: self.map.clone(),
            offset: self.offset,
            len: self.len,
            _phantom: PhantomData,
        }
    }
}
