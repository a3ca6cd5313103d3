//! Raw array directory loader
//!
//! A minimal external-store layout: a directory with a JSON descriptor and
//! one raw little-endian file per backing array. Each array is memory-mapped
//! on open; nothing is copied.

use super::{CompressedStorage, MmapSequence};
use sparx_core::format::constants::{DATA_FILE, DESCRIPTOR_FILE, INDICES_FILE, INDPTR_FILE};
use sparx_core::{
    IndexElement, MatrixElement, Orientation, PointerResolver, Result, SparxError,
    StorageDescriptor,
};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Memory-mapped storage as opened from a raw array directory
pub type MappedStorage<T, I> = CompressedStorage<MmapSequence<T>, MmapSequence<I>, MmapSequence<I>>;

/// Handle on a directory holding `descriptor.json`, `data.bin`,
/// `indices.bin` and `indptr.bin`
#[derive(Debug, Clone)]
pub struct RawArrayDirectory {
    root: PathBuf,
    descriptor: StorageDescriptor,
}

impl RawArrayDirectory {
    /// Read and validate the descriptor of an existing directory
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let path = root.join(DESCRIPTOR_FILE);

        let text = fs::read_to_string(&path).map_err(|err| {
            tracing::error!(path = %path.display(), %err, "failed to read descriptor");
            SparxError::backing_store(0, "failed to read descriptor")
        })?;
        let descriptor: StorageDescriptor = serde_json::from_str(&text).map_err(|err| {
            tracing::error!(path = %path.display(), %err, "failed to parse descriptor");
            SparxError::backing_store(0, "failed to parse descriptor")
        })?;
        descriptor.validate()?;

        tracing::debug!(
            root = %root.display(),
            orientation = %descriptor.orientation,
            nnz = descriptor.nnz,
            data_type = %descriptor.data_type,
            index_type = %descriptor.index_type,
            "opened raw array directory"
        );

        Ok(Self { root, descriptor })
    }

    /// Write a matrix into `root`, creating the directory if needed
    pub fn write<T, I, P>(
        root: P,
        orientation: Orientation,
        shape: [u64; 2],
        data: &[T],
        indices: &[I],
        indptr: &[I],
    ) -> Result<Self>
    where
        T: MatrixElement,
        I: IndexElement,
        P: AsRef<Path>,
    {
        let root = root.as_ref().to_path_buf();
        let descriptor = StorageDescriptor::new(
            orientation,
            shape,
            data.len() as u64,
            T::data_type(),
            I::index_type(),
        );
        descriptor.validate()?;

        fs::create_dir_all(&root).map_err(|err| {
            tracing::error!(root = %root.display(), %err, "failed to create directory");
            SparxError::backing_store(0, "failed to create directory")
        })?;

        let json = serde_json::to_string_pretty(&descriptor).map_err(|err| {
            tracing::error!(%err, "failed to serialize descriptor");
            SparxError::backing_store(0, "failed to serialize descriptor")
        })?;

        write_file(&root.join(DESCRIPTOR_FILE), json.as_bytes())?;
        write_file(&root.join(DATA_FILE), bytemuck::cast_slice(data))?;
        write_file(&root.join(INDICES_FILE), bytemuck::cast_slice(indices))?;
        write_file(&root.join(INDPTR_FILE), bytemuck::cast_slice(indptr))?;

        Ok(Self { root, descriptor })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn descriptor(&self) -> &StorageDescriptor {
        &self.descriptor
    }

    /// Map the three arrays as a typed storage view
    ///
    /// `T` and `I` must match the descriptor's element and index types.
    pub fn storage<T, I>(&self) -> Result<MappedStorage<T, I>>
    where
        T: MatrixElement,
        I: IndexElement,
    {
        if T::data_type() != self.descriptor.data_type {
            return Err(SparxError::backing_store(
                0,
                "descriptor data type does not match the requested element type",
            ));
        }
        if I::index_type() != self.descriptor.index_type {
            return Err(SparxError::backing_store(
                0,
                "descriptor index type does not match the requested index type",
            ));
        }

        let data = MmapSequence::<T>::open(self.root.join(DATA_FILE))?;
        let indices = MmapSequence::<I>::open(self.root.join(INDICES_FILE))?;
        let indptr = MmapSequence::<I>::open(self.root.join(INDPTR_FILE))?;

        let (nnz, _, _) = self.descriptor.array_lengths()?;
        if data.as_slice()?.len() != nnz {
            return Err(SparxError::corruption(0, "data length does not match descriptor nnz"));
        }

        let resolver = PointerResolver::from_descriptor(&self.descriptor)?;
        CompressedStorage::new(data, indices, indptr, resolver)
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|err| {
        tracing::error!(path = %path.display(), %err, "failed to write array file");
        SparxError::backing_store(0, "failed to write array file")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparx_core::{DataType, IndexType};

    #[test]
    fn test_write_then_open() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("matrix");

        RawArrayDirectory::write(
            &root,
            Orientation::Csr,
            [2, 3],
            &[5.0f32, 9.0],
            &[0i32, 2],
            &[0i32, 2, 2],
        )
        .unwrap();

        let opened = RawArrayDirectory::open(&root).unwrap();
        assert_eq!(opened.descriptor().data_type, DataType::F32);
        assert_eq!(opened.descriptor().index_type, IndexType::I32);
        assert_eq!(opened.descriptor().nnz, 2);

        let mut storage = opened.storage::<f32, i32>().unwrap();
        assert_eq!(storage.nnz(), 2);
        assert_eq!(storage.value_at(1), Ok(9.0));
        assert_eq!(storage.index_at(1), Ok(2));
    }

    #[test]
    fn test_type_mismatch_rejected() {
        let dir = tempfile::tempdir().unwrap();
        RawArrayDirectory::write(
            dir.path(),
            Orientation::Csc,
            [2, 2],
            &[1.0f64],
            &[1i64],
            &[0i64, 0, 1],
        )
        .unwrap();

        let opened = RawArrayDirectory::open(dir.path()).unwrap();
        assert!(opened.storage::<f32, i64>().is_err());
        assert!(opened.storage::<f64, i32>().is_err());
        assert!(opened.storage::<f64, i64>().is_ok());
    }

    #[test]
    fn test_missing_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            RawArrayDirectory::open(dir.path()),
            Err(SparxError::BackingStoreFailure { .. })
        ));
    }
}
