//! Constants shared by loaders of raw array directories

/// Descriptor file holding a serialized `StorageDescriptor`
pub const DESCRIPTOR_FILE: &str = "descriptor.json";

/// Raw little-endian element values
pub const DATA_FILE: &str = "data.bin";

/// Raw little-endian secondary-axis coordinates
pub const INDICES_FILE: &str = "indices.bin";

/// Raw little-endian run offsets, `major_extent + 1` entries
pub const INDPTR_FILE: &str = "indptr.bin";

/// Number of axes of a compressed sparse matrix
pub const MATRIX_DIMENSIONS: usize = 2;
