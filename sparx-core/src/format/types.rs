//! Orientation and element type tags

use crate::error::SparxError;

/// Which axis is compressed by `indptr`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Orientation {
    /// Compressed Sparse Row: runs are rows, `indices` hold columns
    Csr = 1,
    /// Compressed Sparse Column: runs are columns, `indices` hold rows
    Csc = 2,
}

impl Orientation {
    /// Axis (in `(row, col)` coordinate order) indexed by `indptr`
    pub const fn major_axis(&self) -> usize {
        match self {
            Orientation::Csr => 0,
            Orientation::Csc => 1,
        }
    }

    /// Axis whose coordinates are stored in `indices`
    pub const fn minor_axis(&self) -> usize {
        match self {
            Orientation::Csr => 1,
            Orientation::Csc => 0,
        }
    }

    /// The opposite orientation, i.e. the layout of the transpose
    pub const fn transposed(&self) -> Self {
        match self {
            Orientation::Csr => Orientation::Csc,
            Orientation::Csc => Orientation::Csr,
        }
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Orientation::Csr),
            2 => Some(Orientation::Csc),
            _ => None,
        }
    }
}

impl core::str::FromStr for Orientation {
    type Err = SparxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("csr") {
            Ok(Orientation::Csr)
        } else if s.eq_ignore_ascii_case("csc") {
            Ok(Orientation::Csc)
        } else {
            Err(SparxError::InvalidRange)
        }
    }
}

impl core::fmt::Display for Orientation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Orientation::Csr => write!(f, "CSR"),
            Orientation::Csc => write!(f, "CSC"),
        }
    }
}

/// Element types supported for the `data` array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum DataType {
    F32 = 0,
    F64 = 1,
    I32 = 2,
    I64 = 3,
    U32 = 4,
    U64 = 5,
}

impl DataType {
    /// Get the size in bytes for this data type
    pub const fn size_bytes(&self) -> usize {
        match self {
            DataType::F32 | DataType::I32 | DataType::U32 => 4,
            DataType::F64 | DataType::I64 | DataType::U64 => 8,
        }
    }

    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(DataType::F32),
            1 => Some(DataType::F64),
            2 => Some(DataType::I32),
            3 => Some(DataType::I64),
            4 => Some(DataType::U32),
            5 => Some(DataType::U64),
            _ => None,
        }
    }
}

impl core::fmt::Display for DataType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DataType::F32 => write!(f, "f32"),
            DataType::F64 => write!(f, "f64"),
            DataType::I32 => write!(f, "i32"),
            DataType::I64 => write!(f, "i64"),
            DataType::U32 => write!(f, "u32"),
            DataType::U64 => write!(f, "u64"),
        }
    }
}

/// Integer types supported for the `indices` and `indptr` arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum IndexType {
    I32 = 0,
    I64 = 1,
    U32 = 2,
    U64 = 3,
}

impl IndexType {
    pub const fn size_bytes(&self) -> usize {
        match self {
            IndexType::I32 | IndexType::U32 => 4,
            IndexType::I64 | IndexType::U64 => 8,
        }
    }
}

impl core::fmt::Display for IndexType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            IndexType::I32 => write!(f, "i32"),
            IndexType::I64 => write!(f, "i64"),
            IndexType::U32 => write!(f, "u32"),
            IndexType::U64 => write!(f, "u64"),
        }
    }
}
