//! Axis labels
//!
//! Names for the rows or columns of a matrix (gene names, cell barcodes),
//! with O(1) lookup in both directions.

use hashbrown::HashMap;
use sparx_core::{Result, SparxError};

/// Ordered, unique names for the positions of one axis
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<String>", into = "Vec<String>"))]
pub struct AxisLabels {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl AxisLabels {
    /// Build labels from names in axis order; names must be unique
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(SparxError::DuplicateLabel { index: i });
            }
        }
        Ok(Self { names, index })
    }

    /// One name per non-empty line
    pub fn from_lines(text: &str) -> Result<Self> {
        Self::from_names(text.lines().map(str::trim).filter(|line| !line.is_empty()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Check that the labels cover an axis of length `extent`
    pub fn check_extent(&self, axis: usize, extent: usize) -> Result<()> {
        if self.names.len() != extent {
            tracing::warn!(axis, extent, labels = self.names.len(), "label count does not match axis");
            return Err(SparxError::DimensionMismatch {
                expected: extent,
                actual: self.names.len(),
            });
        }
        Ok(())
    }
}

impl TryFrom<Vec<String>> for AxisLabels {
    type Error = SparxError;

    fn try_from(names: Vec<String>) -> Result<Self> {
        Self::from_names(names)
    }
}

impl From<AxisLabels> for Vec<String> {
    fn from(labels: AxisLabels) -> Self {
        labels.names
    }
}
