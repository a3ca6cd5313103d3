//! Compressed storage view over the three backing sequences
//!
//! [`CompressedStorage`] bundles positional-access handles for `data`,
//! `indices` and `indptr` with the resolver describing their orientation.
//! The concrete handle types live in the submodules.

use sparx_core::{
    validate_indptr, validate_runs, IndexElement, MatrixElement, PointerResolver,
    PositionalAccess, Result, SparxError,
};

pub mod lazy;
pub mod memory;
#[cfg(feature = "mmap")]
pub mod mmap;
#[cfg(all(feature = "mmap", feature = "serde"))]
pub mod directory;

pub use lazy::{BlockSource, LazySequence};
pub use memory::ArraySequence;
#[cfg(feature = "mmap")]
pub use mmap::MmapSequence;
#[cfg(all(feature = "mmap", feature = "serde"))]
pub use directory::RawArrayDirectory;

/// Positions `start..end` of `indices`/`data` belonging to one major index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub major: usize,
    pub start: usize,
    /// Exclusive end
    pub end: usize,
}

impl Run {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }
}

/// Read-only view over a compressed sparse matrix
///
/// Owns one handle per backing sequence. The handles share the underlying
/// immutable storage with every duplicate, but each keeps its own read state,
/// so a view serves exactly one traversal at a time.
pub struct CompressedStorage<DA, IA, PA> {
    data: DA,
    indices: IA,
    indptr: PA,
    resolver: PointerResolver,
    nnz: usize,
}

impl<DA, IA, PA> CompressedStorage<DA, IA, PA>
where
    DA: PositionalAccess,
    DA::Item: MatrixElement,
    IA: PositionalAccess,
    IA::Item: IndexElement,
    PA: PositionalAccess,
    PA::Item: IndexElement,
{
    /// Assemble a view, checking that the array lengths agree with each other
    /// and with the resolver's extents
    ///
    /// Only O(1) entries are read. Run contents are checked lazily by the
    /// accessor, or eagerly by [`CompressedStorage::validate`].
    pub fn new(data: DA, indices: IA, indptr: PA, resolver: PointerResolver) -> Result<Self> {
        let nnz = indices.len();
        let mut storage = Self {
            data,
            indices,
            indptr,
            resolver,
            nnz,
        };
        storage.check_consistency()?;

        tracing::debug!(
            orientation = %storage.resolver.orientation(),
            rows = storage.resolver.extents()[0],
            cols = storage.resolver.extents()[1],
            nnz,
            "opened compressed storage"
        );
        Ok(storage)
    }

    /// Check array lengths against each other and against the resolver
    pub fn check_consistency(&mut self) -> Result<()> {
        let runs = self.resolver.major_extent();

        if self.indptr.len() != runs + 1 {
            return Err(SparxError::corruption(
                self.indptr.len(),
                "indptr length does not match the major extent",
            ));
        }

        if self.data.len() != self.indices.len() {
            return Err(SparxError::corruption(
                self.data.len().min(self.indices.len()),
                "data and indices lengths differ",
            ));
        }

        let first = self.indptr.get(0)?.to_offset(0)?;
        if first != 0 {
            return Err(SparxError::corruption(0, "indptr does not start at zero"));
        }

        let last = self.indptr.get(runs)?.to_offset(runs)?;
        if last != self.indices.len() {
            return Err(SparxError::corruption(
                runs,
                "indptr does not end at the number of stored entries",
            ));
        }
        Ok(())
    }

    pub fn resolver(&self) -> &PointerResolver {
        &self.resolver
    }

    /// Number of explicitly stored entries
    pub fn nnz(&self) -> usize {
        self.nnz
    }

    /// Bounds of the run for major index `major`
    pub fn run(&mut self, major: usize) -> Result<Run> {
        if major >= self.resolver.major_extent() {
            return Err(SparxError::OutOfRangeCoordinate {
                axis: self.resolver.orientation().major_axis(),
                position: i64::try_from(major).unwrap_or(i64::MAX),
                extent: self.resolver.major_extent(),
            });
        }

        let start = self.indptr.get(major)?.to_offset(major)?;
        let end = self.indptr.get(major + 1)?.to_offset(major + 1)?;

        if end < start {
            return Err(SparxError::corruption(major + 1, "indptr is not monotonic"));
        }
        if end > self.indices.len() {
            return Err(SparxError::corruption(major + 1, "run extends past the end of indices"));
        }

        Ok(Run { major, start, end })
    }

    /// Check that the indices of `run` ascend strictly within the minor extent
    ///
    /// Reads every index of the run once.
    pub fn check_run(&mut self, run: Run) -> Result<()> {
        let minor = i64::try_from(self.resolver.minor_extent()).unwrap_or(i64::MAX);
        let mut previous = None;
        for pos in run.start..run.end {
            let index = self.index_at(pos)?;
            if index < 0 || index >= minor {
                return Err(SparxError::corruption(pos, "index outside the secondary extent"));
            }
            if previous.is_some_and(|p| index <= p) {
                return Err(SparxError::corruption(
                    pos,
                    "indices within a run not strictly ascending",
                ));
            }
            previous = Some(index);
        }
        Ok(())
    }

    /// Secondary-axis coordinate stored at `pos`
    pub fn index_at(&mut self, pos: usize) -> Result<i64> {
        self.indices.get(pos).map(IndexElement::to_i64)
    }

    /// Element value stored at `pos`
    pub fn value_at(&mut self, pos: usize) -> Result<DA::Item> {
        self.data.get(pos)
    }

    /// Run the full O(nnz) structural validation
    pub fn validate(&mut self) -> Result<()> {
        validate_indptr(&mut self.indptr, self.nnz)?;
        validate_runs(
            &mut self.indptr,
            &mut self.indices,
            self.resolver.minor_extent(),
        )?;
        tracing::debug!(nnz = self.nnz, "structural validation passed");
        Ok(())
    }

    /// Independent view sharing the same immutable storage
    pub fn duplicate(&self) -> Self {
        Self {
            data: self.data.duplicate(),
            indices: self.indices.duplicate(),
            indptr: self.indptr.duplicate(),
            resolver: self.resolver,
            nnz: self.nnz,
        }
    }
}
