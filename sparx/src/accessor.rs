//! Stateful point accessor over compressed sparse storage
//!
//! [`SparseAccessor`] presents a compressed sparse matrix as a dense,
//! point-addressable array. It keeps its search position between lookups so
//! scanning along the secondary axis costs O(1) amortized per step.
//!
//! Search state is owned by exactly one accessor. Reads go through
//! `&mut self`, so an accessor cannot be shared between traversals; each
//! concurrent traversal takes its own copy via [`SparseAccessor::duplicate`].

use crate::config::AccessConfig;
use crate::storage::{CompressedStorage, Run};
use sparx_core::{IndexElement, MatrixElement, PointSampler, PositionalAccess, Result, SparxError};

pub mod search;

pub use search::SearchStrategy;

/// Private search position of one accessor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Major index whose bounds are cached in `run_start..run_end`
    pub run_major: Option<usize>,
    pub run_start: usize,
    /// Exclusive end of the cached run
    pub run_end: usize,
    /// Position inside the run where the last search settled
    pub current: usize,
}

/// Cursor mapping dense coordinates onto compressed sparse storage
pub struct SparseAccessor<DA: PositionalAccess, IA, PA> {
    storage: CompressedStorage<DA, IA, PA>,
    position: Vec<i64>,
    fill: DA::Item,
    state: SearchState,
    strategy: SearchStrategy,
}

impl<DA, IA, PA> SparseAccessor<DA, IA, PA>
where
    DA: PositionalAccess,
    DA::Item: MatrixElement,
    IA: PositionalAccess,
    IA::Item: IndexElement,
    PA: PositionalAccess,
    PA::Item: IndexElement,
{
    /// Accessor positioned at the origin using the default search strategy
    pub fn new(storage: CompressedStorage<DA, IA, PA>) -> Self {
        Self::with_strategy(storage, SearchStrategy::default())
    }

    pub fn with_strategy(storage: CompressedStorage<DA, IA, PA>, strategy: SearchStrategy) -> Self {
        let dims = storage.resolver().num_dimensions();
        Self {
            storage,
            position: vec![0; dims],
            fill: DA::Item::fill_value(),
            state: SearchState::default(),
            strategy,
        }
    }

    /// Build an accessor as configured, validating the whole storage first
    /// when `validate_on_open` is set
    pub fn open(mut storage: CompressedStorage<DA, IA, PA>, config: &AccessConfig) -> Result<Self> {
        if config.validate_on_open {
            storage.validate()?;
        }
        Ok(Self::with_strategy(storage, config.search))
    }

    pub fn storage(&self) -> &CompressedStorage<DA, IA, PA> {
        &self.storage
    }

    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// Value returned for coordinates without a stored entry
    pub fn fill_value(&self) -> DA::Item {
        self.fill
    }

    pub fn search_state(&self) -> SearchState {
        self.state
    }

    /// Matrix extents as `(rows, cols)`
    pub fn extents(&self) -> [usize; 2] {
        self.storage.resolver().extents()
    }

    /// Read the value at the current coordinate
    ///
    /// Absent entries read as the fill value. Corrupt runs and failed block
    /// fetches are returned as errors, never as the fill value.
    pub fn get(&mut self) -> Result<DA::Item> {
        let (major, target) = self.storage.resolver().resolve(&self.position)?;
        let run = self.run(major).inspect_err(|err| log_corruption(major, target, err))?;

        if run.is_empty() {
            return Ok(self.fill);
        }
        if !run.contains(self.state.current) {
            self.state.current = run.start;
        }

        let storage = &mut self.storage;
        let mut read = |pos: usize| storage.index_at(pos);
        let found = self
            .strategy
            .search(&mut read, run, &mut self.state.current, target)
            .inspect_err(|err| log_corruption(major, target, err))?;

        match found {
            Some(pos) => self.storage.value_at(pos),
            None => Ok(self.fill),
        }
    }

    /// Jump to `position` and read the value there
    pub fn get_at(&mut self, position: &[i64]) -> Result<DA::Item> {
        self.set_position(position);
        self.get()
    }

    pub fn position(&self) -> &[i64] {
        &self.position
    }

    /// Step forward along axis `d`
    ///
    /// # Panics
    ///
    /// Panics if `d` is not an axis of this accessor.
    pub fn fwd(&mut self, d: usize) {
        self.position[d] += 1;
    }

    /// Step backward along axis `d`
    ///
    /// # Panics
    ///
    /// Panics if `d` is not an axis of this accessor.
    pub fn bck(&mut self, d: usize) {
        self.position[d] -= 1;
    }

    /// Move by `distance` along axis `d`
    ///
    /// # Panics
    ///
    /// Panics if `d` is not an axis of this accessor.
    pub fn move_axis(&mut self, distance: i64, d: usize) {
        self.position[d] += distance;
    }

    /// Move by a per-axis offset; extra or missing axes are ignored
    pub fn move_by(&mut self, distance: &[i64]) {
        for (p, delta) in self.position.iter_mut().zip(distance) {
            *p += delta;
        }
    }

    /// Jump to an absolute coordinate
    ///
    /// A coordinate of the wrong dimensionality is kept as given and
    /// reported as `DimensionMismatch` by the next [`SparseAccessor::get`].
    pub fn set_position(&mut self, position: &[i64]) {
        self.position.clear();
        self.position.extend_from_slice(position);
    }

    /// Set the coordinate on axis `d`
    ///
    /// # Panics
    ///
    /// Panics if `d` is not an axis of this accessor.
    pub fn set_axis(&mut self, position: i64, d: usize) {
        self.position[d] = position;
    }

    /// Independent accessor at the same coordinate and search position
    ///
    /// Storage handles are duplicated (sharing the immutable backing data);
    /// coordinate and search state are copied, never aliased.
    pub fn duplicate(&self) -> Self {
        Self {
            storage: self.storage.duplicate(),
            position: self.position.clone(),
            fill: DA::Item::fill_value(),
            state: self.state,
            strategy: self.strategy,
        }
    }

    /// Bounds of the run for `major`, checked in full the first time it is entered
    fn run(&mut self, major: usize) -> Result<Run> {
        if self.state.run_major == Some(major) {
            return Ok(Run {
                major,
                start: self.state.run_start,
                end: self.state.run_end,
            });
        }

        let run = self.storage.run(major)?;
        self.storage.check_run(run)?;
        self.state.run_major = Some(major);
        self.state.run_start = run.start;
        self.state.run_end = run.end;
        Ok(run)
    }
}

fn log_corruption(major: usize, target: i64, err: &SparxError) {
    if err.is_fatal() {
        tracing::warn!(major, target, %err, "corrupt run detected");
    }
}

impl<DA, IA, PA> PointSampler for SparseAccessor<DA, IA, PA>
where
    DA: PositionalAccess,
    DA::Item: MatrixElement,
    IA: PositionalAccess,
    IA::Item: IndexElement,
    PA: PositionalAccess,
    PA::Item: IndexElement,
{
    type Element = DA::Item;

    fn num_dimensions(&self) -> usize {
        self.storage.resolver().num_dimensions()
    }

    fn position(&self) -> &[i64] {
        SparseAccessor::position(self)
    }

    fn get(&mut self) -> Result<DA::Item> {
        SparseAccessor::get(self)
    }

    fn fwd(&mut self, d: usize) {
        SparseAccessor::fwd(self, d)
    }

    fn bck(&mut self, d: usize) {
        SparseAccessor::bck(self, d)
    }

    fn move_axis(&mut self, distance: i64, d: usize) {
        SparseAccessor::move_axis(self, distance, d)
    }

    fn move_by(&mut self, distance: &[i64]) {
        SparseAccessor::move_by(self, distance)
    }

    fn set_position(&mut self, position: &[i64]) {
        SparseAccessor::set_position(self, position)
    }

    fn set_axis(&mut self, position: i64, d: usize) {
        SparseAccessor::set_axis(self, position, d)
    }

    fn duplicate(&self) -> Self {
        SparseAccessor::duplicate(self)
    }
}
