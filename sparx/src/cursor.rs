//! Line cursors
//!
//! A [`LineCursor`] holds one axis fixed (a row of a CSR matrix, or the gene
//! a column of a CSC matrix describes) and walks the other axis, yielding the
//! dense value at every position. Like any cursor it starts just before the
//! first position: call [`LineCursor::fwd`] before [`LineCursor::get`], or
//! use it as an [`Iterator`].

use crate::accessor::SparseAccessor;
use sparx_core::{IndexElement, MatrixElement, PositionalAccess, Result, SparxError};
use std::ops::Range;

/// Cursor over every position of one line of a sparse matrix
pub struct LineCursor<DA: PositionalAccess, IA, PA> {
    accessor: SparseAccessor<DA, IA, PA>,
    line_axis: usize,
    walk_axis: usize,
    line: i64,
    range: Range<i64>,
    // one before range.start until the first fwd()
    pos: i64,
}

impl<DA, IA, PA> LineCursor<DA, IA, PA>
where
    DA: PositionalAccess,
    DA::Item: MatrixElement,
    IA: PositionalAccess,
    IA::Item: IndexElement,
    PA: PositionalAccess,
    PA::Item: IndexElement,
{
    /// Cursor over the whole line `line` of `line_axis`
    ///
    /// `line_axis` 0 walks a row, 1 walks a column.
    pub fn new(accessor: SparseAccessor<DA, IA, PA>, line_axis: usize, line: i64) -> Result<Self> {
        if line_axis > 1 {
            return Err(SparxError::DimensionMismatch {
                expected: 2,
                actual: line_axis + 1,
            });
        }
        let walk_axis = 1 - line_axis;
        let extent = accessor.extents()[walk_axis];
        let end = i64::try_from(extent).map_err(|_| SparxError::ArraySizeOverflow)?;

        let mut cursor = Self {
            accessor,
            line_axis,
            walk_axis,
            line,
            range: 0..end,
            pos: -1,
        };
        cursor.reset();
        Ok(cursor)
    }

    /// Restrict the walk to `range` of the walked axis
    pub fn with_range(mut self, range: Range<usize>) -> Result<Self> {
        let extent = self.accessor.extents()[self.walk_axis];
        if range.start > range.end || range.end > extent {
            return Err(SparxError::InvalidRange);
        }
        let start = i64::try_from(range.start).map_err(|_| SparxError::ArraySizeOverflow)?;
        let end = i64::try_from(range.end).map_err(|_| SparxError::ArraySizeOverflow)?;
        self.range = start..end;
        self.reset();
        Ok(self)
    }

    /// Index of the fixed line
    pub fn line(&self) -> i64 {
        self.line
    }

    pub fn line_axis(&self) -> usize {
        self.line_axis
    }

    /// Current position along the walked axis
    pub fn position(&self) -> i64 {
        self.pos
    }

    /// Switch to another line and rewind; search state is kept
    pub fn set_line(&mut self, line: i64) {
        self.line = line;
        self.reset();
    }

    /// Rewind to just before the first position
    pub fn reset(&mut self) {
        self.pos = self.range.start - 1;
        let mut coordinate = [0i64; 2];
        coordinate[self.line_axis] = self.line;
        coordinate[self.walk_axis] = self.pos;
        self.accessor.set_position(&coordinate);
    }

    pub fn has_next(&self) -> bool {
        self.pos + 1 < self.range.end
    }

    pub fn fwd(&mut self) {
        self.pos += 1;
        self.accessor.fwd(self.walk_axis);
    }

    pub fn jump_fwd(&mut self, steps: i64) {
        self.pos += steps;
        self.accessor.move_axis(steps, self.walk_axis);
    }

    /// Value at the current position
    pub fn get(&mut self) -> Result<DA::Item> {
        self.accessor.get()
    }

    /// Independent cursor at the same line and position
    pub fn duplicate(&self) -> Self {
        Self {
            accessor: self.accessor.duplicate(),
            line_axis: self.line_axis,
            walk_axis: self.walk_axis,
            line: self.line,
            range: self.range.clone(),
            pos: self.pos,
        }
    }

    pub fn into_accessor(self) -> SparseAccessor<DA, IA, PA> {
        self.accessor
    }
}

impl<DA, IA, PA> Iterator for LineCursor<DA, IA, PA>
where
    DA: PositionalAccess,
    DA::Item: MatrixElement,
    IA: PositionalAccess,
    IA::Item: IndexElement,
    PA: PositionalAccess,
    PA::Item: IndexElement,
{
    type Item = Result<(i64, DA::Item)>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.has_next() {
            return None;
        }
        self.fwd();
        let item = self.get().map(|value| (self.pos, value));
        if item.is_err() {
            // stop after the first failure
            self.pos = self.range.end;
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.range.end - self.pos - 1).unwrap_or(0);
        (0, Some(remaining))
    }
}
