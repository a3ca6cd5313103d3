//! Parallel line traversal
//!
//! Accessors are single-traversal objects, so parallel work never shares
//! one: each rayon worker builds its own duplicate once and reuses it for
//! every line it is handed.

use crate::accessor::SparseAccessor;
use crate::cursor::LineCursor;
use rayon::prelude::*;
use sparx_core::{IndexElement, MatrixElement, PositionalAccess, Result};

/// Run `f` over a cursor positioned on each of `lines`, in parallel
///
/// Results come back in the order of `lines`. The first error wins and is
/// returned in place of the results.
pub fn par_map_lines<DA, IA, PA, F, R>(
    accessor: &SparseAccessor<DA, IA, PA>,
    line_axis: usize,
    lines: &[i64],
    f: F,
) -> Result<Vec<R>>
where
    DA: PositionalAccess + Sync,
    DA::Item: MatrixElement,
    IA: PositionalAccess + Sync,
    IA::Item: IndexElement,
    PA: PositionalAccess + Sync,
    PA::Item: IndexElement,
    F: Fn(&mut LineCursor<DA, IA, PA>) -> Result<R> + Sync + Send,
    R: Send,
{
    tracing::debug!(line_axis, lines = lines.len(), "parallel line traversal");

    lines
        .par_iter()
        .map_init(
            || LineCursor::new(accessor.duplicate(), line_axis, 0),
            |cursor, &line| {
                let cursor = cursor.as_mut().map_err(|err| *err)?;
                cursor.set_line(line);
                f(cursor)
            },
        )
        .collect()
}

/// Sum of every value on each of `lines`
pub fn line_sums<DA, IA, PA>(
    accessor: &SparseAccessor<DA, IA, PA>,
    line_axis: usize,
    lines: &[i64],
) -> Result<Vec<f64>>
where
    DA: PositionalAccess + Sync,
    DA::Item: MatrixElement,
    IA: PositionalAccess + Sync,
    IA::Item: IndexElement,
    PA: PositionalAccess + Sync,
    PA::Item: IndexElement,
{
    par_map_lines(accessor, line_axis, lines, |cursor| {
        cursor.try_fold(0.0, |sum, item| item.map(|(_, value)| sum + value.to_f64()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{ArraySequence, CompressedStorage};
    use sparx_core::{Orientation, PointerResolver, SparxError};

    fn accessor() -> SparseAccessor<ArraySequence<i64>, ArraySequence<i32>, ArraySequence<i32>> {
        // Row r holds r + 1 at columns 0..=r of a 64 x 64 lower triangle
        let n = 64;
        let mut data = Vec::new();
        let mut indices = Vec::new();
        let mut indptr = vec![0];
        for row in 0..n {
            for col in 0..=row {
                data.push(row as i64 + 1);
                indices.push(col as i32);
            }
            indptr.push(indices.len() as i32);
        }
        let storage = CompressedStorage::new(
            ArraySequence::from(data),
            ArraySequence::from(indices),
            ArraySequence::from(indptr),
            PointerResolver::new(Orientation::Csr, [n, n]),
        )
        .unwrap();
        SparseAccessor::new(storage)
    }

    #[test]
    fn test_row_sums_in_order() {
        let acc = accessor();
        let rows: Vec<i64> = (0..64).rev().collect();
        let sums = line_sums(&acc, 0, &rows).unwrap();
        for (row, sum) in rows.iter().zip(sums) {
            assert_eq!(sum, ((row + 1) * (row + 1)) as f64);
        }
        // The source accessor is untouched
        assert_eq!(acc.position(), &[0, 0]);
    }

    #[test]
    fn test_column_counts() {
        let acc = accessor();
        let cols: Vec<i64> = (0..64).collect();
        let counts = par_map_lines(&acc, 1, &cols, |cursor| {
            let mut count = 0usize;
            for item in cursor {
                if item?.1 != 0 {
                    count += 1;
                }
            }
            Ok(count)
        })
        .unwrap();
        let expected: Vec<usize> = (0..64).map(|c| 64 - c).collect();
        assert_eq!(counts, expected);
    }

    #[test]
    fn test_error_is_returned() {
        let acc = accessor();
        let result = line_sums(&acc, 0, &[1, 2, 100]);
        assert!(matches!(
            result,
            Err(SparxError::OutOfRangeCoordinate { position: 100, .. })
        ));
        assert!(line_sums(&acc, 3, &[0]).is_err());
    }

    #[test]
    fn test_source_coordinate_does_not_matter() {
        let mut acc = accessor();
        assert!(acc.get_at(&[5]).is_err());
        let sums = line_sums(&acc, 0, &[0, 1, 2]).unwrap();
        assert_eq!(sums, vec![1.0, 4.0, 9.0]);
    }
}
