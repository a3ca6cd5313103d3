//! Structural validation of compressed sparse arrays
//!
//! Full O(nnz) checks of the layout invariants. The access engine detects
//! violations lazily on the runs it touches; these functions are for callers
//! that want every run checked up front.

use crate::error::{Result, SparxError};
use crate::traits::{IndexElement, PositionalAccess};

/// Check that `indptr` starts at 0, never decreases and ends at `nnz`
pub fn validate_indptr<P>(indptr: &mut P, nnz: usize) -> Result<()>
where
    P: PositionalAccess,
    P::Item: IndexElement,
{
    if indptr.is_empty() {
        return Err(SparxError::corruption(0, "indptr is empty"));
    }

    let mut previous = indptr.get(0)?.to_offset(0)?;
    if previous != 0 {
        return Err(SparxError::corruption(0, "indptr does not start at zero"));
    }

    for slot in 1..indptr.len() {
        let offset = indptr.get(slot)?.to_offset(slot)?;
        if offset < previous {
            return Err(SparxError::corruption(slot, "indptr is not monotonic"));
        }
        previous = offset;
    }

    if previous != nnz {
        return Err(SparxError::corruption(
            indptr.len() - 1,
            "indptr does not end at the number of stored entries",
        ));
    }

    Ok(())
}

/// Check that every run of `indices` is strictly ascending and in range
///
/// `indptr` is assumed to have passed [`validate_indptr`].
pub fn validate_runs<P, X>(indptr: &mut P, indices: &mut X, minor_extent: usize) -> Result<()>
where
    P: PositionalAccess,
    P::Item: IndexElement,
    X: PositionalAccess,
    X::Item: IndexElement,
{
    let extent = i64::try_from(minor_extent).unwrap_or(i64::MAX);

    for run in 0..indptr.len().saturating_sub(1) {
        let start = indptr.get(run)?.to_offset(run)?;
        let end = indptr.get(run + 1)?.to_offset(run + 1)?;

        let mut previous: Option<i64> = None;
        for pos in start..end {
            let value = indices.get(pos)?.to_i64();
            if value < 0 || value >= extent {
                return Err(SparxError::corruption(pos, "index outside the secondary extent"));
            }
            if previous.is_some_and(|p| p >= value) {
                return Err(SparxError::corruption(pos, "indices within a run not strictly ascending"));
            }
            previous = Some(value);
        }
    }

    Ok(())
}
