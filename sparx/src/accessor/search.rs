//! In-run search algorithms
//!
//! Both strategies start from the position left behind by the previous
//! lookup, which is what makes sequential traversal cheap. They read the run
//! through a callback so the same code serves every storage handle and can
//! be instrumented in tests.
//!
//! Every step of a scan checks strict ascent, and once the search settles the
//! immediate neighbours of the final position are checked as well. An
//! inversion around the target is therefore reported as corruption instead
//! of being read as an absent entry.

use crate::storage::Run;
use sparx_core::{Result, SparxError};

const NOT_ASCENDING: &str = "indices within a run not strictly ascending";

/// How an accessor searches inside a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SearchStrategy {
    /// Step one position at a time towards the target
    ///
    /// O(1) amortized for monotonic traversal, O(run length) for jumps.
    #[default]
    Directional,
    /// Exponential probing from the current position, then bisection
    ///
    /// O(1) amortized for monotonic traversal, O(log run length) for jumps.
    Galloping,
}

impl SearchStrategy {
    /// Find `target` in `run`, starting at and updating `*current`
    ///
    /// `*current` must lie inside the non-empty `run`. Returns the position
    /// holding `target`, or `None` if the run has no entry for it.
    pub fn search<F>(&self, read: &mut F, run: Run, current: &mut usize, target: i64) -> Result<Option<usize>>
    where
        F: FnMut(usize) -> Result<i64>,
    {
        debug_assert!(run.contains(*current));
        match self {
            SearchStrategy::Directional => directional(read, run, current, target),
            SearchStrategy::Galloping => galloping(read, run, current, target),
        }
    }
}

/// Linear directional scan from `*current`
pub fn directional<F>(read: &mut F, run: Run, current: &mut usize, target: i64) -> Result<Option<usize>>
where
    F: FnMut(usize) -> Result<i64>,
{
    let last = run.end - 1;
    let mut pos = *current;
    let mut value = read(pos)?;

    if value < target {
        while value < target && pos < last {
            let next = read(pos + 1)?;
            if next <= value {
                return Err(SparxError::corruption(pos + 1, NOT_ASCENDING));
            }
            pos += 1;
            value = next;
        }
    } else {
        while value > target && pos > run.start {
            let previous = read(pos - 1)?;
            if previous >= value {
                return Err(SparxError::corruption(pos, NOT_ASCENDING));
            }
            pos -= 1;
            value = previous;
        }
    }

    *current = pos;
    check_neighbours(read, run, pos, value)?;
    Ok((value == target).then_some(pos))
}

/// Exponential probe from `*current` followed by bisection of the bracket
pub fn galloping<F>(read: &mut F, run: Run, current: &mut usize, target: i64) -> Result<Option<usize>>
where
    F: FnMut(usize) -> Result<i64>,
{
    let last = run.end - 1;
    let pos = *current;
    let value = read(pos)?;

    let (settled, settled_value) = if value < target {
        // lo holds a value below target; look for hi holding one at or above it
        let (mut lo, mut lo_value) = (pos, value);
        let mut step = 1usize;
        let mut bracket = None;
        while lo < last {
            let probe = lo.saturating_add(step).min(last);
            let probe_value = read(probe)?;
            if probe_value <= lo_value {
                return Err(SparxError::corruption(probe, NOT_ASCENDING));
            }
            if probe_value >= target {
                bracket = Some((probe, probe_value));
                break;
            }
            lo = probe;
            lo_value = probe_value;
            step = step.saturating_mul(2);
        }
        match bracket {
            Some((hi, hi_value)) => {
                let (_, _, hi, hi_value) = bisect(read, (lo, lo_value), (hi, hi_value), target)?;
                (hi, hi_value)
            }
            None => (lo, lo_value),
        }
    } else if value > target {
        // hi holds a value above target; look for lo holding one at or below it
        let (mut hi, mut hi_value) = (pos, value);
        let mut step = 1usize;
        let mut bracket = None;
        while hi > run.start {
            let probe = hi.saturating_sub(step).max(run.start);
            let probe_value = read(probe)?;
            if probe_value >= hi_value {
                return Err(SparxError::corruption(hi, NOT_ASCENDING));
            }
            if probe_value <= target {
                bracket = Some((probe, probe_value));
                break;
            }
            hi = probe;
            hi_value = probe_value;
            step = step.saturating_mul(2);
        }
        match bracket {
            Some((lo, lo_value)) if lo_value == target => (lo, lo_value),
            Some((lo, lo_value)) => {
                let (lo, lo_value, hi, hi_value) = bisect(read, (lo, lo_value), (hi, hi_value), target)?;
                if hi_value == target {
                    (hi, hi_value)
                } else {
                    (lo, lo_value)
                }
            }
            None => (hi, hi_value),
        }
    } else {
        (pos, value)
    };

    *current = settled;
    check_neighbours(read, run, settled, settled_value)?;
    Ok((settled_value == target).then_some(settled))
}

/// Narrow `lo < target <= hi` until the positions are adjacent
///
/// Every midpoint must lie strictly between its bracket's values.
fn bisect<F>(
    read: &mut F,
    (mut lo, mut lo_value): (usize, i64),
    (mut hi, mut hi_value): (usize, i64),
    target: i64,
) -> Result<(usize, i64, usize, i64)>
where
    F: FnMut(usize) -> Result<i64>,
{
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        let mid_value = read(mid)?;
        if mid_value <= lo_value || mid_value >= hi_value {
            return Err(SparxError::corruption(mid, NOT_ASCENDING));
        }
        if mid_value < target {
            lo = mid;
            lo_value = mid_value;
        } else {
            hi = mid;
            hi_value = mid_value;
        }
    }
    Ok((lo, lo_value, hi, hi_value))
}

fn check_neighbours<F>(read: &mut F, run: Run, pos: usize, value: i64) -> Result<()>
where
    F: FnMut(usize) -> Result<i64>,
{
    if pos > run.start && read(pos - 1)? >= value {
        return Err(SparxError::corruption(pos, NOT_ASCENDING));
    }
    if pos + 1 < run.end && read(pos + 1)? <= value {
        return Err(SparxError::corruption(pos + 1, NOT_ASCENDING));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRATEGIES: [SearchStrategy; 2] = [SearchStrategy::Directional, SearchStrategy::Galloping];

    fn run_of(indices: &[i64]) -> Run {
        Run {
            major: 0,
            start: 0,
            end: indices.len(),
        }
    }

    fn lookup(strategy: SearchStrategy, indices: &[i64], current: &mut usize, target: i64) -> Result<Option<usize>> {
        let mut read = |pos: usize| Ok(indices[pos]);
        strategy.search(&mut read, run_of(indices), current, target)
    }

    #[test]
    fn test_finds_every_stored_index_from_any_start() {
        let indices = [1i64, 4, 5, 9, 12, 20, 21];
        for strategy in STRATEGIES {
            for start in 0..indices.len() {
                for (expected, &target) in indices.iter().enumerate() {
                    let mut current = start;
                    assert_eq!(
                        lookup(strategy, &indices, &mut current, target),
                        Ok(Some(expected)),
                        "{strategy:?} start={start} target={target}"
                    );
                    assert_eq!(current, expected);
                }
            }
        }
    }

    #[test]
    fn test_absent_targets() {
        let indices = [1i64, 4, 5, 9, 12, 20, 21];
        for strategy in STRATEGIES {
            for start in 0..indices.len() {
                for target in [0i64, 2, 3, 6, 10, 13, 19, 22, 100] {
                    let mut current = start;
                    assert_eq!(
                        lookup(strategy, &indices, &mut current, target),
                        Ok(None),
                        "{strategy:?} start={start} target={target}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_sub_run_bounds_respected() {
        // Run covers positions 2..4 only; neighbours outside must not be read
        let indices = [100i64, 200, 3, 7, -5, -9];
        let run = Run {
            major: 1,
            start: 2,
            end: 4,
        };
        for strategy in STRATEGIES {
            let mut read = |pos: usize| {
                assert!(run.contains(pos), "read outside run at {pos}");
                Ok(indices[pos])
            };
            let mut current = 2;
            assert_eq!(strategy.search(&mut read, run, &mut current, 7), Ok(Some(3)));
            assert_eq!(strategy.search(&mut read, run, &mut current, 3), Ok(Some(2)));
            assert_eq!(strategy.search(&mut read, run, &mut current, 100), Ok(None));
            assert_eq!(strategy.search(&mut read, run, &mut current, -5), Ok(None));
        }
    }

    #[test]
    fn test_inversion_is_corruption() {
        for strategy in STRATEGIES {
            let mut current = 0;
            let result = lookup(strategy, &[2, 0], &mut current, 0);
            assert!(
                matches!(result, Err(SparxError::StorageCorruption { .. })),
                "{strategy:?}: {result:?}"
            );

            let mut current = 1;
            let result = lookup(strategy, &[2, 0], &mut current, 2);
            assert!(matches!(result, Err(SparxError::StorageCorruption { .. })));
        }
    }

    #[test]
    fn test_duplicate_index_is_corruption() {
        for strategy in STRATEGIES {
            let mut current = 0;
            let result = lookup(strategy, &[1, 3, 3, 8], &mut current, 3);
            assert!(
                matches!(result, Err(SparxError::StorageCorruption { .. })),
                "{strategy:?}: {result:?}"
            );
        }
    }

    #[test]
    fn test_sequential_scan_is_constant_per_step() {
        let indices: Vec<i64> = (0..2000).map(|i| i * 3).collect();
        let last = *indices.last().unwrap();

        for strategy in STRATEGIES {
            let mut reads = 0usize;
            let mut current = 0;
            let mut read = |pos: usize| {
                reads += 1;
                Ok(indices[pos])
            };
            for target in 0..=last {
                strategy
                    .search(&mut read, run_of(&indices), &mut current, target)
                    .unwrap();
            }
            let steps = (last + 1) as usize;
            assert!(reads <= steps * 5, "{strategy:?}: {reads} reads for {steps} steps");

            // Backward traversal is just as cheap
            let mut reads = 0usize;
            let mut read = |pos: usize| {
                reads += 1;
                Ok(indices[pos])
            };
            for target in (0..=last).rev() {
                strategy
                    .search(&mut read, run_of(&indices), &mut current, target)
                    .unwrap();
            }
            assert!(reads <= steps * 5, "{strategy:?}: {reads} reads backward");
        }
    }

    #[test]
    fn test_galloping_jump_is_logarithmic() {
        let indices: Vec<i64> = (0..4096).collect();
        let mut reads = 0usize;
        let mut current = 0;
        let mut read = |pos: usize| {
            reads += 1;
            Ok(indices[pos])
        };
        let found = SearchStrategy::Galloping
            .search(&mut read, run_of(&indices), &mut current, 4000)
            .unwrap();
        assert_eq!(found, Some(4000));
        assert!(reads < 40, "{reads} reads for one jump");
    }

    #[test]
    fn test_read_failure_propagates() {
        for strategy in STRATEGIES {
            let mut read = |pos: usize| {
                if pos == 2 {
                    Err(SparxError::backing_store(pos, "unavailable"))
                } else {
                    Ok(pos as i64)
                }
            };
            let mut current = 0;
            let run = Run {
                major: 0,
                start: 0,
                end: 4,
            };
            assert!(matches!(
                strategy.search(&mut read, run, &mut current, 3),
                Err(SparxError::BackingStoreFailure { .. })
            ));
        }
    }
}
