//! Parsing utilities for command-line style specifications
//!
//! Pure parsing functions with no I/O dependencies.

use crate::error::SparxError;
use core::ops::Range;

/// Parse a range string in the format "start:end" or "start-end"
///
/// Used for selecting a window of positions along one axis. Returns a
/// half-open `Range<usize>`.
pub fn parse_range(range_str: &str) -> Result<Range<usize>, SparxError> {
    let (start, end) = split_pair(range_str, &[':', '-'])?;

    if start > end {
        return Err(SparxError::InvalidRange);
    }

    Ok(start..end)
}

/// Parse a matrix shape in the format "ROWSxCOLS" or "ROWS,COLS"
pub fn parse_shape(shape_str: &str) -> Result<[usize; 2], SparxError> {
    let (rows, cols) = split_pair(shape_str, &['x', 'X', ','])?;
    Ok([rows, cols])
}

fn split_pair(s: &str, separators: &[char]) -> Result<(usize, usize), SparxError> {
    if s.is_empty() {
        return Err(SparxError::InvalidRange);
    }

    let pos = s.find(separators).ok_or(SparxError::InvalidRange)?;
    let first = parse_usize(&s[..pos])?;
    // all separators are ASCII, so pos + 1 is a char boundary
    let second = parse_usize(&s[pos + 1..])?;
    Ok((first, second))
}

/// Parse a usize from a string with error handling
///
/// Digits only; signs and whitespace are rejected.
fn parse_usize(s: &str) -> Result<usize, SparxError> {
    if s.is_empty() {
        return Err(SparxError::InvalidRange);
    }

    let mut result: usize = 0;

    for byte in s.bytes() {
        if !byte.is_ascii_digit() {
            return Err(SparxError::InvalidRange);
        }

        let digit = (byte - b'0') as usize;

        result = result
            .checked_mul(10)
            .and_then(|r| r.checked_add(digit))
            .ok_or(SparxError::ArraySizeOverflow)?;
    }

    Ok(result)
}
