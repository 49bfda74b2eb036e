//! Index and slice translation
//!
//! Every built-in that indexes or slices a sequence calls into here before
//! touching storage. Negative indices count back from the end.
//!
//! Element indices must name an existing element (`0 <= i < n`). Slice
//! endpoints may also name one past the end (`0 <= i <= n`).
//!
//! Failures report the index *after* wraparound, so `-7` against a length of
//! 5 is reported as `-2`.
//!
//! Lengths above `i64::MAX` are treated as `i64::MAX`; no index can reach
//! past that anyway.

use super::errors::GuestError;

fn signed(upper: usize) -> i64 {
    i64::try_from(upper).unwrap_or(i64::MAX)
}

/// Wrap a negative index once around `upper`
fn wrap(i: i64, upper: usize) -> i64 {
    if i < 0 {
        signed(upper) + i
    } else {
        i
    }
}

/// Translate an element index against a container of length `upper`
pub fn normalize_index(i: i64, upper: usize) -> Result<usize, GuestError> {
    let i = wrap(i, upper);
    if i < 0 || i >= signed(upper) {
        return Err(GuestError::bounds(i, upper));
    }
    Ok(i as usize)
}

/// As `normalize_index`, treating an absent index as 0
pub fn normalize_index_optional(i: Option<i64>, upper: usize) -> Result<usize, GuestError> {
    normalize_index(i.unwrap_or(0), upper)
}

/// Translate a slice endpoint; `upper` itself is a valid endpoint
pub fn normalize_slice_index(i: i64, upper: usize) -> Result<usize, GuestError> {
    let i = wrap(i, upper);
    if i < 0 || i > signed(upper) {
        return Err(GuestError::bounds(i, upper));
    }
    Ok(i as usize)
}

pub fn normalize_slice_index_optional(i: Option<i64>, upper: usize) -> Result<usize, GuestError> {
    normalize_slice_index(i.unwrap_or(0), upper)
}

/// Translate both slice endpoints and require `start <= end`
pub fn normalize_slice_bounds(
    start: i64,
    end: i64,
    upper: usize,
) -> Result<(usize, usize), GuestError> {
    let start = normalize_slice_index(start, upper)?;
    let end = normalize_slice_index(end, upper)?;
    if end < start {
        return Err(GuestError::invalid_range(start, end));
    }
    Ok((start, end))
}

/// Slice bounds with defaults: absent start is 0, absent end is `upper`
pub fn normalize_slice_bounds_optional(
    start: Option<i64>,
    end: Option<i64>,
    upper: usize,
) -> Result<(usize, usize), GuestError> {
    normalize_slice_bounds(start.unwrap_or(0), end.unwrap_or(signed(upper)), upper)
}
