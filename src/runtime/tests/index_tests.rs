//! Tests for index and slice translation

use crate::runtime::index::{
    normalize_index, normalize_index_optional, normalize_slice_bounds,
    normalize_slice_bounds_optional, normalize_slice_index, normalize_slice_index_optional,
};
use crate::runtime::GuestError;

/* ===================== Element Indices ===================== */

#[test]
fn test_index_in_range_is_identity() {
    for n in 0..8usize {
        for i in 0..n {
            assert_eq!(normalize_index(i as i64, n), Ok(i));
        }
    }
}

#[test]
fn test_negative_index_wraps() {
    for n in 1..8usize {
        for i in -(n as i64)..0 {
            assert_eq!(normalize_index(i, n), Ok((n as i64 + i) as usize));
        }
    }
}

#[test]
fn test_index_minus_one() {
    assert_eq!(normalize_index(-1, 5), Ok(4));
}

#[test]
fn test_index_equal_to_length_fails() {
    assert_eq!(
        normalize_index(5, 5),
        Err(GuestError::Bounds { index: 5, length: 5 })
    );
}

#[test]
fn test_out_of_range_reports_normalized_index() {
    // -7 wraps to -2 against length 5 and is still out of range
    assert_eq!(
        normalize_index(-7, 5),
        Err(GuestError::Bounds { index: -2, length: 5 })
    );
    assert_eq!(
        normalize_index(9, 5),
        Err(GuestError::Bounds { index: 9, length: 5 })
    );
}

#[test]
fn test_index_into_empty_container_fails() {
    assert_eq!(
        normalize_index(0, 0),
        Err(GuestError::Bounds { index: 0, length: 0 })
    );
    assert_eq!(
        normalize_index(-1, 0),
        Err(GuestError::Bounds { index: -1, length: 0 })
    );
}

#[test]
fn test_optional_index_defaults_to_zero() {
    assert_eq!(normalize_index_optional(None, 3), Ok(0));
    assert_eq!(normalize_index_optional(Some(-1), 3), Ok(2));
    assert_eq!(
        normalize_index_optional(None, 0),
        Err(GuestError::Bounds { index: 0, length: 0 })
    );
}

/* ===================== Slice Endpoints ===================== */

#[test]
fn test_slice_index_may_equal_length() {
    assert_eq!(normalize_slice_index(5, 5), Ok(5));
    assert_eq!(normalize_slice_index(0, 0), Ok(0));
}

#[test]
fn test_slice_index_past_length_fails() {
    assert_eq!(
        normalize_slice_index(6, 5),
        Err(GuestError::Bounds { index: 6, length: 5 })
    );
}

#[test]
fn test_slice_index_negative_wraps() {
    assert_eq!(normalize_slice_index(-5, 5), Ok(0));
    assert_eq!(
        normalize_slice_index(-6, 5),
        Err(GuestError::Bounds { index: -1, length: 5 })
    );
}

#[test]
fn test_optional_slice_index_defaults_to_zero() {
    assert_eq!(normalize_slice_index_optional(None, 0), Ok(0));
    assert_eq!(normalize_slice_index_optional(Some(-1), 4), Ok(3));
}

/* ===================== Slice Bounds ===================== */

#[test]
fn test_valid_bounds_are_identity() {
    let n = 6usize;
    for i in 0..=n {
        for j in i..=n {
            assert_eq!(normalize_slice_bounds(i as i64, j as i64, n), Ok((i, j)));
        }
    }
}

#[test]
fn test_negative_bounds_describe_one_element() {
    assert_eq!(normalize_slice_bounds(-2, -1, 5), Ok((3, 4)));
}

#[test]
fn test_reversed_bounds_fail() {
    assert_eq!(
        normalize_slice_bounds(3, 1, 5),
        Err(GuestError::InvalidRange { start: 3, end: 1 })
    );
    // Reported after normalization: -1 -> 4, 1 stays 1
    assert_eq!(
        normalize_slice_bounds(-1, 1, 5),
        Err(GuestError::InvalidRange { start: 4, end: 1 })
    );
}

#[test]
fn test_endpoint_bounds_checked_before_ordering() {
    assert_eq!(
        normalize_slice_bounds(6, 1, 5),
        Err(GuestError::Bounds { index: 6, length: 5 })
    );
    assert_eq!(
        normalize_slice_bounds(1, 7, 5),
        Err(GuestError::Bounds { index: 7, length: 5 })
    );
}

#[test]
fn test_empty_slice_at_end() {
    assert_eq!(normalize_slice_bounds(5, 5, 5), Ok((5, 5)));
}

#[test]
fn test_optional_bounds_default_to_full_range() {
    assert_eq!(normalize_slice_bounds_optional(None, None, 7), Ok((0, 7)));
    assert_eq!(normalize_slice_bounds_optional(None, None, 0), Ok((0, 0)));
}

#[test]
fn test_optional_bounds_mix_defaults_and_values() {
    assert_eq!(normalize_slice_bounds_optional(Some(-3), None, 7), Ok((4, 7)));
    assert_eq!(normalize_slice_bounds_optional(None, Some(-1), 7), Ok((0, 6)));
    assert_eq!(
        normalize_slice_bounds_optional(Some(8), None, 7),
        Err(GuestError::Bounds { index: 8, length: 7 })
    );
}

#[test]
#[cfg(target_pointer_width = "64")]
fn test_lengths_beyond_i64_saturate() {
    let huge = usize::MAX;
    assert_eq!(normalize_index(5, huge), Ok(5));
    assert_eq!(normalize_index(-1, huge), Ok(i64::MAX as usize - 1));
    assert_eq!(normalize_slice_index(i64::MAX, huge), Ok(i64::MAX as usize));
    assert_eq!(
        GuestError::bounds(-1, huge),
        GuestError::Bounds { index: -1, length: i64::MAX }
    );
}
