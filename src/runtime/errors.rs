//! Guest-visible error values
//!
//! Every failure that guest code can observe is a `GuestError`. Routines
//! return `Result<_, GuestError>` and propagate with `?`; the error unwinds
//! to the nearest guest-level handler, which lives outside this crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/* ===================== Error Codes ===================== */

pub const BOUNDS_ERROR: &str = "BoundsError";
pub const INVALID_RANGE_ERROR: &str = "InvalidRangeError";
pub const MISUSE_ERROR: &str = "MisuseError";
pub const TYPE_ERROR: &str = "TypeError";
pub const ARG_COUNT_ERROR: &str = "ArgCountError";
pub const IMPORT_ERROR: &str = "ImportError";
pub const RECURSION_ERROR: &str = "RecursionError";

/* ===================== Guest Errors ===================== */

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuestError {
    /// Index or slice endpoint outside its valid range.
    ///
    /// `index` is the value after negative wraparound, not the caller's literal.
    #[error("index {index} out of bounds for length {length}")]
    Bounds { index: i64, length: i64 },

    /// Slice end precedes slice start (both normalized).
    #[error("slice start {start} is greater than end {end}")]
    InvalidRange { start: i64, end: i64 },

    /// A one-shot procedure was advanced again while strict mode is on.
    #[error("procedure '{routine}' advanced after it already produced its value")]
    Misuse { routine: String },

    #[error("expected {expected}, got {got}")]
    Type { expected: &'static str, got: String },

    #[error("{routine}() takes {expected} arguments, got {got}")]
    ArgCount {
        routine: String,
        expected: usize,
        got: usize,
    },

    #[error("cannot import '{module}': {detail}")]
    Import { module: String, detail: String },

    #[error("maximum call depth of {limit} exceeded")]
    RecursionDepth { limit: usize },
}

/// Report a host length or index as a signed operand, saturating at `i64::MAX`
fn operand(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

impl GuestError {
    pub fn bounds(index: i64, length: usize) -> Self {
        GuestError::Bounds {
            index,
            length: operand(length),
        }
    }

    pub fn invalid_range(start: usize, end: usize) -> Self {
        GuestError::InvalidRange {
            start: operand(start),
            end: operand(end),
        }
    }

    pub fn type_error(expected: &'static str, got: impl Into<String>) -> Self {
        GuestError::Type {
            expected,
            got: got.into(),
        }
    }

    pub fn import(module: impl Into<String>, detail: impl Into<String>) -> Self {
        GuestError::Import {
            module: module.into(),
            detail: detail.into(),
        }
    }

    /// Guest exception kind name
    pub fn kind(&self) -> &'static str {
        match self {
            GuestError::Bounds { .. } => BOUNDS_ERROR,
            GuestError::InvalidRange { .. } => INVALID_RANGE_ERROR,
            GuestError::Misuse { .. } => MISUSE_ERROR,
            GuestError::Type { .. } => TYPE_ERROR,
            GuestError::ArgCount { .. } => ARG_COUNT_ERROR,
            GuestError::Import { .. } => IMPORT_ERROR,
            GuestError::RecursionDepth { .. } => RECURSION_ERROR,
        }
    }

    /// Integer operands carried to the guest exception
    pub fn operands(&self) -> Vec<i64> {
        match self {
            GuestError::Bounds { index, length } => vec![*index, *length],
            GuestError::InvalidRange { start, end } => vec![*start, *end],
            GuestError::ArgCount { expected, got, .. } => vec![operand(*expected), operand(*got)],
            GuestError::RecursionDepth { limit } => vec![operand(*limit)],
            GuestError::Misuse { .. } | GuestError::Type { .. } | GuestError::Import { .. } => {
                vec![]
            }
        }
    }

    pub fn info(&self) -> ErrorInfo {
        ErrorInfo {
            code: self.kind().to_string(),
            message: self.to_string(),
            operands: self.operands(),
        }
    }
}

/// Serializable view of a guest error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
    pub operands: Vec<i64>,
}
