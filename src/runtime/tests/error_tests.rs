//! Tests for guest error payloads

use crate::runtime::errors::{self, ErrorInfo};
use crate::runtime::GuestError;

#[test]
fn test_bounds_error_payload() {
    let e = GuestError::bounds(-2, 5);
    assert_eq!(e.kind(), errors::BOUNDS_ERROR);
    assert_eq!(e.operands(), vec![-2, 5]);
    assert_eq!(e.to_string(), "index -2 out of bounds for length 5");
}

#[test]
fn test_invalid_range_payload() {
    let e = GuestError::invalid_range(3, 1);
    assert_eq!(e.kind(), errors::INVALID_RANGE_ERROR);
    assert_eq!(e.operands(), vec![3, 1]);
}

#[test]
fn test_info_is_serializable() {
    let info = GuestError::ArgCount {
        routine: "join".to_string(),
        expected: 2,
        got: 0,
    }
    .info();

    assert_eq!(
        info,
        ErrorInfo {
            code: errors::ARG_COUNT_ERROR.to_string(),
            message: "join() takes 2 arguments, got 0".to_string(),
            operands: vec![2, 0],
        }
    );
    let json = serde_json::to_string(&info).expect("serialize");
    let back: ErrorInfo = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, info);
}

#[test]
fn test_non_numeric_errors_have_no_operands() {
    let e = GuestError::Misuse {
        routine: "join".to_string(),
    };
    assert_eq!(e.kind(), errors::MISUSE_ERROR);
    assert!(e.operands().is_empty());
    assert_eq!(GuestError::import("X", "missing").kind(), errors::IMPORT_ERROR);
}
