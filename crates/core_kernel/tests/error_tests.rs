//! Tests for core_kernel error types

use chrono::NaiveDate;
use core_kernel::error::CoreError;
use core_kernel::ports::PortError;
use core_kernel::temporal::TemporalError;

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("VIN must not be empty");

    match error {
        CoreError::Validation(msg) => assert_eq!(msg, "VIN must not be empty"),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_core_error_from_temporal_error() {
    let temporal = TemporalError::InvalidPeriod {
        start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    };
    let core_error: CoreError = temporal.into();

    assert!(matches!(core_error, CoreError::Temporal(_)));
    assert!(core_error.to_string().contains("2025-01-01"));
}

#[test]
fn test_core_error_from_port_error() {
    let core_error: CoreError = PortError::connection("refused").into();

    assert!(matches!(core_error, CoreError::Port(_)));
}

#[test]
fn test_core_error_display() {
    let error = CoreError::validation("Test error");
    let display = format!("{}", error);

    assert!(display.contains("Validation error"));
}
