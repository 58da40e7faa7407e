//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use chrono::NaiveDate;
use domain_motor::{CarHistory, InsuranceError, InsurancePolicy};
use serde_json::Value;

/// Asserts that a result failed with the given stable error code
///
/// # Panics
///
/// Panics if the result is `Ok` or carries a different code
pub fn assert_error_code<T: std::fmt::Debug>(result: &Result<T, InsuranceError>, expected: &str) {
    match result {
        Ok(value) => panic!("Expected error '{}', got Ok({:?})", expected, value),
        Err(error) => assert_eq!(
            error.code(),
            expected,
            "Expected error code '{}', got '{}' ({})",
            expected,
            error.code(),
            error
        ),
    }
}

/// Asserts that an HTTP error body carries the given code and a message
pub fn assert_error_body(body: &Value, expected_code: &str) {
    assert_eq!(
        body["error"].as_str(),
        Some(expected_code),
        "Unexpected error body: {}",
        body
    );
    assert!(
        body["message"].as_str().is_some_and(|m| !m.is_empty()),
        "Error body has no message: {}",
        body
    );
}

/// Asserts that at least one policy covers the date
pub fn assert_covered(policies: &[InsurancePolicy], date: NaiveDate) {
    assert!(
        policies.iter().any(|p| p.covers(date)),
        "Expected {} to be covered by one of {} policies",
        date,
        policies.len()
    );
}

/// Asserts that no policy covers the date
pub fn assert_not_covered(policies: &[InsurancePolicy], date: NaiveDate) {
    if let Some(policy) = policies.iter().find(|p| p.covers(date)) {
        panic!(
            "Expected {} to be uncovered, but policy {} ({} to {}) covers it",
            date, policy.id, policy.start_date, policy.end_date
        );
    }
}

/// Asserts that a history lists policies by start date and claims by claim date
pub fn assert_history_chronological(history: &CarHistory) {
    for pair in history.policies.windows(2) {
        assert!(
            pair[0].start_date <= pair[1].start_date,
            "Policies out of order: {} before {}",
            pair[0].start_date,
            pair[1].start_date
        );
    }
    for pair in history.claims.windows(2) {
        assert!(
            pair[0].claim_date <= pair[1].claim_date,
            "Claims out of order: {} before {}",
            pair[0].claim_date,
            pair[1].claim_date
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{CarId, PolicyId};
    use serde_json::json;

    fn policy(start: NaiveDate, end: NaiveDate) -> InsurancePolicy {
        InsurancePolicy {
            id: PolicyId::new(1),
            car_id: CarId::new(1),
            provider: "Allianz".to_string(),
            start_date: start,
            end_date: end,
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_assert_error_code_passes() {
        let result: Result<(), _> = Err(InsuranceError::InvalidDateFormat);
        assert_error_code(&result, "invalid.date.format");
    }

    #[test]
    #[should_panic(expected = "Expected error code")]
    fn test_assert_error_code_fails_on_other_code() {
        let result: Result<(), _> = Err(InsuranceError::InvalidAmount);
        assert_error_code(&result, "invalid.date.format");
    }

    #[test]
    fn test_assert_error_body() {
        assert_error_body(
            &json!({"error": "invalid.amount", "message": "Amount must be > 0."}),
            "invalid.amount",
        );
    }

    #[test]
    fn test_coverage_assertions() {
        let policies = vec![policy(ymd(2024, 1, 1), ymd(2024, 12, 31))];
        assert_covered(&policies, ymd(2024, 12, 31));
        assert_not_covered(&policies, ymd(2025, 1, 1));
    }
}
