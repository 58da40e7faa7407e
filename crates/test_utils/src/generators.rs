//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data that
//! maintains domain invariants, plus `fake`-backed generators for
//! human-looking owner details.

use chrono::{Duration, NaiveDate};
use core_kernel::CoverageWindow;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid epoch")
}

/// Strategy for generating calendar dates between 2020 and the end of 2029
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..3653i64).prop_map(|days| epoch() + Duration::days(days))
}

/// Strategy for generating valid coverage windows (start on or before end)
pub fn coverage_window_strategy() -> impl Strategy<Value = CoverageWindow> {
    (date_strategy(), 0i64..730i64).prop_map(|(start, length)| {
        CoverageWindow::new(start, start + Duration::days(length))
            .expect("Generated invalid window")
    })
}

/// Strategy for generating claim amounts the service accepts
pub fn positive_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64, 0u32..3u32).prop_map(|(m, s)| Decimal::new(m, s))
}

/// Strategy for generating zero or negative claim amounts
pub fn non_positive_amount_strategy() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..=0i64, 0u32..3u32).prop_map(|(m, s)| Decimal::new(m, s))
}

/// Strategy for generating VINs
pub fn vin_strategy() -> impl Strategy<Value = String> {
    "[A-HJ-NPR-Z0-9]{17}".prop_map(|s| s)
}

/// Strategy for generating descriptions with visible content
pub fn description_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z ,.]{0,120}".prop_map(|s| s)
}

/// Strategy for generating whitespace-only descriptions
pub fn blank_description_strategy() -> impl Strategy<Value = String> {
    "[ \t\n]{0,8}".prop_map(|s| s)
}

/// Generates a plausible owner name and email address
pub fn fake_owner() -> (String, String) {
    let name: String = Name().fake();
    let email: String = SafeEmail().fake();
    (name, email)
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn window_start_not_after_end(window in coverage_window_strategy()) {
            prop_assert!(window.start <= window.end);
            prop_assert!(window.contains(window.start));
            prop_assert!(window.contains(window.end));
        }

        #[test]
        fn positive_amounts_are_positive(amount in positive_amount_strategy()) {
            prop_assert!(amount > Decimal::ZERO);
        }

        #[test]
        fn non_positive_amounts_are_rejected_values(amount in non_positive_amount_strategy()) {
            prop_assert!(amount <= Decimal::ZERO);
        }

        #[test]
        fn blank_descriptions_trim_to_empty(text in blank_description_strategy()) {
            prop_assert!(text.trim().is_empty());
        }

        #[test]
        fn vins_have_seventeen_characters(vin in vin_strategy()) {
            prop_assert_eq!(vin.len(), 17);
        }
    }

    #[test]
    fn test_fake_owner_has_email() {
        let (name, email) = fake_owner();
        assert!(!name.is_empty());
        assert!(email.contains('@'));
    }
}
