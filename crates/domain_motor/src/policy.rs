//! Insurance policies and their coverage rule

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{CarId, CoreError, CoverageWindow, PolicyId};

/// An insurance policy covering one car for an inclusive range of days
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsurancePolicy {
    pub id: PolicyId,
    pub car_id: CarId,
    pub provider: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl InsurancePolicy {
    /// The days this policy covers
    pub fn window(&self) -> CoverageWindow {
        CoverageWindow {
            start: self.start_date,
            end: self.end_date,
        }
    }

    /// Returns true if the policy is active on `date`, both ends inclusive
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.window().contains(date)
    }
}

/// Fields for a policy before the store assigns its identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPolicy {
    pub car_id: CarId,
    pub provider: String,
    pub window: CoverageWindow,
}

impl NewPolicy {
    /// Builds a policy request, rejecting `start > end`
    pub fn new(
        car_id: CarId,
        provider: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            car_id,
            provider: provider.into(),
            window: CoverageWindow::new(start_date, end_date)?,
        })
    }
}

/// Returns true if any of `policies` is active on `date`
///
/// Overlapping policies are allowed; one match is enough.
pub fn is_covered<'a>(policies: impl IntoIterator<Item = &'a InsurancePolicy>, date: NaiveDate) -> bool {
    policies.into_iter().any(|policy| policy.covers(date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn policy(id: i64, start: NaiveDate, end: NaiveDate) -> InsurancePolicy {
        InsurancePolicy {
            id: PolicyId::new(id),
            car_id: CarId::new(1),
            provider: "Allianz".to_string(),
            start_date: start,
            end_date: end,
        }
    }

    #[test]
    fn test_covers_boundaries() {
        let p = policy(1, date(2024, 1, 1), date(2024, 12, 31));
        assert!(p.covers(date(2024, 1, 1)));
        assert!(p.covers(date(2024, 12, 31)));
        assert!(!p.covers(date(2025, 1, 1)));
    }

    #[test]
    fn test_is_covered_with_gap() {
        let policies = vec![
            policy(1, date(2024, 1, 1), date(2024, 3, 31)),
            policy(2, date(2024, 5, 1), date(2024, 12, 31)),
        ];
        assert!(is_covered(&policies, date(2024, 3, 31)));
        assert!(!is_covered(&policies, date(2024, 4, 15)));
        assert!(is_covered(&policies, date(2024, 5, 1)));
        assert!(!is_covered(&Vec::<InsurancePolicy>::new(), date(2024, 5, 1)));
    }

    #[test]
    fn test_new_policy_rejects_reversed_dates() {
        let result = NewPolicy::new(CarId::new(1), "Groupama", date(2025, 1, 2), date(2025, 1, 1));
        assert!(matches!(result, Err(CoreError::Temporal(_))));
    }

    fn policies_strategy() -> impl Strategy<Value = Vec<InsurancePolicy>> {
        prop::collection::vec((0u64..1500, 0u64..400), 0..5).prop_map(|spans| {
            let base = date(2022, 1, 1);
            spans
                .into_iter()
                .enumerate()
                .map(|(i, (offset, length))| {
                    let start = base + Days::new(offset);
                    policy(i as i64 + 1, start, start + Days::new(length))
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_covered_iff_some_policy_spans_the_day(
            policies in policies_strategy(),
            offset in 0u64..2000,
        ) {
            let day = date(2022, 1, 1) + Days::new(offset);
            let expected = policies
                .iter()
                .any(|p| p.start_date <= day && day <= p.end_date);

            prop_assert_eq!(is_covered(&policies, day), expected);
        }

        #[test]
        fn prop_policy_covers_its_own_bounds(policies in policies_strategy()) {
            for p in &policies {
                prop_assert!(is_covered(&policies, p.start_date));
                prop_assert!(is_covered(&policies, p.end_date));
            }
        }
    }
}
