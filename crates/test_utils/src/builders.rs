//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::NaiveDate;
use core_kernel::{CarId, OwnerId};
use domain_motor::{CreateClaimCommand, NewCar, NewPolicy};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use crate::fixtures::{DateFixtures, DecimalFixtures, IdFixtures, StringFixtures};

/// Builder for claim submissions, usable against the service or the HTTP API
#[derive(Debug, Clone)]
pub struct ClaimRequestBuilder {
    claim_date: String,
    description: String,
    amount: Decimal,
}

impl Default for ClaimRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimRequestBuilder {
    /// Creates a claim for mid-2024 with a standard description and amount
    pub fn new() -> Self {
        Self {
            claim_date: DateFixtures::iso(DateFixtures::mid_2024()),
            description: StringFixtures::claim_description().to_string(),
            amount: DecimalFixtures::claim_amount(),
        }
    }

    /// Sets the claim date from a calendar date
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.claim_date = DateFixtures::iso(date);
        self
    }

    /// Sets the raw claim date text, which need not be well formed
    pub fn with_raw_date(mut self, date: impl Into<String>) -> Self {
        self.claim_date = date.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    /// Builds the service-level command
    pub fn build(self) -> CreateClaimCommand {
        CreateClaimCommand {
            claim_date: self.claim_date,
            description: self.description,
            amount: self.amount,
        }
    }

    /// Builds the JSON request body accepted by the claims endpoint
    pub fn to_json(&self) -> Value {
        json!({
            "claimDate": self.claim_date,
            "description": self.description,
            "amount": self.amount,
        })
    }
}

/// Builder for cars to register in a store
#[derive(Debug, Clone)]
pub struct TestCarBuilder {
    vin: String,
    make: String,
    model: String,
    year_of_manufacture: i32,
    owner_id: OwnerId,
}

impl TestCarBuilder {
    /// Creates a builder for a car owned by the given owner
    pub fn new(owner_id: OwnerId) -> Self {
        Self {
            vin: "TESTVIN0001".to_string(),
            make: "Skoda".to_string(),
            model: "Octavia".to_string(),
            year_of_manufacture: 2020,
            owner_id,
        }
    }

    pub fn with_vin(mut self, vin: impl Into<String>) -> Self {
        self.vin = vin.into();
        self
    }

    pub fn with_make_model(mut self, make: impl Into<String>, model: impl Into<String>) -> Self {
        self.make = make.into();
        self.model = model.into();
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year_of_manufacture = year;
        self
    }

    pub fn build(self) -> NewCar {
        NewCar {
            vin: self.vin,
            make: self.make,
            model: self.model,
            year_of_manufacture: self.year_of_manufacture,
            owner_id: self.owner_id,
        }
    }
}

impl Default for TestCarBuilder {
    fn default() -> Self {
        Self::new(IdFixtures::ana_owner_id())
    }
}

/// Builder for policies to attach to a car
#[derive(Debug, Clone)]
pub struct TestPolicyBuilder {
    car_id: CarId,
    provider: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl TestPolicyBuilder {
    /// Creates a calendar-2024 policy for the given car
    pub fn new(car_id: CarId) -> Self {
        Self {
            car_id,
            provider: "Generali".to_string(),
            start_date: DateFixtures::allianz_start(),
            end_date: DateFixtures::allianz_end(),
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Sets the inclusive coverage range
    pub fn covering(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Builds the policy
    ///
    /// # Panics
    ///
    /// Panics if the start date is after the end date
    pub fn build(self) -> NewPolicy {
        NewPolicy::new(self.car_id, self.provider, self.start_date, self.end_date)
            .expect("Builder produced an invalid coverage range")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_claim_builder_defaults() {
        let command = ClaimRequestBuilder::new().build();

        assert_eq!(command.claim_date, "2024-06-15");
        assert_eq!(command.amount, DecimalFixtures::claim_amount());
        assert!(!command.description.is_empty());
    }

    #[test]
    fn test_claim_builder_json_uses_camel_case() {
        let body = ClaimRequestBuilder::new().with_amount(dec!(10)).to_json();

        assert_eq!(body["claimDate"], "2024-06-15");
        assert!(body.get("claim_date").is_none());
    }

    #[test]
    fn test_car_builder_customization() {
        let car = TestCarBuilder::default()
            .with_vin("abc123")
            .with_make_model("Ford", "Focus")
            .with_year(2015)
            .build();

        assert_eq!(car.vin, "abc123");
        assert_eq!(car.make, "Ford");
        assert_eq!(car.year_of_manufacture, 2015);
    }

    #[test]
    fn test_policy_builder_range() {
        let policy = TestPolicyBuilder::new(IdFixtures::golf_car_id())
            .covering(DateFixtures::groupama_start(), DateFixtures::golf_end())
            .build();

        assert_eq!(policy.window.start, DateFixtures::groupama_start());
        assert_eq!(policy.window.end, DateFixtures::golf_end());
    }

    #[test]
    #[should_panic(expected = "invalid coverage range")]
    fn test_policy_builder_rejects_inverted_range() {
        TestPolicyBuilder::new(IdFixtures::golf_car_id())
            .covering(DateFixtures::golf_end(), DateFixtures::allianz_start())
            .build();
    }
}
