//! Motor insurance application services
//!
//! `CarService` answers the two business questions of the system (is a car
//! insured on a date, what is its policy and claim history) and registers new
//! claims. All operations are request-scoped: the service holds no mutable
//! state, only a handle to the store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use core_kernel::temporal::{parse_calendar_date, parse_date_or_timestamp, today_utc};
use core_kernel::CarId;

use crate::car::{Car, CarSummary};
use crate::claim::{
    ClaimStatus, InsuranceClaim, NewClaim, MAX_AMOUNT_SCALE, MAX_DESCRIPTION_LEN,
};
use crate::error::InsuranceError;
use crate::policy::{is_covered, InsurancePolicy};
use crate::ports::MotorStorePort;

/// Outcome of a validity check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsuranceValidity {
    pub car_id: CarId,
    pub date: NaiveDate,
    pub valid: bool,
}

/// Raw claim input as received from a caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateClaimCommand {
    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    pub claim_date: String,
    pub description: String,
    pub amount: Decimal,
}

/// A car's full policy and claim timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarHistory {
    pub car: Car,
    /// Ascending by start date
    pub policies: Vec<InsurancePolicy>,
    /// Ascending by claim date
    pub claims: Vec<InsuranceClaim>,
}

/// Service for car validity checks, claim registration and history
#[derive(Clone)]
pub struct CarService {
    store: Arc<dyn MotorStorePort>,
}

impl CarService {
    /// Creates a service over the given store
    pub fn new(store: Arc<dyn MotorStorePort>) -> Self {
        Self { store }
    }

    /// Lists all cars with their owners
    #[instrument(skip(self))]
    pub async fn list_cars(&self) -> Result<Vec<CarSummary>, InsuranceError> {
        let mut cars = self.store.list_cars().await?;
        cars.sort_by_key(|summary| summary.car.id);
        debug!(count = cars.len(), "Listed cars");
        Ok(cars)
    }

    /// Determines whether a car is insured on a calendar date
    ///
    /// # Errors
    ///
    /// - `InvalidDateFormat` if `date_text` is not `YYYY-MM-DD`
    /// - `NotFound` if the car does not exist
    #[instrument(skip(self), fields(car_id = %car_id))]
    pub async fn is_insurance_valid(
        &self,
        car_id: CarId,
        date_text: &str,
    ) -> Result<InsuranceValidity, InsuranceError> {
        let date = parse_calendar_date(date_text)?;
        self.require_car(car_id).await?;

        let policies = self.store.policies_for_car(car_id).await?;
        let valid = is_covered(&policies, date);

        debug!(%date, valid, "Evaluated insurance validity");
        Ok(InsuranceValidity { car_id, date, valid })
    }

    /// Validates and persists a new claim
    ///
    /// Checks run in a fixed order and stop at the first failure:
    /// date format, car existence, policy coverage, future date, amount,
    /// description. The claim is stored with status `Pending`.
    #[instrument(skip(self, command), fields(car_id = %car_id))]
    pub async fn create_claim(
        &self,
        car_id: CarId,
        command: CreateClaimCommand,
    ) -> Result<InsuranceClaim, InsuranceError> {
        self.create_claim_as_of(car_id, command, today_utc()).await
    }

    /// Same as [`CarService::create_claim`] with an explicit "today"
    pub async fn create_claim_as_of(
        &self,
        car_id: CarId,
        command: CreateClaimCommand,
        today: NaiveDate,
    ) -> Result<InsuranceClaim, InsuranceError> {
        let claim_date = parse_date_or_timestamp(&command.claim_date)?;
        self.require_car(car_id).await?;

        let policies = self.store.policies_for_car(car_id).await?;
        if !is_covered(&policies, claim_date) {
            return Err(InsuranceError::NoValidPolicy { car_id, claim_date });
        }

        validate_claim_fields(claim_date, command.amount, &command.description, today)?;

        let claim = self
            .store
            .create_claim(NewClaim {
                car_id,
                claim_date,
                description: command.description,
                amount: command.amount,
                status: ClaimStatus::Pending,
            })
            .await?;

        info!(claim_id = %claim.id, %claim_date, amount = %claim.amount, "Claim registered");
        Ok(claim)
    }

    /// Assembles a car's policies and claims, each sorted ascending by date
    #[instrument(skip(self), fields(car_id = %car_id))]
    pub async fn get_car_history(&self, car_id: CarId) -> Result<CarHistory, InsuranceError> {
        let car = self.require_car(car_id).await?;

        let mut policies = self.store.policies_for_car(car_id).await?;
        policies.sort_by_key(|p| (p.start_date, p.id));

        let mut claims = self.store.claims_for_car(car_id).await?;
        claims.sort_by_key(|c| (c.claim_date, c.id));

        debug!(
            policies = policies.len(),
            claims = claims.len(),
            "Assembled car history"
        );
        Ok(CarHistory { car, policies, claims })
    }

    async fn require_car(&self, car_id: CarId) -> Result<Car, InsuranceError> {
        self.store
            .get_car(car_id)
            .await?
            .ok_or_else(|| InsuranceError::car_not_found(car_id))
    }
}

/// Business rules on the claim itself, applied after coverage is confirmed
fn validate_claim_fields(
    claim_date: NaiveDate,
    amount: Decimal,
    description: &str,
    today: NaiveDate,
) -> Result<(), InsuranceError> {
    if claim_date > today {
        return Err(InsuranceError::InvalidClaimDate);
    }
    if amount <= Decimal::ZERO {
        return Err(InsuranceError::InvalidAmount);
    }
    if amount.normalize().scale() > MAX_AMOUNT_SCALE {
        return Err(InsuranceError::AmountTooPrecise);
    }
    if description.trim().is_empty() {
        return Err(InsuranceError::RequiredDescription);
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(InsuranceError::DescriptionTooLong);
    }
    Ok(())
}
