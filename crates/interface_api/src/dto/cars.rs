//! Car DTOs
//!
//! JSON field names are camelCase; amounts serialize as decimal strings and
//! dates as `YYYY-MM-DD`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::temporal::format_calendar_date;

use domain_motor::{
    CarHistory, CarSummary, ClaimStatus, CreateClaimCommand, InsuranceClaim, InsurancePolicy,
    InsuranceValidity, MAX_DESCRIPTION_LEN,
};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDto {
    pub id: i64,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub owner_id: i64,
    pub owner_name: String,
    pub owner_email: Option<String>,
}

impl From<CarSummary> for CarDto {
    fn from(summary: CarSummary) -> Self {
        let CarSummary { car, owner } = summary;
        Self {
            id: car.id.value(),
            vin: car.vin,
            make: car.make,
            model: car.model,
            year: car.year_of_manufacture,
            owner_id: owner.id.value(),
            owner_name: owner.name,
            owner_email: owner.email,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ValidityQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceValidityResponse {
    pub car_id: i64,
    /// Canonical `YYYY-MM-DD` echo of the requested date
    pub date: String,
    pub valid: bool,
}

impl From<InsuranceValidity> for InsuranceValidityResponse {
    fn from(validity: InsuranceValidity) -> Self {
        Self {
            car_id: validity.car_id.value(),
            date: format_calendar_date(validity.date),
            valid: validity.valid,
        }
    }
}

/// `MAX_DESCRIPTION_LEN` typed as `u64` for the `validate` derive.
const MAX_DESCRIPTION_LEN_U64: u64 = MAX_DESCRIPTION_LEN as u64;

/// Claim submission
///
/// Absent fields fall back to empty text and a zero amount, leaving the
/// business checks to report what is wrong.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateClaimRequest {
    pub claim_date: Option<String>,
    #[validate(length(
        max = MAX_DESCRIPTION_LEN_U64,
        message = "Description must be at most 1000 characters"
    ))]
    pub description: Option<String>,
    pub amount: Option<Decimal>,
}

impl From<CreateClaimRequest> for CreateClaimCommand {
    fn from(request: CreateClaimRequest) -> Self {
        Self {
            claim_date: request.claim_date.unwrap_or_default(),
            description: request.description.unwrap_or_default(),
            amount: request.amount.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    pub id: i64,
    pub car_id: i64,
    pub claim_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub status: ClaimStatus,
}

impl From<InsuranceClaim> for ClaimResponse {
    fn from(claim: InsuranceClaim) -> Self {
        Self {
            id: claim.id.value(),
            car_id: claim.car_id.value(),
            claim_date: claim.claim_date,
            description: claim.description,
            amount: claim.amount,
            status: claim.status,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDto {
    pub id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub provider: String,
}

impl From<InsurancePolicy> for PolicyDto {
    fn from(policy: InsurancePolicy) -> Self {
        Self {
            id: policy.id.value(),
            start_date: policy.start_date,
            end_date: policy.end_date,
            provider: policy.provider,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarHistoryResponse {
    pub car_id: i64,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub policies: Vec<PolicyDto>,
    pub claims: Vec<ClaimResponse>,
}

impl From<CarHistory> for CarHistoryResponse {
    fn from(history: CarHistory) -> Self {
        Self {
            car_id: history.car.id.value(),
            vin: history.car.vin,
            make: history.car.make,
            model: history.car.model,
            policies: history.policies.into_iter().map(PolicyDto::from).collect(),
            claims: history.claims.into_iter().map(ClaimResponse::from).collect(),
        }
    }
}
