//! Motor insurance domain errors
//!
//! Every variant carries a stable string code that transport adapters use to
//! choose a response status. The `Display` text is the message shown to callers.

use chrono::NaiveDate;
use thiserror::Error;

use core_kernel::{CarId, PortError, TemporalError};

/// Errors returned by the motor insurance services
#[derive(Debug, Error)]
pub enum InsuranceError {
    #[error("Invalid date format. Use YYYY-MM-DD.")]
    InvalidDateFormat,

    #[error("{entity} not found for Id {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("No active insurance policy for Car Id {car_id} on {}", claim_date.format("%Y-%m-%d"))]
    NoValidPolicy { car_id: CarId, claim_date: NaiveDate },

    #[error("Claim date cannot be in the future")]
    InvalidClaimDate,

    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Amount must have at most 2 decimal places")]
    AmountTooPrecise,

    #[error("Description is required")]
    RequiredDescription,

    #[error("Description must be at most 1000 characters")]
    DescriptionTooLong,

    #[error("Store failure: {0}")]
    Store(#[from] PortError),
}

impl InsuranceError {
    pub const INVALID_DATE_FORMAT: &'static str = "invalid.date.format";
    pub const RECORD_NOT_FOUND: &'static str = "record.not.found";
    pub const NO_VALID_POLICY: &'static str = "no.valid.policy";
    pub const INVALID_CLAIM_DATE: &'static str = "invalid.claim.date";
    pub const INVALID_AMOUNT: &'static str = "invalid.amount";
    pub const REQUIRED_DESCRIPTION: &'static str = "required.description";
    pub const INVALID_DESCRIPTION: &'static str = "invalid.description";
    pub const STORE_FAILURE: &'static str = "store.failure";

    /// Not-found error for a car
    pub fn car_not_found(id: CarId) -> Self {
        InsuranceError::NotFound {
            entity: CarId::entity(),
            id: id.value(),
        }
    }

    /// Returns the stable code identifying this error
    pub fn code(&self) -> &'static str {
        match self {
            InsuranceError::InvalidDateFormat => Self::INVALID_DATE_FORMAT,
            InsuranceError::NotFound { .. } => Self::RECORD_NOT_FOUND,
            InsuranceError::NoValidPolicy { .. } => Self::NO_VALID_POLICY,
            InsuranceError::InvalidClaimDate => Self::INVALID_CLAIM_DATE,
            InsuranceError::InvalidAmount | InsuranceError::AmountTooPrecise => {
                Self::INVALID_AMOUNT
            }
            InsuranceError::RequiredDescription => Self::REQUIRED_DESCRIPTION,
            InsuranceError::DescriptionTooLong => Self::INVALID_DESCRIPTION,
            InsuranceError::Store(_) => Self::STORE_FAILURE,
        }
    }

    /// True for the not-found family of errors
    pub fn is_not_found(&self) -> bool {
        matches!(self, InsuranceError::NotFound { .. })
    }

    /// True for failures caused by the caller's input or by a business rule
    pub fn is_business_rule(&self) -> bool {
        !matches!(self, InsuranceError::Store(_))
    }
}

impl From<TemporalError> for InsuranceError {
    fn from(_: TemporalError) -> Self {
        InsuranceError::InvalidDateFormat
    }
}
