//! Insurance claims

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{CarId, ClaimId};

/// Maximum accepted description length, in characters
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// Maximum number of decimal places an amount may carry
pub const MAX_AMOUNT_SCALE: u32 = 2;

/// Claim status
///
/// Claims are only ever created here, so `Pending` is the only status produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    #[default]
    Pending,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "Pending",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ClaimStatus::Pending),
            other => Err(format!("Unknown claim status: {}", other)),
        }
    }
}

/// A claim registered against a car
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceClaim {
    pub id: ClaimId,
    pub car_id: CarId,
    pub claim_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub status: ClaimStatus,
}

/// A validated claim awaiting its store-assigned identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClaim {
    pub car_id: CarId,
    pub claim_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub status: ClaimStatus,
}

impl NewClaim {
    /// Attaches the identity assigned by the store
    pub fn into_claim(self, id: ClaimId) -> InsuranceClaim {
        InsuranceClaim {
            id,
            car_id: self.car_id,
            claim_date: self.claim_date,
            description: self.description,
            amount: self.amount,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_text() {
        assert_eq!("Pending".parse::<ClaimStatus>().unwrap(), ClaimStatus::Pending);
        assert!("Approved".parse::<ClaimStatus>().is_err());
        assert_eq!(ClaimStatus::default().to_string(), "Pending");
    }

    #[test]
    fn test_claim_serializes_amount_as_text() {
        let claim = NewClaim {
            car_id: CarId::new(1),
            claim_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            description: "Rear bumper".to_string(),
            amount: Decimal::new(125050, 2),
            status: ClaimStatus::Pending,
        }
        .into_claim(ClaimId::new(7));

        let json = serde_json::to_value(&claim).unwrap();
        assert_eq!(json["amount"], "1250.50");
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["claim_date"], "2024-06-15");

        let back: InsuranceClaim = serde_json::from_value(json).unwrap();
        assert_eq!(back, claim);
    }
}
