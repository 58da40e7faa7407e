//! Cars and their catalog projection

use serde::{Deserialize, Serialize};

use core_kernel::{CarId, CoreError, OwnerId};
use crate::owner::Owner;

/// An insured vehicle
///
/// `owner_id` is a lookup reference only; owners are fetched through the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: CarId,
    /// Vehicle identification number, unique across all cars
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year_of_manufacture: i32,
    pub owner_id: OwnerId,
}

/// Fields for registering a car before the store assigns its identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCar {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year_of_manufacture: i32,
    pub owner_id: OwnerId,
}

impl NewCar {
    /// Normalizes the VIN and rejects blank ones
    pub fn validated(mut self) -> Result<Self, CoreError> {
        self.vin = self.vin.trim().to_ascii_uppercase();
        if self.vin.is_empty() {
            return Err(CoreError::validation("VIN must not be empty"));
        }
        Ok(self)
    }
}

/// A car joined with its owner, as listed by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarSummary {
    pub car: Car,
    pub owner: Owner,
}
