//! Motor Insurance Domain
//!
//! Owners, cars, insurance policies and claims, plus the services answering
//! the two business questions of the system:
//!
//! - Is a car insured on a given date? (any policy whose inclusive
//!   `[start, end]` range contains the date)
//! - What is a car's full policy and claim history?
//!
//! Claims are registered only after the date, car, coverage, amount and
//! description checks pass, and always start in the `Pending` status.

pub mod owner;
pub mod car;
pub mod policy;
pub mod claim;
pub mod error;
pub mod ports;
pub mod adapters;
pub mod services;
pub mod expiry;
pub mod seed;

pub use owner::Owner;
pub use car::{Car, CarSummary, NewCar};
pub use policy::{InsurancePolicy, NewPolicy};
pub use claim::{ClaimStatus, InsuranceClaim, NewClaim, MAX_AMOUNT_SCALE, MAX_DESCRIPTION_LEN};
pub use error::InsuranceError;
pub use ports::MotorStorePort;
pub use adapters::InMemoryMotorStore;
pub use services::{CarHistory, CarService, CreateClaimCommand, InsuranceValidity};
pub use expiry::{ExpiredPolicySweep, ExpiryConfig, ExpiryWorker};
