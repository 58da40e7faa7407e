//! Core Kernel - Foundational types and utilities for the motor insurance system
//!
//! This crate provides the building blocks shared by the domain, storage and
//! interface layers:
//! - Strongly-typed entity identifiers
//! - Inclusive calendar-date coverage windows and date parsing
//! - Port error and health-check infrastructure for adapters

pub mod temporal;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use temporal::{CoverageWindow, TemporalError};
pub use identifiers::{OwnerId, CarId, PolicyId, ClaimId};
pub use ports::{
    PortError, DomainPort, AdapterHealth, HealthCheckResult, HealthCheckable,
};
pub use error::CoreError;
