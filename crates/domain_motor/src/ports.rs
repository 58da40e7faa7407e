//! Motor Domain Ports
//!
//! The `MotorStorePort` trait is everything the motor insurance services need
//! from persistence. Two adapters implement it:
//!
//! - **PostgreSQL Adapter**: `infra_db::adapters::PostgresMotorAdapter`
//! - **In-memory Adapter**: [`crate::adapters::InMemoryMotorStore`], used for
//!   local demos and tests
//!
//! ```rust,ignore
//! let store: Arc<dyn MotorStorePort> = match config.store_backend {
//!     StoreBackend::Postgres => Arc::new(PostgresMotorAdapter::new(pool)),
//!     StoreBackend::Memory => Arc::new(InMemoryMotorStore::new()),
//! };
//! let service = CarService::new(store);
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{CarId, DomainPort, HealthCheckable, PortError};

use crate::car::{Car, CarSummary, NewCar};
use crate::claim::{InsuranceClaim, NewClaim};
use crate::owner::Owner;
use crate::policy::{InsurancePolicy, NewPolicy};

/// Persistence operations for owners, cars, policies and claims
///
/// Relations are expressed as foreign-key identities; joins happen inside the
/// adapter, never as object graphs.
#[async_trait]
pub trait MotorStorePort: DomainPort + HealthCheckable {
    // ========================================================================
    // Queries
    // ========================================================================

    /// Lists every car joined with its owner, ordered by car identity
    async fn list_cars(&self) -> Result<Vec<CarSummary>, PortError>;

    /// Retrieves a car, or `None` if no car has this identity
    async fn get_car(&self, id: CarId) -> Result<Option<Car>, PortError>;

    /// Retrieves every policy of a car, in no particular order
    async fn policies_for_car(&self, car_id: CarId) -> Result<Vec<InsurancePolicy>, PortError>;

    /// Retrieves every claim of a car, in no particular order
    async fn claims_for_car(&self, car_id: CarId) -> Result<Vec<InsuranceClaim>, PortError>;

    /// Retrieves policies whose last covered day lies in `[from, to]`
    async fn policies_ending_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<InsurancePolicy>, PortError>;

    /// Returns true if no owner has been stored yet
    async fn is_empty(&self) -> Result<bool, PortError>;

    // ========================================================================
    // Commands
    // ========================================================================

    /// Persists a claim as a single insert and returns it with its new identity
    async fn create_claim(&self, claim: NewClaim) -> Result<InsuranceClaim, PortError>;

    /// Provisions an owner
    async fn create_owner(&self, name: &str, email: Option<&str>) -> Result<Owner, PortError>;

    /// Provisions a car; fails with `PortError::Conflict` on a duplicate VIN
    async fn create_car(&self, car: NewCar) -> Result<Car, PortError>;

    /// Provisions a policy for an existing car
    async fn create_policy(&self, policy: NewPolicy) -> Result<InsurancePolicy, PortError>;
}
