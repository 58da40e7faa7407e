//! PostgreSQL Motor Adapter
//!
//! The internal (database) implementation of `MotorStorePort`. It delegates
//! to the car, policy and claim repositories and converts their rows into
//! domain models.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, CarId, ClaimId, DomainPort, HealthCheckResult, HealthCheckable, OwnerId,
    PolicyId, PortError,
};
use domain_motor::{
    Car, CarSummary, ClaimStatus, InsuranceClaim, InsurancePolicy, MotorStorePort, NewCar,
    NewClaim, NewPolicy, Owner,
};

use crate::error::DatabaseError;
use crate::repositories::cars::{CarRow, CarWithOwnerRow, NewCarRow, OwnerRow};
use crate::repositories::claims::{ClaimRow, NewClaimRow};
use crate::repositories::policies::PolicyRow;
use crate::repositories::{CarRepository, ClaimRepository, PolicyRepository};

/// PostgreSQL-backed implementation of `MotorStorePort`
///
/// Database errors are translated to `PortError` variants:
/// - duplicate VIN -> `PortError::Conflict`
/// - missing parent rows and check violations -> `PortError::Validation`
/// - connection problems -> `PortError::Connection`
#[derive(Debug, Clone)]
pub struct PostgresMotorAdapter {
    cars: CarRepository,
    policies: PolicyRepository,
    claims: ClaimRepository,
    pool: PgPool,
}

impl PostgresMotorAdapter {
    /// Creates a new adapter over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            cars: CarRepository::new(pool.clone()),
            policies: PolicyRepository::new(pool.clone()),
            claims: ClaimRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresMotorAdapter {}

#[async_trait]
impl HealthCheckable for PostgresMotorAdapter {
    /// Runs `SELECT 1` to verify the pool can reach the database
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        let (status, message) = match result {
            Ok(_) => (AdapterHealth::Healthy, None),
            Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e))),
        };

        HealthCheckResult {
            adapter_id: "postgres-motor-adapter".to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl MotorStorePort for PostgresMotorAdapter {
    #[instrument(skip(self))]
    async fn list_cars(&self) -> Result<Vec<CarSummary>, PortError> {
        let rows = self.cars.list_with_owners().await?;
        debug!(count = rows.len(), "Fetched cars with owners");
        Ok(rows.into_iter().map(row_to_summary).collect())
    }

    #[instrument(skip(self), fields(car_id = %id))]
    async fn get_car(&self, id: CarId) -> Result<Option<Car>, PortError> {
        let row = self.cars.find_by_id(id.value()).await?;
        Ok(row.map(row_to_car))
    }

    #[instrument(skip(self), fields(car_id = %car_id))]
    async fn policies_for_car(&self, car_id: CarId) -> Result<Vec<InsurancePolicy>, PortError> {
        let rows = self.policies.find_by_car(car_id.value()).await?;
        Ok(rows.into_iter().map(row_to_policy).collect())
    }

    #[instrument(skip(self), fields(car_id = %car_id))]
    async fn claims_for_car(&self, car_id: CarId) -> Result<Vec<InsuranceClaim>, PortError> {
        let rows = self.claims.find_by_car(car_id.value()).await?;
        rows.into_iter().map(row_to_claim).collect()
    }

    #[instrument(skip(self))]
    async fn policies_ending_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<InsurancePolicy>, PortError> {
        let rows = self.policies.find_ending_between(from, to).await?;
        Ok(rows.into_iter().map(row_to_policy).collect())
    }

    async fn is_empty(&self) -> Result<bool, PortError> {
        Ok(self.cars.count_owners().await? == 0)
    }

    #[instrument(skip(self, claim), fields(car_id = %claim.car_id))]
    async fn create_claim(&self, claim: NewClaim) -> Result<InsuranceClaim, PortError> {
        let row = self
            .claims
            .insert(NewClaimRow {
                car_id: claim.car_id.value(),
                claim_date: claim.claim_date,
                description: claim.description,
                amount: claim.amount,
                status: claim.status.as_str().to_string(),
            })
            .await?;
        debug!(claim_id = row.claim_id, "Inserted claim");
        row_to_claim(row)
    }

    #[instrument(skip(self))]
    async fn create_owner(&self, name: &str, email: Option<&str>) -> Result<Owner, PortError> {
        let row = self.cars.insert_owner(name, email).await?;
        Ok(row_to_owner(row))
    }

    #[instrument(skip(self, car), fields(vin = %car.vin))]
    async fn create_car(&self, car: NewCar) -> Result<Car, PortError> {
        let car = car
            .validated()
            .map_err(|e| PortError::validation_field(e.to_string(), "vin"))?;
        let row = self
            .cars
            .insert(NewCarRow {
                vin: car.vin,
                make: car.make,
                model: car.model,
                year_of_manufacture: car.year_of_manufacture,
                owner_id: car.owner_id.value(),
            })
            .await?;
        Ok(row_to_car(row))
    }

    #[instrument(skip(self, policy), fields(car_id = %policy.car_id))]
    async fn create_policy(&self, policy: NewPolicy) -> Result<InsurancePolicy, PortError> {
        let row = self
            .policies
            .insert(
                policy.car_id.value(),
                &policy.provider,
                policy.window.start,
                policy.window.end,
            )
            .await?;
        Ok(row_to_policy(row))
    }
}

// ============================================================================
// Row conversions
// ============================================================================

fn row_to_owner(row: OwnerRow) -> Owner {
    Owner {
        id: OwnerId::new(row.owner_id),
        name: row.name,
        email: row.email,
    }
}

fn row_to_car(row: CarRow) -> Car {
    Car {
        id: CarId::new(row.car_id),
        vin: row.vin,
        make: row.make,
        model: row.model,
        year_of_manufacture: row.year_of_manufacture,
        owner_id: OwnerId::new(row.owner_id),
    }
}

fn row_to_summary(row: CarWithOwnerRow) -> CarSummary {
    CarSummary {
        car: Car {
            id: CarId::new(row.car_id),
            vin: row.vin,
            make: row.make,
            model: row.model,
            year_of_manufacture: row.year_of_manufacture,
            owner_id: OwnerId::new(row.owner_id),
        },
        owner: Owner {
            id: OwnerId::new(row.owner_id),
            name: row.owner_name,
            email: row.owner_email,
        },
    }
}

fn row_to_policy(row: PolicyRow) -> InsurancePolicy {
    InsurancePolicy {
        id: PolicyId::new(row.policy_id),
        car_id: CarId::new(row.car_id),
        provider: row.provider,
        start_date: row.start_date,
        end_date: row.end_date,
    }
}

fn row_to_claim(row: ClaimRow) -> Result<InsuranceClaim, PortError> {
    let status: ClaimStatus = row
        .status
        .parse()
        .map_err(|e: String| PortError::from(DatabaseError::SerializationError(e)))?;

    Ok(InsuranceClaim {
        id: ClaimId::new(row.claim_id),
        car_id: CarId::new(row.car_id),
        claim_date: row.claim_date,
        description: row.description,
        amount: row.amount,
        status,
    })
}
