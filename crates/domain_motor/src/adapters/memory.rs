//! In-memory implementation of `MotorStorePort`

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use core_kernel::{
    AdapterHealth, CarId, ClaimId, DomainPort, HealthCheckResult, HealthCheckable, OwnerId,
    PolicyId, PortError,
};

use crate::car::{Car, CarSummary, NewCar};
use crate::claim::{InsuranceClaim, NewClaim};
use crate::owner::Owner;
use crate::policy::{InsurancePolicy, NewPolicy};
use crate::ports::MotorStorePort;

#[derive(Debug, Default)]
struct State {
    owners: BTreeMap<OwnerId, Owner>,
    cars: BTreeMap<CarId, Car>,
    // Kept in insertion order; callers must not rely on date ordering.
    policies: Vec<InsurancePolicy>,
    claims: Vec<InsuranceClaim>,
    sequences: Sequences,
}

/// Per-table identity counters, mirroring `BIGSERIAL` columns
#[derive(Debug, Default)]
struct Sequences {
    owner: i64,
    car: i64,
    policy: i64,
    claim: i64,
}

fn next(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// Store holding all records in process memory
///
/// Each entity type has its own identity sequence starting at 1, the way the
/// PostgreSQL schema assigns them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMotorStore {
    state: Arc<RwLock<State>>,
    offline: Arc<AtomicBool>,
}

impl InMemoryMotorStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent operation fail with a connection error, or
    /// restores normal operation
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), PortError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(PortError::connection("in-memory store is offline"));
        }
        Ok(())
    }
}

impl DomainPort for InMemoryMotorStore {}

#[async_trait]
impl HealthCheckable for InMemoryMotorStore {
    async fn health_check(&self) -> HealthCheckResult {
        let (status, message) = match self.ensure_online() {
            Ok(()) => (AdapterHealth::Healthy, None),
            Err(e) => (AdapterHealth::Unhealthy, Some(e.to_string())),
        };
        HealthCheckResult {
            adapter_id: "memory-motor-store".to_string(),
            status,
            latency_ms: 0,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl MotorStorePort for InMemoryMotorStore {
    async fn list_cars(&self) -> Result<Vec<CarSummary>, PortError> {
        self.ensure_online()?;
        let state = self.state.read().await;
        state
            .cars
            .values()
            .map(|car| -> Result<CarSummary, PortError> {
                let owner = state
                    .owners
                    .get(&car.owner_id)
                    .cloned()
                    .ok_or_else(|| PortError::not_found(OwnerId::entity(), car.owner_id))?;
                Ok(CarSummary {
                    car: car.clone(),
                    owner,
                })
            })
            .collect()
    }

    async fn get_car(&self, id: CarId) -> Result<Option<Car>, PortError> {
        self.ensure_online()?;
        Ok(self.state.read().await.cars.get(&id).cloned())
    }

    async fn policies_for_car(&self, car_id: CarId) -> Result<Vec<InsurancePolicy>, PortError> {
        self.ensure_online()?;
        let state = self.state.read().await;
        Ok(state
            .policies
            .iter()
            .filter(|p| p.car_id == car_id)
            .cloned()
            .collect())
    }

    async fn claims_for_car(&self, car_id: CarId) -> Result<Vec<InsuranceClaim>, PortError> {
        self.ensure_online()?;
        let state = self.state.read().await;
        Ok(state
            .claims
            .iter()
            .filter(|c| c.car_id == car_id)
            .cloned()
            .collect())
    }

    async fn policies_ending_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<InsurancePolicy>, PortError> {
        self.ensure_online()?;
        let state = self.state.read().await;
        Ok(state
            .policies
            .iter()
            .filter(|p| from <= p.end_date && p.end_date <= to)
            .cloned()
            .collect())
    }

    async fn is_empty(&self) -> Result<bool, PortError> {
        self.ensure_online()?;
        Ok(self.state.read().await.owners.is_empty())
    }

    async fn create_claim(&self, claim: NewClaim) -> Result<InsuranceClaim, PortError> {
        self.ensure_online()?;
        let mut state = self.state.write().await;
        if !state.cars.contains_key(&claim.car_id) {
            return Err(PortError::not_found(CarId::entity(), claim.car_id));
        }
        let id = ClaimId::new(next(&mut state.sequences.claim));
        let claim = claim.into_claim(id);
        state.claims.push(claim.clone());
        Ok(claim)
    }

    async fn create_owner(&self, name: &str, email: Option<&str>) -> Result<Owner, PortError> {
        self.ensure_online()?;
        let mut state = self.state.write().await;
        let owner = Owner {
            id: OwnerId::new(next(&mut state.sequences.owner)),
            name: name.to_string(),
            email: email.map(str::to_string),
        };
        state.owners.insert(owner.id, owner.clone());
        Ok(owner)
    }

    async fn create_car(&self, car: NewCar) -> Result<Car, PortError> {
        self.ensure_online()?;
        let car = car
            .validated()
            .map_err(|e| PortError::validation_field(e.to_string(), "vin"))?;
        let mut state = self.state.write().await;
        if !state.owners.contains_key(&car.owner_id) {
            return Err(PortError::not_found(OwnerId::entity(), car.owner_id));
        }
        if state.cars.values().any(|c| c.vin == car.vin) {
            return Err(PortError::conflict(format!(
                "Car with VIN '{}' already exists",
                car.vin
            )));
        }
        let car = Car {
            id: CarId::new(next(&mut state.sequences.car)),
            vin: car.vin,
            make: car.make,
            model: car.model,
            year_of_manufacture: car.year_of_manufacture,
            owner_id: car.owner_id,
        };
        state.cars.insert(car.id, car.clone());
        Ok(car)
    }

    async fn create_policy(&self, policy: NewPolicy) -> Result<InsurancePolicy, PortError> {
        self.ensure_online()?;
        let mut state = self.state.write().await;
        if !state.cars.contains_key(&policy.car_id) {
            return Err(PortError::not_found(CarId::entity(), policy.car_id));
        }
        let policy = InsurancePolicy {
            id: PolicyId::new(next(&mut state.sequences.policy)),
            car_id: policy.car_id,
            provider: policy.provider,
            start_date: policy.window.start,
            end_date: policy.window.end,
        };
        state.policies.push(policy.clone());
        Ok(policy)
    }
}
