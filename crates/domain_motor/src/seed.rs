//! Demonstration dataset loaded into empty stores at startup

use chrono::NaiveDate;
use tracing::info;

use core_kernel::PortError;

use crate::car::NewCar;
use crate::policy::NewPolicy;
use crate::ports::MotorStorePort;

/// An owner with the cars registered to them
#[derive(Debug, Clone)]
pub struct SeedOwner {
    pub name: &'static str,
    pub email: &'static str,
    pub cars: Vec<SeedCar>,
}

#[derive(Debug, Clone)]
pub struct SeedCar {
    pub vin: &'static str,
    pub make: &'static str,
    pub model: &'static str,
    pub year_of_manufacture: i32,
    pub policies: Vec<SeedPolicy>,
}

#[derive(Debug, Clone)]
pub struct SeedPolicy {
    pub provider: &'static str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Two owners, two cars and three policies
///
/// The first car holds back-to-back calendar-year policies for 2024 and 2025.
pub fn demo_dataset() -> Vec<SeedOwner> {
    vec![
        SeedOwner {
            name: "Ana Pop",
            email: "ana.pop@example.com",
            cars: vec![SeedCar {
                vin: "VIN12345",
                make: "Dacia",
                model: "Logan",
                year_of_manufacture: 2018,
                policies: vec![
                    SeedPolicy {
                        provider: "Allianz",
                        start_date: ymd(2024, 1, 1),
                        end_date: ymd(2024, 12, 31),
                    },
                    SeedPolicy {
                        provider: "Groupama",
                        start_date: ymd(2025, 1, 1),
                        end_date: ymd(2025, 12, 31),
                    },
                ],
            }],
        },
        SeedOwner {
            name: "Bogdan Ionescu",
            email: "bogdan.ionescu@example.com",
            cars: vec![SeedCar {
                vin: "VIN67890",
                make: "VW",
                model: "Golf",
                year_of_manufacture: 2021,
                policies: vec![SeedPolicy {
                    provider: "Allianz",
                    start_date: ymd(2025, 3, 1),
                    end_date: ymd(2026, 3, 1),
                }],
            }],
        },
    ]
}

/// Loads [`demo_dataset`] into `store` unless it already holds owners
///
/// Returns true if data was inserted.
pub async fn ensure_seeded(store: &dyn MotorStorePort) -> Result<bool, PortError> {
    if !store.is_empty().await? {
        return Ok(false);
    }

    for seed_owner in demo_dataset() {
        let owner = store
            .create_owner(seed_owner.name, Some(seed_owner.email))
            .await?;
        for seed_car in seed_owner.cars {
            let car = store
                .create_car(NewCar {
                    vin: seed_car.vin.to_string(),
                    make: seed_car.make.to_string(),
                    model: seed_car.model.to_string(),
                    year_of_manufacture: seed_car.year_of_manufacture,
                    owner_id: owner.id,
                })
                .await?;
            for seed_policy in seed_car.policies {
                let policy = NewPolicy::new(
                    car.id,
                    seed_policy.provider,
                    seed_policy.start_date,
                    seed_policy.end_date,
                )
                .map_err(|e| PortError::validation(e.to_string()))?;
                store.create_policy(policy).await?;
            }
        }
    }

    info!("Seeded demo owners, cars and policies");
    Ok(true)
}
