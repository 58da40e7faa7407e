//! Pre-built Test Fixtures
//!
//! Ready-to-use data matching the demo dataset the server seeds at startup.
//! Identities assume a freshly seeded store: each table's sequence starts at 1.

use chrono::NaiveDate;
use core_kernel::temporal::format_calendar_date;
use core_kernel::{CarId, OwnerId};
use domain_motor::seed::ensure_seeded;
use domain_motor::InMemoryMotorStore;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Ana Pop, owner of the Dacia
    pub fn ana_owner_id() -> OwnerId {
        OwnerId::new(1)
    }

    /// Bogdan Ionescu, owner of the Golf
    pub fn bogdan_owner_id() -> OwnerId {
        OwnerId::new(2)
    }

    /// The 2018 Dacia Logan, covered for 2024 and 2025
    pub fn dacia_car_id() -> CarId {
        CarId::new(1)
    }

    /// The 2021 VW Golf, covered from 2025-03-01 to 2026-03-01
    pub fn golf_car_id() -> CarId {
        CarId::new(2)
    }

    /// An identity no seeded car uses
    pub fn unknown_car_id() -> CarId {
        CarId::new(999)
    }
}

/// Fixture for calendar dates around the seeded policies
pub struct DateFixtures;

impl DateFixtures {
    /// First day of the Dacia's Allianz policy
    pub fn allianz_start() -> NaiveDate {
        ymd(2024, 1, 1)
    }

    /// Last day of the Dacia's Allianz policy
    pub fn allianz_end() -> NaiveDate {
        ymd(2024, 12, 31)
    }

    /// First day of the Dacia's Groupama policy
    pub fn groupama_start() -> NaiveDate {
        ymd(2025, 1, 1)
    }

    /// Mid-2024, covered for the Dacia only
    pub fn mid_2024() -> NaiveDate {
        ymd(2024, 6, 15)
    }

    /// Before any seeded policy starts
    pub fn before_coverage() -> NaiveDate {
        ymd(2023, 12, 31)
    }

    /// Golf's last covered day
    pub fn golf_end() -> NaiveDate {
        ymd(2026, 3, 1)
    }

    /// The day after the Golf's policy ends
    pub fn after_golf() -> NaiveDate {
        ymd(2026, 3, 2)
    }

    /// Formats a date the way the API expects it
    pub fn iso(date: NaiveDate) -> String {
        format_calendar_date(date)
    }
}

/// Fixture for string test data
pub struct StringFixtures;

impl StringFixtures {
    pub fn dacia_vin() -> &'static str {
        "VIN12345"
    }

    pub fn golf_vin() -> &'static str {
        "VIN67890"
    }

    /// Standard claim description
    pub fn claim_description() -> &'static str {
        "Rear bumper damage after parking incident"
    }
}

/// Fixture for decimal test data
pub struct DecimalFixtures;

impl DecimalFixtures {
    /// Standard claim amount
    pub fn claim_amount() -> Decimal {
        dec!(1250.50)
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("fixture date")
}

/// Creates an in-memory store loaded with the demo dataset
pub async fn seeded_memory_store() -> InMemoryMotorStore {
    let store = InMemoryMotorStore::new();
    ensure_seeded(&store).await.expect("seeding an empty store");
    store
}
