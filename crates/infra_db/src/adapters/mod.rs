//! Domain Adapters
//!
//! Implementations of domain ports on top of the PostgreSQL repositories.
//!
//! Each adapter:
//! - Implements the domain's port trait
//! - Translates between domain models and database row types
//! - Converts `DatabaseError` into `PortError`
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresMotorAdapter;
//! use domain_motor::MotorStorePort;
//!
//! let adapter = PostgresMotorAdapter::new(pool);
//! let car = adapter.get_car(car_id).await?;
//! ```

pub mod motor;

pub use motor::PostgresMotorAdapter;
