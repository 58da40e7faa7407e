//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the motor insurance system using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern. Repositories own the SQL and
//! return plain row structs; the adapter layer turns rows into domain models
//! and implements the domain's `MotorStorePort`.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresMotorAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/car_insurance")).await?;
//! run_migrations(&pool).await?;
//! let store = PostgresMotorAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use adapters::PostgresMotorAdapter;
