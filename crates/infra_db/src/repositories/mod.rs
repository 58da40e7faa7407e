//! Repository implementations for motor insurance records
//!
//! Repositories encapsulate SQL and map database rows to plain row structs.
//! The adapter layer converts those rows to domain types.
//!
//! Each repository follows these principles:
//! - Runtime-checked queries with `FromRow` row types
//! - Explicit `ORDER BY` on every list query
//! - Single-statement inserts returning the assigned identity

pub mod cars;
pub mod policies;
pub mod claims;

pub use cars::CarRepository;
pub use policies::PolicyRepository;
pub use claims::ClaimRepository;
