//! Store adapters that live inside the domain crate
//!
//! The PostgreSQL adapter lives in `infra_db`; the in-memory store here backs
//! local demos (`API_STORE_BACKEND=memory`) and the test suites.

pub mod memory;

pub use memory::InMemoryMotorStore;
