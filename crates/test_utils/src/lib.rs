//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! motor insurance test suite.
//!
//! # Modules
//!
//! - `fixtures`: The demo dataset's dates, identities and ready-seeded stores
//! - `builders`: Builder patterns for test data construction
//! - `database`: Database test helpers and container management
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based and fake test data generators

use once_cell::sync::Lazy;

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;

static TEST_TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
});

/// Installs a test-friendly tracing subscriber once per process
///
/// Honors `RUST_LOG`; defaults to `warn`.
pub fn init_test_tracing() {
    Lazy::force(&TEST_TRACING);
}
