//! API configuration
//!
//! Loaded from `API_`-prefixed environment variables over built-in defaults,
//! e.g. `API_PORT=9000` or `API_STORE_BACKEND=memory`.

use serde::Deserialize;
use std::time::Duration;

use domain_motor::ExpiryConfig;
use infra_db::DatabaseConfig;

/// Which store implementation the server runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// PostgreSQL through `infra_db`
    Postgres,
    /// Process memory; data is lost on restart
    Memory,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Maximum pooled database connections
    pub max_connections: u32,
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
    pub store_backend: StoreBackend,
    /// Load the demo owners, cars and policies into an empty store
    pub seed_demo_data: bool,
    /// Seconds between expired-policy sweeps
    pub expiry_sweep_interval_secs: u64,
    /// How far back a sweep looks for policy expiries, in seconds
    pub expiry_lookback_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/car_insurance".to_string(),
            max_connections: 10,
            log_level: "info".to_string(),
            store_backend: StoreBackend::Postgres,
            seed_demo_data: true,
            expiry_sweep_interval_secs: 600,
            expiry_lookback_secs: 3600,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Pool settings for the PostgreSQL backend
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(self.database_url.clone()).max_connections(self.max_connections)
    }

    /// Timing for the expired-policy sweep worker
    pub fn expiry_config(&self) -> ExpiryConfig {
        ExpiryConfig {
            interval: Duration::from_secs(self.expiry_sweep_interval_secs.max(1)),
            lookback: Duration::from_secs(self.expiry_lookback_secs),
        }
    }
}
