//! HTTP API Layer
//!
//! This crate provides the REST API for the motor insurance system using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for cars and health probes
//! - **Middleware**: Tracing and audit logging with request ids
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent `{error, message}` error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::new(store, config));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_motor::{CarService, MotorStorePort};

use crate::config::ApiConfig;
use crate::handlers::{cars, health};
use crate::middleware::audit_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: CarService,
    pub store: Arc<dyn MotorStorePort>,
    pub config: ApiConfig,
}

impl AppState {
    /// Builds the state around a store
    pub fn new(store: Arc<dyn MotorStorePort>, config: ApiConfig) -> Self {
        Self {
            service: CarService::new(store.clone()),
            store,
            config,
        }
    }
}

/// Creates the main API router
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let car_routes = Router::new()
        .route("/", get(cars::list_cars))
        .route("/:car_id/insurance-valid", get(cars::insurance_valid))
        .route("/:car_id/claims", post(cars::create_claim))
        .route("/:car_id/history", get(cars::car_history));

    let api_routes = Router::new()
        .nest("/cars", car_routes)
        .layer(axum_middleware::from_fn(audit_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
