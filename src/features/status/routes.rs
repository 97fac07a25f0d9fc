use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::status::handlers;
use crate::features::status::services::StatusService;

/// Service info and health routes
pub fn routes(service: Arc<StatusService>) -> Router {
    Router::new()
        .route("/", get(handlers::service_info))
        .route("/health", get(handlers::health_check))
        .route("/health/db", get(handlers::health_check_db))
        .with_state(service)
}

/// Polled by monitoring; mounted outside the access log layer
pub fn metrics_routes(service: Arc<StatusService>) -> Router {
    Router::new()
        .route("/metrics", get(handlers::metrics))
        .with_state(service)
}
