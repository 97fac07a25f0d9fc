use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::status::dtos::{DatabaseHealthDto, HealthDto, MetricsDto, ServiceInfoDto};
use crate::features::status::services::StatusService;

/// Service info and endpoint map
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service info", body = ServiceInfoDto)
    ),
    tag = "status"
)]
pub async fn service_info(State(service): State<Arc<StatusService>>) -> Json<ServiceInfoDto> {
    Json(service.info())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is running", body = HealthDto)
    ),
    tag = "status"
)]
pub async fn health_check(State(service): State<Arc<StatusService>>) -> Json<HealthDto> {
    Json(service.health())
}

/// Database round-trip check
#[utoipa::path(
    get,
    path = "/health/db",
    responses(
        (status = 200, description = "Database reachable", body = DatabaseHealthDto),
        (status = 503, description = "Database unreachable")
    ),
    tag = "status"
)]
pub async fn health_check_db(
    State(service): State<Arc<StatusService>>,
) -> Result<Json<DatabaseHealthDto>> {
    Ok(Json(service.check_database().await?))
}

#[utoipa::path(
    get,
    path = "/metrics",
    responses(
        (status = 200, description = "Status snapshot", body = MetricsDto)
    ),
    tag = "status"
)]
pub async fn metrics(State(service): State<Arc<StatusService>>) -> Json<MetricsDto> {
    Json(service.metrics())
}
