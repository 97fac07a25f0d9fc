use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `GET /`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfoDto {
    pub message: String,
    pub version: String,
    pub mode: String,
    /// `"METHOD /path"` -> description
    pub endpoints: BTreeMap<String, String>,
}

/// Body of `GET /health`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthDto {
    pub status: String,
}

/// Body of a successful `GET /health/db`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DatabaseHealthDto {
    pub status: String,
    pub database: String,
}

/// Body of `GET /metrics`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MetricsDto {
    pub status: String,
    pub service: String,
    /// Unix seconds
    pub timestamp: i64,
}
