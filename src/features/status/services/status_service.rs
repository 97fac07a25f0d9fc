use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;

use crate::core::config::AppMode;
use crate::core::database::LivenessProbe;
use crate::core::error::{AppError, Result};
use crate::features::status::dtos::{DatabaseHealthDto, HealthDto, MetricsDto, ServiceInfoDto};

const SERVICE_NAME: &str = env!("CARGO_PKG_NAME");

const ENDPOINTS: &[(&str, &str)] = &[
    ("GET /", "API info"),
    ("GET /health", "Basic health check"),
    ("GET /health/db", "Database health check"),
    ("GET /metrics", "Metrics endpoint"),
    ("GET /api-docs/openapi.json", "OpenAPI document"),
    ("GET /categories", "Get all categories"),
    ("POST /categories", "Create new category"),
    ("GET /categories/{id}", "Get category by ID"),
    ("PUT /categories/{id}", "Update category"),
    ("DELETE /categories/{id}", "Delete category"),
];

/// Service info, liveness and metrics
pub struct StatusService {
    probe: Arc<dyn LivenessProbe>,
    mode: AppMode,
}

impl StatusService {
    pub fn new(probe: Arc<dyn LivenessProbe>, mode: AppMode) -> Self {
        Self { probe, mode }
    }

    pub fn info(&self) -> ServiceInfoDto {
        ServiceInfoDto {
            message: "Category API is running".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            mode: self.mode.to_string(),
            endpoints: ENDPOINTS
                .iter()
                .map(|(route, description)| (route.to_string(), description.to_string()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    /// Process liveness; never touches the database
    pub fn health(&self) -> HealthDto {
        HealthDto {
            status: "ok".to_string(),
        }
    }

    pub async fn check_database(&self) -> Result<DatabaseHealthDto> {
        match self.probe.ping().await {
            Ok(_) => Ok(DatabaseHealthDto {
                status: "ok".to_string(),
                database: "connected".to_string(),
            }),
            Err(e) => Err(AppError::ServiceUnavailable(format!(
                "Database is unreachable: {}",
                e
            ))),
        }
    }

    pub fn metrics(&self) -> MetricsDto {
        MetricsDto {
            status: "ok".to_string(),
            service: SERVICE_NAME.to_string(),
            timestamp: Utc::now().timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::StubProbe;

    #[tokio::test]
    async fn test_check_database_maps_failure_to_unavailable() {
        let service = StatusService::new(Arc::new(StubProbe::down()), AppMode::Debug);
        assert!(matches!(
            service.check_database().await,
            Err(AppError::ServiceUnavailable(_))
        ));

        let service = StatusService::new(Arc::new(StubProbe::up()), AppMode::Debug);
        assert_eq!(service.check_database().await.unwrap().database, "connected");
    }

    #[test]
    fn test_info_lists_every_category_route() {
        let service = StatusService::new(Arc::new(StubProbe::up()), AppMode::Release);
        let info = service.info();

        assert_eq!(info.mode, "release");
        for route in [
            "GET /categories",
            "POST /categories",
            "GET /categories/{id}",
            "PUT /categories/{id}",
            "DELETE /categories/{id}",
        ] {
            assert!(info.endpoints.contains_key(route), "missing {}", route);
        }
    }
}
