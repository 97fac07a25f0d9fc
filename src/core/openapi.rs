use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use utoipa::openapi::OpenApi as OpenApiDocument;
use utoipa::{Modify, OpenApi};

use crate::core::config::ApiDocsConfig;
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::status::{dtos as status_dtos, handlers as status_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Status
        status_handlers::service_info,
        status_handlers::health_check,
        status_handlers::health_check_db,
        status_handlers::metrics,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::create_category,
        categories_handlers::get_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Status
            status_dtos::ServiceInfoDto,
            status_dtos::HealthDto,
            status_dtos::DatabaseHealthDto,
            status_dtos::MetricsDto,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::CategoryResponseDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
        )
    ),
    tags(
        (name = "status", description = "Service info, health checks and metrics"),
        (name = "categories", description = "Category CRUD"),
    ),
    info(
        title = "Category API",
        description = "CRUD API for categories",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct ApiInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl From<&ApiDocsConfig> for ApiInfoModifier {
    fn from(config: &ApiDocsConfig) -> Self {
        Self {
            title: config.title.clone(),
            version: config.version.clone(),
            description: config.description.clone(),
        }
    }
}

impl Modify for ApiInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

pub fn document(config: &ApiDocsConfig) -> OpenApiDocument {
    let mut openapi = ApiDoc::openapi();
    ApiInfoModifier::from(config).modify(&mut openapi);
    openapi
}

async fn openapi_json(State(doc): State<Arc<OpenApiDocument>>) -> Json<OpenApiDocument> {
    Json(doc.as_ref().clone())
}

pub fn routes(doc: OpenApiDocument) -> Router {
    Router::new()
        .route("/api-docs/openapi.json", get(openapi_json))
        .with_state(Arc::new(doc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_describes_category_routes() {
        let doc = document(&ApiDocsConfig {
            title: "Categories".to_string(),
            version: "9.9.9".to_string(),
            description: "test".to_string(),
        });

        assert_eq!(doc.info.title, "Categories");
        assert_eq!(doc.info.version, "9.9.9");
        assert!(doc.paths.paths.contains_key("/categories/"));
        assert!(doc.paths.paths.contains_key("/categories/{id}"));
        assert!(doc.paths.paths.contains_key("/health/db"));
    }
}
