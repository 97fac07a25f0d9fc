use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::core::config::Config;
use crate::core::error::AppError;
use crate::core::{middleware, openapi};
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::status::{routes as status_routes, StatusService};

async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

/// Build the application router.
///
/// Layers, outermost first: request id, CORS, access log, panic recovery.
/// Recovery sits inside the access log so a panicked request still gets its
/// response line. `/metrics` is merged outside the access log so polling stays quiet.
pub fn build_router(
    config: &Config,
    category_service: Arc<CategoryService>,
    status_service: Arc<StatusService>,
) -> Router {
    let logged = Router::new()
        .merge(status_routes::routes(Arc::clone(&status_service)))
        .merge(categories_routes::routes(category_service))
        .merge(openapi::routes(openapi::document(&config.api_docs)))
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(middleware::handle_panic))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let quiet = status_routes::metrics_routes(status_service)
        .layer(CatchPanicLayer::custom(middleware::handle_panic));

    Router::new().merge(logged).merge(quiet).layer(
        ServiceBuilder::new()
            // Generate X-Request-Id using UUID v7 (or use client-provided one)
            .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
            // Propagate X-Request-Id to response headers
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(middleware::cors_layer(
                config.app.cors_allowed_origins.clone(),
            )),
    )
}
