use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod categories;
pub mod products;
pub mod relations;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router over the shared catalogue services
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(products::routes())
        .merge(categories::routes())
        .merge(relations::routes())
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and I/O failures
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
