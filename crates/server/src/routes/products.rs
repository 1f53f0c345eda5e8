use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use common::pagination::PageQuery;
use models::product;
use service::domain::{NewProduct, ProductPatch};
use tracing::{info, warn};

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::ServerState;

pub fn routes() -> Router<ServerState> {
    Router::new()
        .route("/products", get(list).post(create))
        .route("/products/detail/:product_id", get(detail))
        .route("/products/:product_id", get(detail).put(update).delete(delete))
}

#[utoipa::path(
    get, path = "/products", tag = "products",
    params(
        ("page" = Option<u32>, Query, description = "1-based page"),
        ("per_page" = Option<u32>, Query, description = "Page size, clamped to 1..=100")
    ),
    responses(
        (status = 200, description = "Products ordered by id", body = [crate::openapi::ProductDoc]),
        (status = 500, description = "Store failure", body = crate::errors::ErrorResponse)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<PageQuery>,
) -> Result<Json<Vec<product::Model>>, JsonApiError> {
    let items = match q.into_pagination() {
        Some(p) => state.products.list_page(p).await?,
        None => state.products.list().await?,
    };
    info!(count = items.len(), "list products");
    Ok(Json(items))
}

/// Product detail; a successful lookup is reported to analytics.
#[utoipa::path(
    get, path = "/products/detail/{product_id}", tag = "products",
    params(("product_id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ProductDoc),
        (status = 404, description = "Not Found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn detail(
    State(state): State<ServerState>,
    ApiPath(product_id): ApiPath<i32>,
) -> Result<Json<product::Model>, JsonApiError> {
    let item = state.products.detail(product_id).await?;
    if let Err(e) = state.analytics.record_visit(product_id).await {
        warn!(product_id, err = %e, "analytics visit not recorded");
    }
    Ok(Json(item))
}

#[utoipa::path(
    post, path = "/products", tag = "products",
    request_body = crate::openapi::NewProductDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ProductDoc),
        (status = 400, description = "Validation Error", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown category", body = crate::errors::ErrorResponse)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<NewProduct>,
) -> Result<(StatusCode, Json<product::Model>), JsonApiError> {
    let item = state.products.create(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put, path = "/products/{product_id}", tag = "products",
    params(("product_id" = i32, Path, description = "Product id")),
    request_body = crate::openapi::ProductPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ProductDoc),
        (status = 400, description = "Validation Error", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not Found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(product_id): ApiPath<i32>,
    ApiJson(patch): ApiJson<ProductPatch>,
) -> Result<Json<product::Model>, JsonApiError> {
    Ok(Json(state.products.update(product_id, patch).await?))
}

#[utoipa::path(
    delete, path = "/products/{product_id}", tag = "products",
    params(("product_id" = i32, Path, description = "Product id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(product_id): ApiPath<i32>,
) -> Result<StatusCode, JsonApiError> {
    state.products.delete(product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
