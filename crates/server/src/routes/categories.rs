use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use common::pagination::PageQuery;
use models::category;
use service::domain::{CategoryPatch, NewCategory};

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::ServerState;

pub fn routes() -> Router<ServerState> {
    Router::new()
        .route("/categories", get(list).post(create))
        .route("/categories/:category_id", get(detail).put(update).delete(delete))
}

#[utoipa::path(
    get, path = "/categories", tag = "categories",
    params(
        ("page" = Option<u32>, Query, description = "1-based page"),
        ("per_page" = Option<u32>, Query, description = "Page size, clamped to 1..=100")
    ),
    responses((status = 200, description = "Categories ordered by id", body = [crate::openapi::CategoryDoc]))
)]
pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<PageQuery>,
) -> Result<Json<Vec<category::Model>>, JsonApiError> {
    let items = match q.into_pagination() {
        Some(p) => state.categories.list_page(p).await?,
        None => state.categories.list().await?,
    };
    Ok(Json(items))
}

#[utoipa::path(
    get, path = "/categories/{category_id}", tag = "categories",
    params(("category_id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CategoryDoc),
        (status = 404, description = "Not Found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn detail(
    State(state): State<ServerState>,
    ApiPath(category_id): ApiPath<i32>,
) -> Result<Json<category::Model>, JsonApiError> {
    Ok(Json(state.categories.detail(category_id).await?))
}

#[utoipa::path(
    post, path = "/categories", tag = "categories",
    request_body = crate::openapi::NewCategoryDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CategoryDoc),
        (status = 400, description = "Validation Error", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name taken", body = crate::errors::ErrorResponse)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<NewCategory>,
) -> Result<(StatusCode, Json<category::Model>), JsonApiError> {
    let item = state.categories.create(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put, path = "/categories/{category_id}", tag = "categories",
    params(("category_id" = i32, Path, description = "Category id")),
    request_body = crate::openapi::CategoryPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CategoryDoc),
        (status = 404, description = "Not Found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name taken", body = crate::errors::ErrorResponse)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(category_id): ApiPath<i32>,
    ApiJson(patch): ApiJson<CategoryPatch>,
) -> Result<Json<category::Model>, JsonApiError> {
    Ok(Json(state.categories.update(category_id, patch).await?))
}

/// Products of the category keep existing with no category.
#[utoipa::path(
    delete, path = "/categories/{category_id}", tag = "categories",
    params(("category_id" = i32, Path, description = "Category id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(category_id): ApiPath<i32>,
) -> Result<StatusCode, JsonApiError> {
    state.categories.delete(category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
