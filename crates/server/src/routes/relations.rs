//! Product-to-product relation endpoints.
//!
//! `/products/{product_id}/{relation}` where `relation` is `additional` or
//! `recommended`; both kinds share these handlers.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;
use service::domain::ProductLink;
use service::relation_service::ProductLinks;
use tracing::info;

use crate::errors::JsonApiError;
use crate::extract::{ApiPath, ApiQuery};
use crate::state::ServerState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Additional,
    Recommended,
}

impl RelationKind {
    pub fn parse(segment: &str) -> Result<Self, JsonApiError> {
        match segment {
            "additional" => Ok(Self::Additional),
            "recommended" => Ok(Self::Recommended),
            other => Err(JsonApiError::new(StatusCode::NOT_FOUND, format!("unknown relation `{other}`"))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Additional => "additional",
            Self::Recommended => "recommended",
        }
    }

    /// Query parameter naming the secondary product on `POST`.
    pub fn query_param(self) -> String {
        format!("{}_id", self.as_str())
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ServerState {
    pub fn links(&self, kind: RelationKind) -> &Arc<dyn ProductLinks> {
        match kind {
            RelationKind::Additional => &self.additional,
            RelationKind::Recommended => &self.recommended,
        }
    }
}

pub fn routes() -> Router<ServerState> {
    Router::new()
        .route("/products/:product_id/:relation", get(list).post(add))
        .route("/products/:product_id/:relation/:secondary_id", get(get_one).put(update).delete(delete))
}

fn secondary_from_query(kind: RelationKind, query: &HashMap<String, String>) -> Result<i32, JsonApiError> {
    let name = kind.query_param();
    let raw = query
        .get(&name)
        .ok_or_else(|| JsonApiError::new(StatusCode::BAD_REQUEST, format!("missing query parameter `{name}`")))?;
    raw.parse().map_err(|_| {
        JsonApiError::new(StatusCode::BAD_REQUEST, format!("query parameter `{name}` must be an integer"))
    })
}

#[utoipa::path(
    get, path = "/products/{product_id}/{relation}", tag = "relations",
    params(
        ("product_id" = i32, Path, description = "Primary product id"),
        ("relation" = RelationKind, Path, description = "Relation kind")
    ),
    responses(
        (status = 200, description = "Links of the product ordered by secondary id", body = [crate::openapi::ProductLinkDoc]),
        (status = 404, description = "Unknown product or relation", body = crate::errors::ErrorResponse)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    ApiPath((product_id, relation)): ApiPath<(i32, String)>,
) -> Result<Json<Vec<ProductLink>>, JsonApiError> {
    let kind = RelationKind::parse(&relation)?;
    let items = state.links(kind).list(product_id).await?;
    info!(product_id, %kind, count = items.len(), "list product links");
    Ok(Json(items))
}

#[utoipa::path(
    post, path = "/products/{product_id}/{relation}", tag = "relations",
    params(
        ("product_id" = i32, Path, description = "Primary product id"),
        ("relation" = RelationKind, Path, description = "Relation kind"),
        ("additional_id" = Option<i32>, Query, description = "Secondary product id for `additional`"),
        ("recommended_id" = Option<i32>, Query, description = "Secondary product id for `recommended`")
    ),
    responses(
        (status = 201, description = "Created", body = crate::openapi::ProductLinkDoc),
        (status = 400, description = "Missing or invalid query parameter", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown product or relation", body = crate::errors::ErrorResponse),
        (status = 409, description = "Link already exists", body = crate::errors::ErrorResponse)
    )
)]
pub async fn add(
    State(state): State<ServerState>,
    ApiPath((product_id, relation)): ApiPath<(i32, String)>,
    ApiQuery(query): ApiQuery<HashMap<String, String>>,
) -> Result<(StatusCode, Json<ProductLink>), JsonApiError> {
    let kind = RelationKind::parse(&relation)?;
    let secondary_id = secondary_from_query(kind, &query)?;
    let link = state.links(kind).add(product_id, secondary_id).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

#[utoipa::path(
    get, path = "/products/{product_id}/{relation}/{secondary_id}", tag = "relations",
    params(
        ("product_id" = i32, Path, description = "Primary product id"),
        ("relation" = RelationKind, Path, description = "Relation kind"),
        ("secondary_id" = i32, Path, description = "Secondary product id")
    ),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ProductLinkDoc),
        (status = 404, description = "Not Found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn get_one(
    State(state): State<ServerState>,
    ApiPath((product_id, relation, secondary_id)): ApiPath<(i32, String, i32)>,
) -> Result<Json<ProductLink>, JsonApiError> {
    let kind = RelationKind::parse(&relation)?;
    Ok(Json(state.links(kind).get(product_id, secondary_id).await?))
}

/// Create the link if missing; the pair is the whole row.
#[utoipa::path(
    put, path = "/products/{product_id}/{relation}/{secondary_id}", tag = "relations",
    params(
        ("product_id" = i32, Path, description = "Primary product id"),
        ("relation" = RelationKind, Path, description = "Relation kind"),
        ("secondary_id" = i32, Path, description = "Secondary product id")
    ),
    responses(
        (status = 200, description = "Upserted", body = crate::openapi::ProductLinkDoc),
        (status = 404, description = "Unknown product or relation", body = crate::errors::ErrorResponse)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath((product_id, relation, secondary_id)): ApiPath<(i32, String, i32)>,
) -> Result<Json<ProductLink>, JsonApiError> {
    let kind = RelationKind::parse(&relation)?;
    Ok(Json(state.links(kind).update(product_id, secondary_id).await?))
}

#[utoipa::path(
    delete, path = "/products/{product_id}/{relation}/{secondary_id}", tag = "relations",
    params(
        ("product_id" = i32, Path, description = "Primary product id"),
        ("relation" = RelationKind, Path, description = "Relation kind"),
        ("secondary_id" = i32, Path, description = "Secondary product id")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath((product_id, relation, secondary_id)): ApiPath<(i32, String, i32)>,
) -> Result<StatusCode, JsonApiError> {
    let kind = RelationKind::parse(&relation)?;
    state.links(kind).delete(product_id, secondary_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relation_kind_parses_known_segments() {
        assert_eq!(RelationKind::parse("additional").ok(), Some(RelationKind::Additional));
        assert_eq!(RelationKind::parse("recommended").ok(), Some(RelationKind::Recommended));
        let err = RelationKind::parse("similar").err().map(|e| e.status);
        assert_eq!(err, Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn secondary_id_read_from_kind_specific_parameter() {
        let mut query = HashMap::new();
        query.insert("recommended_id".to_string(), "7".to_string());
        assert_eq!(secondary_from_query(RelationKind::Recommended, &query).ok(), Some(7));

        let missing = secondary_from_query(RelationKind::Additional, &query).err().map(|e| e.message);
        assert_eq!(missing.as_deref(), Some("missing query parameter `additional_id`"));

        query.insert("additional_id".to_string(), "x".to_string());
        let bad = secondary_from_query(RelationKind::Additional, &query).err().map(|e| e.status);
        assert_eq!(bad, Some(StatusCode::BAD_REQUEST));
    }
}
