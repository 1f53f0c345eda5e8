use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::errors::ErrorResponse;
use crate::routes::relations::RelationKind;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ProductDoc {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category_id: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct NewProductDoc {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category_id: Option<i32>,
}

#[derive(ToSchema)]
pub struct ProductPatchDoc {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<i32>,
}

#[derive(ToSchema)]
pub struct CategoryDoc {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
}

#[derive(ToSchema)]
pub struct NewCategoryDoc { pub name: String, pub description: Option<String> }

#[derive(ToSchema)]
pub struct CategoryPatchDoc { pub name: Option<String>, pub description: Option<String> }

#[derive(ToSchema)]
pub struct ProductLinkDoc { pub primary_id: i32, pub secondary_id: i32 }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::products::list,
        crate::routes::products::detail,
        crate::routes::products::create,
        crate::routes::products::update,
        crate::routes::products::delete,
        crate::routes::categories::list,
        crate::routes::categories::detail,
        crate::routes::categories::create,
        crate::routes::categories::update,
        crate::routes::categories::delete,
        crate::routes::relations::list,
        crate::routes::relations::add,
        crate::routes::relations::get_one,
        crate::routes::relations::update,
        crate::routes::relations::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ProductDoc,
            NewProductDoc,
            ProductPatchDoc,
            CategoryDoc,
            NewCategoryDoc,
            CategoryPatchDoc,
            ProductLinkDoc,
            RelationKind,
            ErrorResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "products"),
        (name = "categories"),
        (name = "relations")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_catalogue_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/health",
            "/products",
            "/products/detail/{product_id}",
            "/categories/{category_id}",
            "/products/{product_id}/{relation}",
            "/products/{product_id}/{relation}/{secondary_id}",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {expected}");
        }
    }
}
