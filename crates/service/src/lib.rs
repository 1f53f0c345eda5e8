//! Service layer providing catalogue operations on top of models.
//! - `repository` is the generic data access over any sea-orm entity.
//! - Entity services add validation and relation rules.
//! - `analytics` is the contract for the visit-recording collaborator.

pub mod errors;
pub mod repository;
pub mod domain;
pub mod product_service;
pub mod category_service;
pub mod relation_service;
pub mod analytics;
#[cfg(test)]
pub mod test_support;

pub use analytics::ProductAnalytics;
pub use category_service::CategoryService;
pub use product_service::ProductService;
pub use relation_service::{AdditionalProductsService, ProductRelationService, RecommendedProductsService};
