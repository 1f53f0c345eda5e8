use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::analytics::ProductAnalytics;
use service::relation_service::ProductLinks;
use service::{AdditionalProductsService, CategoryService, ProductService, RecommendedProductsService};

/// Shared handler state; every service is built once over the same pool.
#[derive(Clone)]
pub struct ServerState {
    pub products: Arc<ProductService>,
    pub categories: Arc<CategoryService>,
    pub additional: Arc<dyn ProductLinks>,
    pub recommended: Arc<dyn ProductLinks>,
    pub analytics: Arc<dyn ProductAnalytics>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, analytics: Arc<dyn ProductAnalytics>) -> Self {
        Self {
            products: Arc::new(ProductService::new(db.clone())),
            categories: Arc::new(CategoryService::new(db.clone())),
            additional: Arc::new(AdditionalProductsService::new(db.clone())),
            recommended: Arc::new(RecommendedProductsService::new(db)),
            analytics,
        }
    }
}
