use std::fmt::Debug;

use async_trait::async_trait;
use models::{additional_products, product, recommended_products, ProductLink, ProductRelation};
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, IntoActiveModel};
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::repository::{PrimaryKeyOf, Repository};

/// Manages one product-to-product relation table.
///
/// Every operation is addressed by the ordered pair `(primary_id, secondary_id)`.
pub struct ProductRelationService<E: ProductRelation> {
    links: Repository<E>,
    products: Repository<product::Entity>,
}

pub type AdditionalProductsService = ProductRelationService<additional_products::Entity>;
pub type RecommendedProductsService = ProductRelationService<recommended_products::Entity>;

/// Object-safe view of a relation service, independent of the backing table.
#[async_trait]
pub trait ProductLinks: Send + Sync {
    async fn add(&self, primary_id: i32, secondary_id: i32) -> Result<ProductLink, ServiceError>;
    async fn update(&self, primary_id: i32, secondary_id: i32) -> Result<ProductLink, ServiceError>;
    async fn delete(&self, primary_id: i32, secondary_id: i32) -> Result<(), ServiceError>;
    async fn get(&self, primary_id: i32, secondary_id: i32) -> Result<ProductLink, ServiceError>;
    async fn list(&self, primary_id: i32) -> Result<Vec<ProductLink>, ServiceError>;
}

impl<E> ProductRelationService<E>
where
    E: ProductRelation,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    PrimaryKeyOf<E>: From<(i32, i32)> + Clone + Debug + Send + Sync,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self { links: Repository::new(db.clone()), products: Repository::new(db) }
    }

    async fn ensure_products(&self, primary_id: i32, secondary_id: i32) -> Result<(), ServiceError> {
        self.products.get(primary_id).await?;
        self.products.get(secondary_id).await?;
        Ok(())
    }

    /// Create the link; an existing pair is a conflict.
    #[instrument(skip(self), fields(kind = E::KIND))]
    pub async fn add(&self, primary_id: i32, secondary_id: i32) -> Result<ProductLink, ServiceError> {
        self.ensure_products(primary_id, secondary_id).await?;
        if self.links.find((primary_id, secondary_id).into()).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "{} ({primary_id}, {secondary_id}) already exists",
                E::KIND
            )));
        }
        let row = self.links.create(E::link(primary_id, secondary_id)).await?;
        info!(primary_id, secondary_id, "product_link_added");
        Ok(E::to_link(&row))
    }

    /// Insert-or-replace keyed on the pair; exactly one row exists afterwards.
    #[instrument(skip(self), fields(kind = E::KIND))]
    pub async fn update(&self, primary_id: i32, secondary_id: i32) -> Result<ProductLink, ServiceError> {
        self.ensure_products(primary_id, secondary_id).await?;
        let written = self
            .links
            .insert_or_ignore(E::link(primary_id, secondary_id), [E::primary_column(), E::secondary_column()])
            .await?;
        let row = self.links.get((primary_id, secondary_id).into()).await?;
        info!(primary_id, secondary_id, created = written > 0, "product_link_upserted");
        Ok(E::to_link(&row))
    }

    #[instrument(skip(self), fields(kind = E::KIND))]
    pub async fn delete(&self, primary_id: i32, secondary_id: i32) -> Result<(), ServiceError> {
        self.links.delete((primary_id, secondary_id).into()).await?;
        info!(primary_id, secondary_id, "product_link_deleted");
        Ok(())
    }

    pub async fn get(&self, primary_id: i32, secondary_id: i32) -> Result<ProductLink, ServiceError> {
        let row = self.links.get((primary_id, secondary_id).into()).await?;
        Ok(E::to_link(&row))
    }

    /// Links whose primary is `primary_id`, ordered by secondary id.
    pub async fn list(&self, primary_id: i32) -> Result<Vec<ProductLink>, ServiceError> {
        self.products.get(primary_id).await?;
        let rows = self
            .links
            .list_where(Condition::all().add(E::primary_column().eq(primary_id)))
            .await?;
        Ok(rows.iter().map(E::to_link).collect())
    }
}

#[async_trait]
impl<E> ProductLinks for ProductRelationService<E>
where
    E: ProductRelation,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    PrimaryKeyOf<E>: From<(i32, i32)> + Clone + Debug + Send + Sync,
{
    async fn add(&self, primary_id: i32, secondary_id: i32) -> Result<ProductLink, ServiceError> {
        ProductRelationService::add(self, primary_id, secondary_id).await
    }

    async fn update(&self, primary_id: i32, secondary_id: i32) -> Result<ProductLink, ServiceError> {
        ProductRelationService::update(self, primary_id, secondary_id).await
    }

    async fn delete(&self, primary_id: i32, secondary_id: i32) -> Result<(), ServiceError> {
        ProductRelationService::delete(self, primary_id, secondary_id).await
    }

    async fn get(&self, primary_id: i32, secondary_id: i32) -> Result<ProductLink, ServiceError> {
        ProductRelationService::get(self, primary_id, secondary_id).await
    }

    async fn list(&self, primary_id: i32) -> Result<Vec<ProductLink>, ServiceError> {
        ProductRelationService::list(self, primary_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewProduct;
    use crate::product_service::ProductService;
    use crate::test_support::get_db;

    async fn products(db: &DatabaseConnection, n: usize) -> anyhow::Result<Vec<i32>> {
        let svc = ProductService::new(db.clone());
        let mut ids = Vec::new();
        for i in 0..n {
            let p = svc
                .create(NewProduct { name: format!("item {i}"), description: None, price: 1.0, category_id: None })
                .await?;
            ids.push(p.id);
        }
        Ok(ids)
    }

    #[tokio::test]
    async fn add_then_get_returns_matching_ids() -> anyhow::Result<()> {
        let db = get_db().await?;
        let ids = products(&db, 2).await?;
        let svc = AdditionalProductsService::new(db);

        let added = svc.add(ids[0], ids[1]).await?;
        let got = svc.get(ids[0], ids[1]).await?;
        assert_eq!(added, got);
        assert_eq!(got, ProductLink { primary_id: ids[0], secondary_id: ids[1] });
        Ok(())
    }

    #[tokio::test]
    async fn add_twice_conflicts() -> anyhow::Result<()> {
        let db = get_db().await?;
        let ids = products(&db, 2).await?;
        let svc = RecommendedProductsService::new(db);

        svc.add(ids[0], ids[1]).await?;
        assert!(matches!(svc.add(ids[0], ids[1]).await, Err(ServiceError::Conflict(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_after_add_leaves_one_row() -> anyhow::Result<()> {
        let db = get_db().await?;
        let ids = products(&db, 2).await?;
        let svc = AdditionalProductsService::new(db);

        svc.add(ids[0], ids[1]).await?;
        let updated = svc.update(ids[0], ids[1]).await?;
        assert_eq!(updated.secondary_id, ids[1]);
        assert_eq!(svc.list(ids[0]).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn update_creates_missing_pair() -> anyhow::Result<()> {
        let db = get_db().await?;
        let ids = products(&db, 2).await?;
        let svc = AdditionalProductsService::new(db);

        svc.update(ids[0], ids[1]).await?;
        assert!(svc.get(ids[0], ids[1]).await.is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() -> anyhow::Result<()> {
        let db = get_db().await?;
        let ids = products(&db, 2).await?;
        let svc = RecommendedProductsService::new(db);

        svc.add(ids[0], ids[1]).await?;
        svc.delete(ids[0], ids[1]).await?;
        assert!(matches!(svc.get(ids[0], ids[1]).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(ids[0], ids[1]).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn missing_products_are_not_found() -> anyhow::Result<()> {
        let db = get_db().await?;
        let ids = products(&db, 1).await?;
        let svc = AdditionalProductsService::new(db);

        match svc.add(ids[0], 999).await {
            Err(ServiceError::NotFound(msg)) => assert_eq!(msg, "product 999 does not exist"),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(svc.update(999, ids[0]).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.list(999).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn usable_through_trait_object() -> anyhow::Result<()> {
        let db = get_db().await?;
        let ids = products(&db, 2).await?;
        let links: std::sync::Arc<dyn ProductLinks> = std::sync::Arc::new(RecommendedProductsService::new(db));

        links.add(ids[1], ids[0]).await?;
        assert_eq!(links.list(ids[1]).await?.len(), 1);
        links.delete(ids[1], ids[0]).await?;
        assert!(links.list(ids[1]).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn list_is_scoped_to_primary_and_relation_kind() -> anyhow::Result<()> {
        let db = get_db().await?;
        let ids = products(&db, 4).await?;
        let additional = AdditionalProductsService::new(db.clone());
        let recommended = RecommendedProductsService::new(db);

        additional.add(ids[0], ids[3]).await?;
        additional.add(ids[0], ids[1]).await?;
        additional.add(ids[2], ids[1]).await?;
        recommended.add(ids[0], ids[2]).await?;

        let listed: Vec<i32> = additional.list(ids[0]).await?.iter().map(|l| l.secondary_id).collect();
        assert_eq!(listed, vec![ids[1], ids[3]]);

        let rec = recommended.list(ids[0]).await?;
        assert_eq!(rec, vec![ProductLink { primary_id: ids[0], secondary_id: ids[2] }]);
        assert!(recommended.list(ids[1]).await?.is_empty());
        Ok(())
    }
}
