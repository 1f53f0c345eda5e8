use chrono::Utc;
use common::pagination::Pagination;
use models::{category, product};
use sea_orm::{DatabaseConnection, Set};
use tracing::{info, instrument};

use crate::domain::{NewProduct, ProductPatch};
use crate::errors::ServiceError;
use crate::repository::Repository;

/// Product catalogue operations.
pub struct ProductService {
    repo: Repository<product::Entity>,
    categories: Repository<category::Entity>,
}

impl ProductService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { repo: Repository::new(db.clone()), categories: Repository::new(db) }
    }

    pub async fn list(&self) -> Result<Vec<product::Model>, ServiceError> {
        self.repo.list().await
    }

    pub async fn list_page(&self, pagination: Pagination) -> Result<Vec<product::Model>, ServiceError> {
        self.repo.list_page(pagination).await
    }

    #[instrument(skip(self))]
    pub async fn detail(&self, pk: i32) -> Result<product::Model, ServiceError> {
        self.repo.get(pk).await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: NewProduct) -> Result<product::Model, ServiceError> {
        if let Some(category_id) = input.category_id {
            self.categories.get(category_id).await?;
        }
        let am = product::new_active(&input.name, input.description, input.price, input.category_id)?;
        let created = self.repo.create(am).await?;
        info!(product_id = created.id, "product_created");
        Ok(created)
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, pk: i32, patch: ProductPatch) -> Result<product::Model, ServiceError> {
        let mut am: product::ActiveModel = self.repo.get(pk).await?.into();
        if let Some(name) = patch.name {
            product::validate_name(&name)?;
            am.name = Set(name.trim().to_string());
        }
        if let Some(description) = patch.description {
            am.description = Set(description);
        }
        if let Some(price) = patch.price {
            product::validate_price(price)?;
            am.price = Set(price);
        }
        if let Some(category_id) = patch.category_id {
            if let Some(id) = category_id {
                self.categories.get(id).await?;
            }
            am.category_id = Set(category_id);
        }
        am.updated_at = Set(Utc::now().into());
        let updated = self.repo.update(am).await?;
        info!(product_id = updated.id, "product_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, pk: i32) -> Result<(), ServiceError> {
        self.repo.delete(pk).await?;
        info!(product_id = pk, "product_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn lamp() -> NewProduct {
        NewProduct { name: "Lamp".into(), description: None, price: 20.0, category_id: None }
    }

    #[tokio::test]
    async fn product_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = ProductService::new(db);

        let p = svc.create(lamp()).await?;
        assert_eq!(svc.detail(p.id).await?.name, "Lamp");
        assert_eq!(svc.list().await?.len(), 1);

        let updated = svc.update(p.id, ProductPatch { price: Some(25.5), ..Default::default() }).await?;
        assert_eq!(updated.price, 25.5);
        assert_eq!(updated.name, "Lamp");
        assert!(updated.updated_at >= p.updated_at);

        svc.delete(p.id).await?;
        assert!(matches!(svc.detail(p.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn detail_missing_reports_message() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = ProductService::new(db);
        match svc.detail(7).await {
            Err(ServiceError::NotFound(msg)) => assert_eq!(msg, "product 7 does not exist"),
            other => panic!("unexpected: {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_invalid_input() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = ProductService::new(db);

        let bad_price = NewProduct { price: -3.0, ..lamp() };
        assert!(matches!(svc.create(bad_price).await, Err(ServiceError::Model(_))));

        let unknown_category = NewProduct { category_id: Some(99), ..lamp() };
        assert!(matches!(svc.create(unknown_category).await, Err(ServiceError::NotFound(_))));
        assert!(svc.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_null_clears_category_and_description() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let categories = crate::category_service::CategoryService::new(db.clone());
        let svc = ProductService::new(db);

        let c = categories.create(crate::domain::NewCategory { name: "Lighting".into(), description: None }).await?;
        let p = svc
            .create(NewProduct { description: Some("brass".into()), category_id: Some(c.id), ..lamp() })
            .await?;

        let patch: ProductPatch = serde_json::from_str(r#"{"category_id": null, "description": null}"#)?;
        let cleared = svc.update(p.id, patch).await?;
        assert_eq!(cleared.category_id, None);
        assert_eq!(cleared.description, None);

        let untouched = svc.update(p.id, ProductPatch { category_id: Some(Some(c.id)), ..Default::default() }).await?;
        assert_eq!(untouched.category_id, Some(c.id));
        assert_eq!(untouched.name, "Lamp");
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_product_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = ProductService::new(db);
        let res = svc.update(1, ProductPatch { name: Some("x".into()), ..Default::default() }).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
