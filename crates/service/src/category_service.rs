use common::pagination::Pagination;
use models::category;
use sea_orm::{DatabaseConnection, Set};
use tracing::{info, instrument};

use crate::domain::{CategoryPatch, NewCategory};
use crate::errors::ServiceError;
use crate::repository::Repository;

pub struct CategoryService {
    repo: Repository<category::Entity>,
}

impl CategoryService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { repo: Repository::new(db) }
    }

    pub async fn list(&self) -> Result<Vec<category::Model>, ServiceError> {
        self.repo.list().await
    }

    pub async fn list_page(&self, pagination: Pagination) -> Result<Vec<category::Model>, ServiceError> {
        self.repo.list_page(pagination).await
    }

    pub async fn detail(&self, pk: i32) -> Result<category::Model, ServiceError> {
        self.repo.get(pk).await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: NewCategory) -> Result<category::Model, ServiceError> {
        let created = self.repo.create(category::new_active(&input.name, input.description)?).await?;
        info!(category_id = created.id, "category_created");
        Ok(created)
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, pk: i32, patch: CategoryPatch) -> Result<category::Model, ServiceError> {
        let mut am: category::ActiveModel = self.repo.get(pk).await?.into();
        if let Some(name) = patch.name {
            category::validate_name(&name)?;
            am.name = Set(name.trim().to_string());
        }
        if let Some(description) = patch.description {
            am.description = Set(description);
        }
        self.repo.update(am).await
    }

    /// Products in the category are detached, not removed.
    #[instrument(skip(self))]
    pub async fn delete(&self, pk: i32) -> Result<(), ServiceError> {
        self.repo.delete(pk).await?;
        info!(category_id = pk, "category_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewProduct;
    use crate::product_service::ProductService;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn category_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = CategoryService::new(db);

        let c = svc.create(NewCategory { name: "Garden".into(), description: None }).await?;
        assert_eq!(svc.detail(c.id).await?.name, "Garden");

        let renamed = svc.update(c.id, CategoryPatch { name: Some("Outdoor".into()), ..Default::default() }).await?;
        assert_eq!(renamed.name, "Outdoor");
        assert_eq!(svc.list().await?.len(), 1);

        svc.delete(c.id).await?;
        assert!(matches!(svc.detail(c.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(c.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_name_conflicts() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = CategoryService::new(db);
        svc.create(NewCategory { name: "Toys".into(), description: None }).await?;
        let dup = svc.create(NewCategory { name: "Toys".into(), description: None }).await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));
        Ok(())
    }

    #[tokio::test]
    async fn deleting_category_detaches_products() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let categories = CategoryService::new(db.clone());
        let products = ProductService::new(db);

        let c = categories.create(NewCategory { name: "Kitchen".into(), description: None }).await?;
        let p = products
            .create(NewProduct { name: "Pan".into(), description: None, price: 30.0, category_id: Some(c.id) })
            .await?;
        categories.delete(c.id).await?;

        assert_eq!(products.detail(p.id).await?.category_id, None);
        Ok(())
    }
}
