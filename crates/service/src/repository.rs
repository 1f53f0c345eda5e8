//! Generic data access over a sea-orm entity.
//!
//! `Repository<E>` owns a handle to the pooled connection and exposes the
//! create / get / update / delete / list operations every catalogue entity
//! needs. Missing keys surface as [`ServiceError::NotFound`].

use std::fmt::Debug;
use std::marker::PhantomData;

use common::pagination::Pagination;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, Iterable, PaginatorTrait, PrimaryKeyToColumn, PrimaryKeyTrait, QueryFilter, QueryOrder,
    Select,
};
use tracing::debug;

use crate::errors::ServiceError;

/// Primary key value of an entity (`i32`, or a tuple for composite keys).
pub type PrimaryKeyOf<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

pub struct Repository<E: EntityTrait> {
    db: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E: EntityTrait> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self { db: self.db.clone(), _entity: PhantomData }
    }
}

impl<E> Repository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    PrimaryKeyOf<E>: Clone + Debug,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, _entity: PhantomData }
    }

    pub fn table() -> String {
        E::default().table_name().to_string()
    }

    fn ordered() -> Select<E> {
        let mut query = E::find();
        for key in <E::PrimaryKey as Iterable>::iter() {
            query = query.order_by_asc(key.into_column());
        }
        query
    }

    /// All rows ordered by primary key.
    pub async fn list(&self) -> Result<Vec<E::Model>, ServiceError> {
        Self::ordered().all(&self.db).await.map_err(ServiceError::db)
    }

    pub async fn list_page(&self, pagination: Pagination) -> Result<Vec<E::Model>, ServiceError> {
        let (page_idx, per_page) = pagination.normalize();
        Self::ordered()
            .paginate(&self.db, per_page)
            .fetch_page(page_idx)
            .await
            .map_err(ServiceError::db)
    }

    pub async fn list_where(&self, condition: Condition) -> Result<Vec<E::Model>, ServiceError> {
        Self::ordered().filter(condition).all(&self.db).await.map_err(ServiceError::db)
    }

    pub async fn find(&self, pk: PrimaryKeyOf<E>) -> Result<Option<E::Model>, ServiceError> {
        E::find_by_id(pk).one(&self.db).await.map_err(ServiceError::db)
    }

    /// Row for `pk`, or not-found.
    pub async fn get(&self, pk: PrimaryKeyOf<E>) -> Result<E::Model, ServiceError> {
        self.find(pk.clone())
            .await?
            .ok_or_else(|| ServiceError::not_found(&Self::table(), pk))
    }

    pub async fn create(&self, model: E::ActiveModel) -> Result<E::Model, ServiceError> {
        let created = model.insert(&self.db).await.map_err(ServiceError::db)?;
        debug!(table = %Self::table(), "row inserted");
        Ok(created)
    }

    pub async fn update(&self, model: E::ActiveModel) -> Result<E::Model, ServiceError> {
        model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => ServiceError::NotFound(format!("{} does not exist", Self::table())),
            other => ServiceError::db(other),
        })
    }

    pub async fn delete(&self, pk: PrimaryKeyOf<E>) -> Result<(), ServiceError> {
        let res = E::delete_by_id(pk.clone()).exec(&self.db).await.map_err(ServiceError::db)?;
        if res.rows_affected == 0 {
            return Err(ServiceError::not_found(&Self::table(), pk));
        }
        debug!(table = %Self::table(), key = ?pk, "row deleted");
        Ok(())
    }

    /// Insert unless a row with the same `conflict_columns` already exists.
    /// Returns the number of rows written (0 or 1).
    pub async fn insert_or_ignore<I>(&self, model: E::ActiveModel, conflict_columns: I) -> Result<u64, ServiceError>
    where
        I: IntoIterator<Item = E::Column>,
    {
        E::insert(model)
            .on_conflict(OnConflict::columns(conflict_columns).do_nothing().to_owned())
            .exec_without_returning(&self.db)
            .await
            .map_err(ServiceError::db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use models::{additional_products, category, product, ProductRelation};
    use sea_orm::ColumnTrait;

    async fn seed(repo: &Repository<product::Entity>, n: usize) -> anyhow::Result<Vec<product::Model>> {
        let mut out = Vec::new();
        for i in 0..n {
            out.push(repo.create(product::new_active(&format!("p{i}"), None, i as f64, None)?).await?);
        }
        Ok(out)
    }

    #[tokio::test]
    async fn crud_cycle() -> anyhow::Result<()> {
        let db = get_db().await?;
        let repo: Repository<category::Entity> = Repository::new(db);

        let c = repo.create(category::new_active("Books", None)?).await?;
        assert_eq!(repo.get(c.id).await?.name, "Books");

        let mut am: category::ActiveModel = c.clone().into();
        am.name = sea_orm::Set("Comics".into());
        let updated = repo.update(am).await?;
        assert_eq!(updated.name, "Comics");

        repo.delete(c.id).await?;
        assert!(repo.find(c.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn missing_key_is_not_found() -> anyhow::Result<()> {
        let db = get_db().await?;
        let repo: Repository<product::Entity> = Repository::new(db);

        let err = repo.get(404).await.unwrap_err();
        assert_eq!(err.to_string(), "product 404 does not exist");
        assert!(matches!(repo.delete(404).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn list_is_ordered_and_pageable() -> anyhow::Result<()> {
        let db = get_db().await?;
        let repo: Repository<product::Entity> = Repository::new(db);
        let seeded = seed(&repo, 5).await?;

        let all = repo.list().await?;
        assert_eq!(all.iter().map(|p| p.id).collect::<Vec<_>>(), seeded.iter().map(|p| p.id).collect::<Vec<_>>());

        let page2 = repo.list_page(Pagination { page: 2, per_page: 2 }).await?;
        assert_eq!(page2.len(), 2);
        assert_eq!(page2[0].id, seeded[2].id);

        let cheap = repo.list_where(Condition::all().add(product::Column::Price.lt(2.0))).await?;
        assert_eq!(cheap.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn insert_or_ignore_keeps_single_row() -> anyhow::Result<()> {
        let db = get_db().await?;
        let products: Repository<product::Entity> = Repository::new(db.clone());
        let links: Repository<additional_products::Entity> = Repository::new(db);
        let p = seed(&products, 2).await?;

        let cols = || [additional_products::Column::PrimaryId, additional_products::Column::SecondaryId];
        assert_eq!(links.insert_or_ignore(additional_products::Entity::link(p[0].id, p[1].id), cols()).await?, 1);
        assert_eq!(links.insert_or_ignore(additional_products::Entity::link(p[0].id, p[1].id), cols()).await?, 0);
        assert_eq!(links.list().await?.len(), 1);
        Ok(())
    }
}
