/// Entity round-trips against an in-memory store with the full schema
mod entity_tests {
    use crate::db::connect_in_memory;
    use crate::{additional_products, category, product, recommended_products, ProductRelation};
    use anyhow::Result;
    use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, QueryFilter, ColumnTrait};

    #[tokio::test]
    async fn product_belongs_to_category() -> Result<()> {
        let db = connect_in_memory().await?;

        let c = category::new_active("Lighting", None)?.insert(&db).await?;
        let p = product::new_active("Lamp", None, 20.0, Some(c.id))?.insert(&db).await?;
        assert_eq!(p.category_id, Some(c.id));

        let owner = p.find_related(category::Entity).one(&db).await?;
        assert_eq!(owner.map(|o| o.id), Some(c.id));

        let in_category = c.find_related(product::Entity).all(&db).await?;
        assert_eq!(in_category.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn relation_rows_keyed_by_pair() -> Result<()> {
        let db = connect_in_memory().await?;

        let a = product::new_active("A", None, 1.0, None)?.insert(&db).await?;
        let b = product::new_active("B", None, 2.0, None)?.insert(&db).await?;

        let row = additional_products::Entity::link(a.id, b.id).insert(&db).await?;
        assert_eq!(additional_products::Entity::to_link(&row).secondary_id, b.id);

        // same pair in the other table is independent
        recommended_products::Entity::link(a.id, b.id).insert(&db).await?;

        let found = additional_products::Entity::find_by_id((a.id, b.id)).one(&db).await?;
        assert!(found.is_some());

        // duplicate pair violates the composite key
        assert!(additional_products::Entity::link(a.id, b.id).insert(&db).await.is_err());

        let listed = recommended_products::Entity::find()
            .filter(recommended_products::Column::PrimaryId.eq(a.id))
            .all(&db)
            .await?;
        assert_eq!(listed.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn deleting_product_cascades_to_relations() -> Result<()> {
        let db = connect_in_memory().await?;

        let a = product::new_active("A", None, 1.0, None)?.insert(&db).await?;
        let b = product::new_active("B", None, 2.0, None)?.insert(&db).await?;
        additional_products::Entity::link(a.id, b.id).insert(&db).await?;

        product::Entity::delete_by_id(b.id).exec(&db).await?;
        let left = additional_products::Entity::find().all(&db).await?;
        assert!(left.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn relation_requires_existing_products() -> Result<()> {
        let db = connect_in_memory().await?;
        let a = product::new_active("A", None, 1.0, None)?.insert(&db).await?;
        assert!(additional_products::Entity::link(a.id, 9999).insert(&db).await.is_err());
        Ok(())
    }
}
