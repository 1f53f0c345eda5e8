use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Product: filter by category
        manager
            .create_index(
                Index::create()
                    .name("idx_product_category")
                    .table(Product::Table)
                    .col(Product::CategoryId)
                    .to_owned(),
            )
            .await?;

        // Relations: reverse lookup by secondary product
        manager
            .create_index(
                Index::create()
                    .name("idx_additional_products_secondary")
                    .table(AdditionalProducts::Table)
                    .col(AdditionalProducts::SecondaryId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_recommended_products_secondary")
                    .table(RecommendedProducts::Table)
                    .col(RecommendedProducts::SecondaryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_product_category").table(Product::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_additional_products_secondary").table(AdditionalProducts::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_recommended_products_secondary").table(RecommendedProducts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Product { Table, CategoryId }

#[derive(DeriveIden)]
enum AdditionalProducts { Table, SecondaryId }

#[derive(DeriveIden)]
enum RecommendedProducts { Table, SecondaryId }
