//! Create `recommended_products` table.
//! Directed recommendation link between two products, keyed by the ordered pair.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RecommendedProducts::Table)
                    .if_not_exists()
                    .col(integer(RecommendedProducts::PrimaryId))
                    .col(integer(RecommendedProducts::SecondaryId))
                    .primary_key(
                        Index::create()
                            .col(RecommendedProducts::PrimaryId)
                            .col(RecommendedProducts::SecondaryId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recommended_products_primary")
                            .from(RecommendedProducts::Table, RecommendedProducts::PrimaryId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_recommended_products_secondary")
                            .from(RecommendedProducts::Table, RecommendedProducts::SecondaryId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(RecommendedProducts::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum RecommendedProducts { Table, PrimaryId, SecondaryId }

#[derive(DeriveIden)]
enum Product { Table, Id }
