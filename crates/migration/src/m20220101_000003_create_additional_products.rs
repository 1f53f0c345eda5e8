//! Create `additional_products` table.
//! Directed upsell link between two products, keyed by the ordered pair.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdditionalProducts::Table)
                    .if_not_exists()
                    .col(integer(AdditionalProducts::PrimaryId))
                    .col(integer(AdditionalProducts::SecondaryId))
                    .primary_key(
                        Index::create()
                            .col(AdditionalProducts::PrimaryId)
                            .col(AdditionalProducts::SecondaryId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_additional_products_primary")
                            .from(AdditionalProducts::Table, AdditionalProducts::PrimaryId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_additional_products_secondary")
                            .from(AdditionalProducts::Table, AdditionalProducts::SecondaryId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AdditionalProducts::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum AdditionalProducts { Table, PrimaryId, SecondaryId }

#[derive(DeriveIden)]
enum Product { Table, Id }
