//! Migrator registering catalogue migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20220101_000001_create_category;
mod m20220101_000002_create_product;
mod m20220101_000003_create_additional_products;
mod m20220101_000004_create_recommended_products;
mod m20220101_000005_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20220101_000001_create_category::Migration),
            Box::new(m20220101_000002_create_product::Migration),
            Box::new(m20220101_000003_create_additional_products::Migration),
            Box::new(m20220101_000004_create_recommended_products::Migration),
            // Indexes should always be applied last
            Box::new(m20220101_000005_add_indexes::Migration),
        ]
    }
}
