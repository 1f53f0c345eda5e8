//! Product `secondary_id` is recommended alongside `primary_id`.
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use crate::product;
use crate::relation::{ProductLink, ProductRelation};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recommended_products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub primary_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub secondary_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Primary, Secondary }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Primary => Entity::belongs_to(product::Entity)
                .from(Column::PrimaryId)
                .to(product::Column::Id)
                .into(),
            Relation::Secondary => Entity::belongs_to(product::Entity)
                .from(Column::SecondaryId)
                .to(product::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ProductRelation for Entity {
    const KIND: &'static str = "recommended_products";

    fn primary_column() -> Column { Column::PrimaryId }

    fn secondary_column() -> Column { Column::SecondaryId }

    fn link(primary_id: i32, secondary_id: i32) -> ActiveModel {
        ActiveModel { primary_id: Set(primary_id), secondary_id: Set(secondary_id) }
    }

    fn to_link(model: &Model) -> ProductLink {
        ProductLink { primary_id: model.primary_id, secondary_id: model.secondary_id }
    }
}
