use sea_orm::{entity::prelude::*, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, product};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Product }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Product => Entity::has_many(product::Entity).into(),
        }
    }
}

impl Related<product::Entity> for Entity {
    fn to() -> RelationDef { Relation::Product.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub const NAME_MAX_LEN: usize = 128;

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("category name required".into()));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("category name longer than {NAME_MAX_LEN} chars")));
    }
    Ok(())
}

/// Validated insert model; `id` is left to the database.
pub fn new_active(name: &str, description: Option<String>) -> Result<ActiveModel, errors::ModelError> {
    validate_name(name)?;
    Ok(ActiveModel {
        name: Set(name.trim().to_string()),
        description: Set(description),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    })
}
