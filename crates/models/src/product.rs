use sea_orm::{entity::prelude::*, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{category, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category_id: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Category }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryId)
                .to(category::Column::Id)
                .into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub const NAME_MAX_LEN: usize = 256;

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("product name required".into()));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("product name longer than {NAME_MAX_LEN} chars")));
    }
    Ok(())
}

pub fn validate_price(price: f64) -> Result<(), errors::ModelError> {
    if !price.is_finite() || price < 0.0 {
        return Err(errors::ModelError::Validation("price must be a non-negative number".into()));
    }
    Ok(())
}

/// Validated insert model; `id` is left to the database.
pub fn new_active(
    name: &str,
    description: Option<String>,
    price: f64,
    category_id: Option<i32>,
) -> Result<ActiveModel, errors::ModelError> {
    validate_name(name)?;
    validate_price(price)?;
    let now = Utc::now().into();
    Ok(ActiveModel {
        name: Set(name.trim().to_string()),
        description: Set(description),
        price: Set(price),
        category_id: Set(category_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    })
}
