//! Shared shape of the product-to-product relation tables.
//!
//! `additional_products` and `recommended_products` are both keyed by the
//! ordered pair `(primary_id, secondary_id)` and carry nothing else; this
//! trait lets the service layer drive either table through one code path.

use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};

/// A directed link "`secondary_id` belongs with `primary_id`".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductLink {
    pub primary_id: i32,
    pub secondary_id: i32,
}

pub trait ProductRelation: EntityTrait {
    /// Kind name used in log fields and not-found messages.
    const KIND: &'static str;

    fn primary_column() -> Self::Column;

    fn secondary_column() -> Self::Column;

    /// Insert model for the pair.
    fn link(primary_id: i32, secondary_id: i32) -> Self::ActiveModel;

    fn to_link(model: &Self::Model) -> ProductLink;
}
