use serde::{Deserialize, Deserializer, Serialize};

pub use models::ProductLink;

/// Product creation input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category_id: Option<i32>,
}

/// Absent field -> `None`, explicit `null` -> `Some(None)`.
fn nullable<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// Partial product update; absent fields are left untouched, `null` clears
/// `description` and `category_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Option<i32>>,
}

/// Category creation input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

/// Partial category update; `null` clears `description`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}
