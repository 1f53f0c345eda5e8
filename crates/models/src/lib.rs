//! Catalogue entities, field validation and connection helpers.

pub mod errors;
pub mod db;
pub mod category;
pub mod product;
pub mod relation;
pub mod additional_products;
pub mod recommended_products;

pub use relation::{ProductLink, ProductRelation};

#[cfg(test)]
mod tests;
