use std::fmt::Debug;

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    /// "`<entity> <key> does not exist`"
    pub fn not_found(entity: &str, key: impl Debug) -> Self {
        Self::NotFound(format!("{entity} {key:?} does not exist"))
    }

    /// Classify a store error; constraint violations are caller mistakes, not outages.
    pub fn db(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::Conflict(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => Self::Validation(msg),
            _ => Self::Db(err.to_string()),
        }
    }
}
