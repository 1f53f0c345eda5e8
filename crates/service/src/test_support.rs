#![cfg(test)]
use sea_orm::DatabaseConnection;

/// Fresh in-memory store per test, with migrations applied.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::connect_in_memory().await
}
