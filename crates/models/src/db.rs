use std::time::Duration;

use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

/// Connect with pool sizing and timeouts taken from `[database]`.
pub async fn connect_with_config(cfg: &configs::DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opt).await?;
    info!(max_connections = cfg.max_connections, min_connections = cfg.min_connections, "database pool ready");
    Ok(db)
}

/// Private in-memory SQLite store with the schema applied.
///
/// The pool is pinned to a single connection: every SQLite `:memory:`
/// connection opens its own empty database.
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;
    migrate(&db).await?;
    Ok(db)
}

/// Apply every pending migration.
pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
    migration::Migrator::up(db, None).await?;
    Ok(())
}
