use std::{fmt, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use service::analytics::TracingProductAnalytics;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

/// Where the running configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    Env,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConfigSource::File => "file",
            ConfigSource::Env => "env",
        })
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config file first; only an unreadable or unparsable file falls back to
/// the environment. Validation failures are reported, never swallowed.
pub fn load_config() -> Result<(AppConfig, ConfigSource), StartupError> {
    let (mut cfg, source) = match configs::load_default() {
        Ok(cfg) => (cfg, ConfigSource::File),
        Err(_) => (AppConfig::from_env(), ConfigSource::Env),
    };
    cfg.normalize_and_validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    Ok((cfg, source))
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Build the app from a loaded config and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.database.auto_migrate {
        models::db::migrate(&db).await?;
        info!("migrations applied");
    }

    let state = ServerState::new(db, Arc::new(TracingProductAnalytics));
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting catalogue server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_server_section() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "0.0.0.0".into();
        cfg.server.port = 9090;
        assert_eq!(bind_addr(&cfg).ok(), "0.0.0.0:9090".parse().ok());

        cfg.server.host = "not a host".into();
        assert!(matches!(bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));
    }
}
