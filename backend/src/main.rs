//! Backend entry-point: loads settings, prepares storage and serves the
//! record endpoints.

mod server;

use std::time::Duration;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use backend::settings::ServerSettings;
use ortho_config::OrthoConfig;
use server::{ServerConfig, create_server};

const DB_CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Apply pending migrations on a blocking thread.
async fn migrate(database_url: &str) -> std::io::Result<()> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .map_err(|err| std::io::Error::other(format!("migration task failed: {err}")))?
        .map_err(std::io::Error::other)?;
    info!(applied, "database migrations applied");
    Ok(())
}

async fn build_server_config(settings: &ServerSettings) -> std::io::Result<ServerConfig> {
    let config = ServerConfig::new(settings.bind_addr())
        .with_upload_limit(settings.upload_limit_bytes())
        .with_json_limit(settings.json_limit_bytes())
        .with_max_page_size(settings.max_page_size());

    let Some(database_url) = settings.database_url() else {
        return Ok(config);
    };

    if settings.run_migrations() {
        migrate(database_url).await?;
    }
    let pool = DbPool::new(
        PoolConfig::new(database_url)
            .with_max_size(settings.db_max_connections())
            .with_connection_timeout(DB_CONNECTION_TIMEOUT),
    )
    .await
    .map_err(std::io::Error::other)?;

    Ok(config.with_db_pool(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let config = build_server_config(&settings).await?;

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(server::build_prometheus());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_draining();
    result
}
