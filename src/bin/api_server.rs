// HTTP API server binary for the app catalog

use anyhow::{Context, Result};
use app_catalog::api::{ApiServer, AppState};
use app_catalog::config::AppConfig;
use app_catalog::database_ops::{Db, SqliteGameStore};
use app_catalog::ingest::JsonDirSource;
use app_catalog::tracing::{init_tracing, DEFAULT_FILTER};
use app_catalog::util::env as env_util;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> Result<()> {
    env_util::init_env();
    init_tracing(DEFAULT_FILTER)?;
    env_util::bootstrap_cli("api_server");

    let config = AppConfig::from_env();

    let db = Db::connect(&config.database_url, config.max_connections)
        .await
        .context("failed to open catalog database")?;
    tracing::info!("Database connected successfully");

    let state = AppState::new(
        Arc::new(SqliteGameStore::new(db)),
        Arc::new(JsonDirSource::new(&config.catalog_dir)),
    );

    ApiServer::from_config(&config).run(state).await
}
