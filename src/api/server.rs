// API server implementation using actix-web

use crate::api::{middleware, routes, state::AppState};
use crate::config::AppConfig;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};

pub struct ApiServer {
    pub bind_addr: String,
    pub allowed_origins: String,
}

impl ApiServer {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            bind_addr: config.bind_addr(),
            allowed_origins: config.allowed_origins.clone(),
        }
    }

    /// Start the HTTP server
    pub async fn run(self, state: AppState) -> Result<()> {
        let bind_addr = self.bind_addr;

        tracing::info!(bind_addr = %bind_addr, "Starting app catalog API server");

        let state = web::Data::new(state);
        let allowed_origins = self.allowed_origins.clone();

        HttpServer::new(move || {
            let (logger, compress) = middleware::setup_middleware();
            let cors = middleware::setup_cors(&allowed_origins);

            App::new()
                .app_data(state.clone())
                .wrap(logger)
                .wrap(compress)
                .wrap(cors)
                .configure(routes::configure_routes)
        })
        .bind(&bind_addr)
        .with_context(|| format!("Failed to bind to {}", bind_addr))?
        .run()
        .await
        .context("HTTP server error")?;

        Ok(())
    }
}
