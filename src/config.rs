// Runtime configuration gathered from the environment

use std::path::PathBuf;

use crate::util::env::{env_opt, env_parse, init_env};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://games.db?mode=rwc";

/// Every variable [`AppConfig::from_env`] reads.
pub const ENV_KEYS: [&str; 6] = [
    "DATABASE_URL",
    "DB_MAX_CONNS",
    "CATALOG_DIR",
    "API_HOST",
    "API_PORT",
    "ALLOWED_ORIGINS",
];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    /// Directory holding `<platform>.top100.json` snapshots.
    pub catalog_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub allowed_origins: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        init_env();
        Self {
            database_url: env_opt("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            max_connections: env_parse("DB_MAX_CONNS", 5u32),
            catalog_dir: env_opt("CATALOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            host: env_opt("API_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: env_parse("API_PORT", 8080u16),
            allowed_origins: env_opt("ALLOWED_ORIGINS")
                .unwrap_or_else(|| "http://localhost:3000".into()),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
