use anyhow::Result;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, instrument};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS games (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    publisher_id TEXT,
    name         TEXT,
    platform     TEXT NOT NULL CHECK (platform IN ('ios', 'android')),
    store_id     TEXT,
    bundle_id    TEXT,
    app_version  TEXT,
    is_published BOOLEAN NOT NULL DEFAULT 1,
    created_at   TEXT NOT NULL,
    updated_at   TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS games_platform_idx ON games (platform);
CREATE INDEX IF NOT EXISTS games_name_idx ON games (name);
"#;

#[derive(Clone)]
pub struct Db {
    pub pool: SqlitePool,
}

impl Db {
    /// Open (creating if missing) the database and make sure the `games`
    /// table exists.
    ///
    /// In-memory URLs get a single long-lived connection: every new SQLite
    /// memory connection would otherwise see its own empty database.
    // SECURITY: never include raw DSNs in tracing spans.
    #[instrument(skip(database_url))]
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

        let mut pool_options = SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(10));
        pool_options = if in_memory {
            pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options
                .max_connections(max_connections.max(1))
                .idle_timeout(Duration::from_secs(600))
        };

        let pool = pool_options.connect_with(connect_options).await?;
        info!(in_memory, "connected to db");

        Self::ensure_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// Fresh private in-memory database for tests.
    pub async fn in_memory() -> Result<Self> {
        Self::connect("sqlite::memory:", 1).await
    }

    async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::raw_sql(SCHEMA).execute(pool).await?;
        Ok(())
    }
}
