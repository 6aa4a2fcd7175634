// Persistence for catalog games

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};
use tracing::{info, instrument};

use crate::database_ops::db::Db;
use crate::models::{CatalogEntry, Game};
use crate::search::Predicate;

/// Rows per multi-row INSERT; 9 binds each keeps well under SQLite's limit.
const INSERT_CHUNK: usize = 200;

const GAME_COLUMNS: &str = "id, publisher_id, name, platform, store_id, bundle_id, app_version, is_published, created_at, updated_at";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("game {0} not found")]
    NotFound(i64),
    #[error("conflicting game already stored: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return StoreError::Conflict(db_err.message().to_string());
            }
        }
        StoreError::Database(err)
    }
}

/// Operations the service needs from game storage.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Insert all entries atomically; returns the number inserted.
    async fn bulk_insert(&self, entries: &[CatalogEntry]) -> Result<u64, StoreError>;
    async fn insert(&self, entry: &CatalogEntry) -> Result<Game, StoreError>;
    /// All games matching `predicate`, in insertion order.
    async fn find_all(&self, predicate: &Predicate) -> Result<Vec<Game>, StoreError>;
    /// Replace every field of game `id`.
    async fn update(&self, id: i64, entry: &CatalogEntry) -> Result<Game, StoreError>;
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
    async fn ping(&self) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct SqliteGameStore {
    db: Db,
}

impl SqliteGameStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GameStore for SqliteGameStore {
    #[instrument(skip(self, entries), fields(rows = entries.len()))]
    async fn bulk_insert(&self, entries: &[CatalogEntry]) -> Result<u64, StoreError> {
        if entries.is_empty() {
            return Ok(0);
        }
        let now = Utc::now();
        let mut tx = self.db.pool.begin().await?;
        let mut inserted = 0u64;
        for chunk in entries.chunks(INSERT_CHUNK) {
            let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
                "INSERT INTO games (publisher_id, name, platform, store_id, bundle_id, app_version, is_published, created_at, updated_at) ",
            );
            qb.push_values(chunk, |mut b, e| {
                b.push_bind(e.publisher_id.as_deref())
                    .push_bind(e.name.as_deref())
                    .push_bind(e.platform)
                    .push_bind(e.store_id.as_deref())
                    .push_bind(e.bundle_id.as_deref())
                    .push_bind(e.app_version.as_deref())
                    .push_bind(e.is_published)
                    .push_bind(now)
                    .push_bind(now);
            });
            inserted += qb.build().execute(&mut *tx).await?.rows_affected();
        }
        tx.commit().await?;
        info!(inserted, "bulk inserted games");
        Ok(inserted)
    }

    #[instrument(skip(self, entry))]
    async fn insert(&self, entry: &CatalogEntry) -> Result<Game, StoreError> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO games (publisher_id, name, platform, store_id, bundle_id, app_version, is_published, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {GAME_COLUMNS}"
        );
        let game = sqlx::query_as::<_, Game>(&sql)
            .bind(entry.publisher_id.as_deref())
            .bind(entry.name.as_deref())
            .bind(entry.platform)
            .bind(entry.store_id.as_deref())
            .bind(entry.bundle_id.as_deref())
            .bind(entry.app_version.as_deref())
            .bind(entry.is_published)
            .bind(now)
            .bind(now)
            .fetch_one(&self.db.pool)
            .await?;
        Ok(game)
    }

    #[instrument(skip(self))]
    async fn find_all(&self, predicate: &Predicate) -> Result<Vec<Game>, StoreError> {
        let mut qb: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new(format!("SELECT {GAME_COLUMNS} FROM games"));
        predicate.push_where(&mut qb);
        qb.push(" ORDER BY id");
        let games = qb.build_query_as::<Game>().fetch_all(&self.db.pool).await?;
        Ok(games)
    }

    #[instrument(skip(self, entry))]
    async fn update(&self, id: i64, entry: &CatalogEntry) -> Result<Game, StoreError> {
        let sql = format!(
            "UPDATE games SET publisher_id = ?, name = ?, platform = ?, store_id = ?, bundle_id = ?, \
             app_version = ?, is_published = ?, updated_at = ? WHERE id = ? RETURNING {GAME_COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&sql)
            .bind(entry.publisher_id.as_deref())
            .bind(entry.name.as_deref())
            .bind(entry.platform)
            .bind(entry.store_id.as_deref())
            .bind(entry.bundle_id.as_deref())
            .bind(entry.app_version.as_deref())
            .bind(entry.is_published)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.db.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let res = sqlx::query("DELETE FROM games WHERE id = ?")
            .bind(id)
            .execute(&self.db.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.db.pool)
            .await?;
        Ok(())
    }
}
