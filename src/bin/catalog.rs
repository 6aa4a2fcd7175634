use anyhow::{Context, Result};
use app_catalog::config::AppConfig;
use app_catalog::database_ops::{Db, GameStore, SqliteGameStore};
use app_catalog::ingest::{self, JsonDirSource};
use app_catalog::search;
use app_catalog::tracing::{init_tracing, DEFAULT_FILTER};
use app_catalog::util::env as env_util;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "catalog", version, about = "App catalog admin CLI")]
struct Cli {
    /// Optional override for DATABASE_URL
    #[arg(long, global = true)]
    db_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "kebab-case")]
enum Commands {
    /// Ingest the ios and android top-100 snapshots into the database
    Populate {
        /// Directory holding <platform>.top100.json (defaults to CATALOG_DIR)
        #[arg(long)]
        catalog_dir: Option<PathBuf>,
        /// Normalize and report without writing anything
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Search persisted games by name substring and platform
    Search {
        #[arg(long, default_value = "")]
        name: String,
        /// "ios", "android", or empty for any
        #[arg(long, default_value = "")]
        platform: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_util::init_env();
    init_tracing(DEFAULT_FILTER)?;
    env_util::bootstrap_cli("catalog");

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(url) = cli.db_url {
        config.database_url = url;
    }

    match cli.command {
        Commands::Populate {
            catalog_dir,
            dry_run,
        } => {
            let source = JsonDirSource::new(catalog_dir.unwrap_or(config.catalog_dir.clone()));
            if dry_run {
                let prepared = ingest::prepare(&source)?;
                for p in &prepared.platforms {
                    println!(
                        "{}: seen={} duplicates={} missing_id={} malformed={} truncated={} kept={}",
                        p.platform,
                        p.report.records_seen,
                        p.report.duplicates_dropped,
                        p.report.missing_app_id,
                        p.report.malformed_skipped,
                        p.report.truncated,
                        p.report.kept
                    );
                }
                println!("would insert {} games", prepared.entries.len());
                return Ok(());
            }
            let store = open_store(&config).await?;
            let summary = ingest::populate(&source, &store).await?;
            println!("Added {} games in db", summary.inserted);
        }
        Commands::Search { name, platform } => {
            let body = serde_json::json!({ "name": name, "platform": platform });
            let predicate = search::parse_request(&body)?;
            let store = open_store(&config).await?;
            let games = store.find_all(&predicate).await?;
            println!("Games ({}):", games.len());
            for g in &games {
                println!(
                    "  [{}] {} ({}) store_id={}",
                    g.id,
                    g.name.as_deref().unwrap_or("<unnamed>"),
                    g.platform,
                    g.store_id.as_deref().unwrap_or("-")
                );
            }
        }
    }
    Ok(())
}

async fn open_store(config: &AppConfig) -> Result<SqliteGameStore> {
    let db = Db::connect(&config.database_url, config.max_connections)
        .await
        .context("failed to open catalog database")?;
    Ok(SqliteGameStore::new(db))
}
