pub mod api;
pub mod config;
pub mod database_ops;
pub mod ingest;
pub mod models;
pub mod normalization;
pub mod search;
pub mod tracing;

pub mod util {
    pub mod env;
}

pub use models::{CatalogEntry, Game, Platform};
