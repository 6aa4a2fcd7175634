pub mod db;
pub mod games;

pub use db::Db;
pub use games::{GameStore, SqliteGameStore, StoreError};
