//! SQLite-based persistence layer
//!
//! This module provides:
//! - Database initialization and migrations
//! - Thread and settings queries
//! - `ThreadStore` / `KeyValueStore` implementations over a connection pool

mod migrations;
mod queries;
mod sqlite_store;

pub use migrations::run_migrations;
pub use queries::*;
pub use sqlite_store::{SqliteSettings, SqliteThreadStore};

use crate::error::{Error, Result, StoreError};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::{Path, PathBuf};
use tracing::info;

/// Database file created inside the data directory
const DB_FILE_NAME: &str = "thread-history.db";

/// Database connection pool type
pub type DbPool = Pool<SqliteConnectionManager>;

/// Handle on the thread history database. Cheap to clone.
#[derive(Clone)]
pub struct Storage {
    pool: DbPool,
    db_path: PathBuf,
}

impl Storage {
    /// Open (creating if needed) the database inside `data_dir`
    pub fn new_with_path(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        std::fs::create_dir_all(data_dir)?;
        Self::from_path(data_dir.join(DB_FILE_NAME))
    }

    /// Open the database file at `db_path`
    pub fn from_path(db_path: PathBuf) -> Result<Self> {
        info!("Opening thread database at {:?}", db_path);
        let manager = SqliteConnectionManager::file(&db_path)
            .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
        Self::open(manager, 8, db_path)
    }

    /// Private in-memory database on a single connection
    pub fn in_memory() -> Result<Self> {
        Self::open(
            SqliteConnectionManager::memory(),
            1,
            PathBuf::from(":memory:"),
        )
    }

    fn open(manager: SqliteConnectionManager, max_size: u32, db_path: PathBuf) -> Result<Self> {
        let pool = Pool::builder().max_size(max_size).build(manager)?;

        let conn = pool.get()?;
        run_migrations(&conn)
            .map_err(|e| Error::Store(StoreError::MigrationFailed(e.to_string())))?;

        Ok(Self { pool, db_path })
    }

    /// Check out a pooled connection
    pub fn connection(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}
