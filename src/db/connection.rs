//! Database connection management
//!
//! Pooled SQLite connections for the recipe book.

use std::path::Path;
use std::sync::Arc;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

use super::migrations;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database connection error: {0}")]
    Connection(#[from] r2d2::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type DbResult<T> = Result<T, DbError>;

/// Ingredient and step rows cascade with their recipe, so every
/// connection needs foreign keys enforced
fn init_file_connection(conn: &mut Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )
}

fn init_memory_connection(conn: &mut Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
}

/// Shared handle to the recipe database
#[derive(Clone)]
pub struct Database {
    pool: Arc<Pool<SqliteConnectionManager>>,
}

impl Database {
    /// Open (creating if needed) a database file
    pub fn new<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let manager = SqliteConnectionManager::file(path)
            .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE)
            .with_init(init_file_connection);

        let pool = Pool::builder().max_size(8).build(manager)?;
        Ok(Self { pool: Arc::new(pool) })
    }

    /// Create a single-connection in-memory database
    ///
    /// Every connection to `:memory:` is a separate database, so the pool
    /// holds exactly one.
    pub fn open_in_memory() -> DbResult<Self> {
        let manager = SqliteConnectionManager::memory().with_init(init_memory_connection);

        let pool = Pool::builder().max_size(1).build(manager)?;
        Ok(Self { pool: Arc::new(pool) })
    }

    /// Bring the schema up to date, returning the resulting version
    pub fn migrate(&self) -> DbResult<i32> {
        self.with_conn(|conn| {
            if migrations::needs_migration(conn)? {
                tracing::info!("Migrating database schema");
            }
            migrations::run_migrations(conn)?;
            migrations::get_schema_version(conn)
        })
    }

    pub fn get_conn(&self) -> DbResult<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }

    /// Execute a closure with a database connection
    pub fn with_conn<F, T>(&self, f: F) -> DbResult<T>
    where
        F: FnOnce(&Connection) -> DbResult<T>,
    {
        let conn = self.get_conn()?;
        f(&conn)
    }
}
