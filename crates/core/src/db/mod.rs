//! Shared SQLite database handle.
//!
//! The program uses one persistent connection for its whole lifetime.
//! Each store receives the handle at construction time instead of
//! reaching for ambient global state, so tests can run against their
//! own in-memory databases.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use thiserror::Error;
use tracing::debug;

/// Idempotent schema script, re-run on every launch.
const SCHEMA: &str = include_str!("schema.sql");

/// Handle to the single persistent connection, cloned into each store.
pub type SharedConnection = Arc<Mutex<Connection>>;

/// Errors opening or bootstrapping the database.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Failed to open database: {0}")]
    Open(String),

    #[error("Failed to load schema: {0}")]
    Schema(String),
}

/// The single persistent database behind all stores.
pub struct Database {
    conn: SharedConnection,
}

impl Database {
    /// Open the database file, creating tables if needed.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path).map_err(|e| DbError::Open(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        debug!("Opened database at {:?}", path);
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory database (useful for testing).
    pub fn in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory().map_err(|e| DbError::Open(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), DbError> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| DbError::Schema(e.to_string()))
    }

    /// Clone the shared handle for store construction.
    pub fn handle(&self) -> SharedConnection {
        Arc::clone(&self.conn)
    }
}
