//! SQLite-backed user store.

use rusqlite::{params, OptionalExtension};
use tracing::{debug, info};

use super::{CredentialScheme, PlaintextScheme, UserError, UserStore};
use crate::db::SharedConnection;

/// SQLite-backed user store.
pub struct SqliteUserStore {
    conn: SharedConnection,
    scheme: Box<dyn CredentialScheme>,
}

impl SqliteUserStore {
    /// Create a user store with the plaintext credential scheme.
    pub fn new(conn: SharedConnection) -> Self {
        Self::with_scheme(conn, Box::new(PlaintextScheme))
    }

    /// Create a user store with a specific credential scheme.
    pub fn with_scheme(conn: SharedConnection, scheme: Box<dyn CredentialScheme>) -> Self {
        debug!("User store using credential scheme '{}'", scheme.scheme_name());
        Self { conn, scheme }
    }
}

impl UserStore for SqliteUserStore {
    fn register(&self, name: &str, password: &str) -> Result<i64, UserError> {
        let conn = self.conn.lock().unwrap();

        let taken: bool = conn
            .query_row(
                "SELECT 1 FROM Users WHERE user_name = ?",
                params![name],
                |_| Ok(true),
            )
            .unwrap_or(false);

        if taken {
            return Err(UserError::NameTaken(name.to_string()));
        }

        conn.execute(
            "INSERT INTO Users (user_name, password) VALUES (?, ?)",
            params![name, self.scheme.encode(password)],
        )
        .map_err(|e| UserError::Database(e.to_string()))?;

        let user_id = conn.last_insert_rowid();
        info!("Created user '{}' (id {})", name, user_id);
        Ok(user_id)
    }

    fn authenticate(&self, name: &str, password: &str) -> Result<i64, UserError> {
        let conn = self.conn.lock().unwrap();

        let row: Option<(i64, String)> = conn
            .query_row(
                "SELECT user_id, password FROM Users WHERE user_name = ?",
                params![name],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(|e| UserError::Database(e.to_string()))?;

        match row {
            Some((user_id, stored)) if self.scheme.verify(&stored, password) => Ok(user_id),
            // Unknown name and wrong password look the same to callers.
            _ => Err(UserError::InvalidCredentials),
        }
    }

    fn username_by_id(&self, user_id: i64) -> Result<Option<String>, UserError> {
        let conn = self.conn.lock().unwrap();

        conn.query_row(
            "SELECT user_name FROM Users WHERE user_id = ?",
            params![user_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| UserError::Database(e.to_string()))
    }
}
