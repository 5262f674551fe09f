//! SQLite-backed watchlist store.

use rusqlite::params;
use tracing::debug;

use super::{WatchlistError, WatchlistStore};
use crate::db::SharedConnection;

/// SQLite-backed watchlist store.
pub struct SqliteWatchlistStore {
    conn: SharedConnection,
}

impl SqliteWatchlistStore {
    /// Create a watchlist store over the shared connection.
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

impl WatchlistStore for SqliteWatchlistStore {
    fn add(&self, user_id: i64, movie_id: i64) -> Result<(), WatchlistError> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "INSERT INTO Watchlists (user_id, movie_id) VALUES (?, ?)",
            params![user_id, movie_id],
        )
        .map_err(|e| WatchlistError::Database(e.to_string()))?;

        Ok(())
    }

    fn remove(&self, user_id: i64, movie_id: i64) -> Result<(), WatchlistError> {
        let conn = self.conn.lock().unwrap();

        let removed = conn
            .execute(
                "DELETE FROM Watchlists WHERE user_id = ? AND movie_id = ?",
                params![user_id, movie_id],
            )
            .map_err(|e| WatchlistError::Database(e.to_string()))?;

        debug!(
            "Removed {} watchlist row(s) for user {} movie {}",
            removed, user_id, movie_id
        );
        Ok(())
    }

    fn titles(&self, user_id: i64) -> Result<Vec<String>, WatchlistError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare(
                "SELECT m.title FROM Movies m
                 JOIN Watchlists w ON m.movie_id = w.movie_id
                 WHERE w.user_id = ?",
            )
            .map_err(|e| WatchlistError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params![user_id], |row| row.get(0))
            .map_err(|e| WatchlistError::Database(e.to_string()))?;

        let mut titles = Vec::new();
        for row in rows {
            titles.push(row.map_err(|e| WatchlistError::Database(e.to_string()))?);
        }
        Ok(titles)
    }
}
