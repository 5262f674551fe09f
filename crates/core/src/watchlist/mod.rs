//! Per-user watchlists.
//!
//! Adds are unconditional: a user can watchlist the same movie twice
//! and end up with repeated rows. Removal deletes every matching row.

mod sqlite;

pub use sqlite::SqliteWatchlistStore;

use thiserror::Error;

/// Errors for watchlist operations.
#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error("Database error: {0}")]
    Database(String),
}

/// Trait for watchlist storage.
pub trait WatchlistStore: Send + Sync {
    /// Add a movie to a user's watchlist. No duplicate check.
    fn add(&self, user_id: i64, movie_id: i64) -> Result<(), WatchlistError>;

    /// Remove every watchlist row for `(user_id, movie_id)`.
    ///
    /// No-op when none match.
    fn remove(&self, user_id: i64, movie_id: i64) -> Result<(), WatchlistError>;

    /// Watchlisted movie titles in storage order.
    fn titles(&self, user_id: i64) -> Result<Vec<String>, WatchlistError>;
}
