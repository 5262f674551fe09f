//! Reviews and rating aggregation.
//!
//! Every review write recomputes the movie's mean rating in the same
//! transaction. No other code path writes `avg_rating`, so the cached
//! value is exactly the mean of the review rows.

mod sqlite;

pub use sqlite::SqliteReviewStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Valid rating range, inclusive.
pub const RATING_MIN: i64 = 1;
pub const RATING_MAX: i64 = 5;

/// A review joined with its author's name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieReview {
    pub user_name: String,
    pub rating: i64,
    pub text: String,
}

/// Errors for review operations.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Rating must be between 1 and 5 stars, got {0}")]
    InvalidRating(i64),

    #[error("Database error: {0}")]
    Database(String),
}

/// Trait for review storage.
pub trait ReviewStore: Send + Sync {
    /// Insert or overwrite the review for `(user_id, movie_id)`, then
    /// recompute and persist the movie's mean rating. Returns the new
    /// mean.
    fn upsert_review(
        &self,
        user_id: i64,
        movie_id: i64,
        rating: i64,
        text: &str,
    ) -> Result<f64, ReviewError>;

    /// All reviews of a movie, matched by title case-insensitively.
    fn reviews_for_title(&self, title: &str) -> Result<Vec<MovieReview>, ReviewError>;
}
