//! SQLite-backed review store.

use rusqlite::params;
use tracing::debug;

use super::{MovieReview, ReviewError, ReviewStore, RATING_MAX, RATING_MIN};
use crate::db::SharedConnection;

/// SQLite-backed review store.
pub struct SqliteReviewStore {
    conn: SharedConnection,
}

impl SqliteReviewStore {
    /// Create a review store over the shared connection.
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

impl ReviewStore for SqliteReviewStore {
    fn upsert_review(
        &self,
        user_id: i64,
        movie_id: i64,
        rating: i64,
        text: &str,
    ) -> Result<f64, ReviewError> {
        if !(RATING_MIN..=RATING_MAX).contains(&rating) {
            return Err(ReviewError::InvalidRating(rating));
        }

        let mut conn = self.conn.lock().unwrap();

        // Write and aggregate recompute commit together.
        let tx = conn
            .transaction()
            .map_err(|e| ReviewError::Database(e.to_string()))?;

        let exists: bool = tx
            .query_row(
                "SELECT 1 FROM Reviews WHERE user_id = ? AND movie_id = ?",
                params![user_id, movie_id],
                |_| Ok(true),
            )
            .unwrap_or(false);

        if exists {
            tx.execute(
                "UPDATE Reviews SET rating = ?, review_text = ? WHERE user_id = ? AND movie_id = ?",
                params![rating, text, user_id, movie_id],
            )
            .map_err(|e| ReviewError::Database(e.to_string()))?;
        } else {
            tx.execute(
                "INSERT INTO Reviews (user_id, movie_id, rating, review_text) VALUES (?, ?, ?, ?)",
                params![user_id, movie_id, rating, text],
            )
            .map_err(|e| ReviewError::Database(e.to_string()))?;
        }

        let avg: f64 = tx
            .query_row(
                "SELECT AVG(rating) FROM Reviews WHERE movie_id = ?",
                params![movie_id],
                |row| row.get(0),
            )
            .map_err(|e| ReviewError::Database(e.to_string()))?;

        tx.execute(
            "UPDATE Movies SET avg_rating = ? WHERE movie_id = ?",
            params![avg, movie_id],
        )
        .map_err(|e| ReviewError::Database(e.to_string()))?;

        tx.commit()
            .map_err(|e| ReviewError::Database(e.to_string()))?;

        debug!(
            "Review by user {} on movie {} saved, mean rating now {:.2}",
            user_id, movie_id, avg
        );
        Ok(avg)
    }

    fn reviews_for_title(&self, title: &str) -> Result<Vec<MovieReview>, ReviewError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare(
                "SELECT u.user_name, r.rating, r.review_text
                 FROM Reviews r
                 JOIN Users u ON r.user_id = u.user_id
                 JOIN Movies m ON r.movie_id = m.movie_id
                 WHERE LOWER(m.title) = LOWER(?)",
            )
            .map_err(|e| ReviewError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params![title], |row| {
                let text: Option<String> = row.get(2)?;
                Ok(MovieReview {
                    user_name: row.get(0)?,
                    rating: row.get(1)?,
                    text: text.unwrap_or_default(),
                })
            })
            .map_err(|e| ReviewError::Database(e.to_string()))?;

        let mut reviews = Vec::new();
        for row in rows {
            reviews.push(row.map_err(|e| ReviewError::Database(e.to_string()))?);
        }
        Ok(reviews)
    }
}
