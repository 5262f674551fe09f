//! Types for the movie catalogue.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A normalized movie record ready for ingestion.
///
/// Multi-value fields arrive already tokenized (see
/// [`crate::metadata::split_names`]); the catalogue never parses raw
/// API strings itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Movie title, the catalogue's uniqueness key.
    pub title: String,
    /// Director name; `None` becomes the "Unknown" sentinel on insert.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    /// Genre names. Repeated tokens are preserved.
    pub genres: Vec<String>,
    /// Actor names. Repeated tokens are preserved.
    pub actors: Vec<String>,
    /// Release date exactly as the metadata source reported it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

/// Outcome of an ingestion attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The movie and its join rows were committed.
    Added { movie_id: i64 },
    /// A movie with the same title already exists; nothing was written.
    Duplicate,
}

/// A movie row joined with its director, genres and actors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieSummary {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    pub director: String,
    /// Cached mean review rating; `None` until the first review.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_rating: Option<f64>,
    pub genres: Vec<String>,
    pub actors: Vec<String>,
}

/// Entry of the top-rated ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatedMovie {
    pub title: String,
    /// Mean of the movie's review ratings.
    pub avg_rating: f64,
}

/// Errors for catalogue operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    Database(String),
}
