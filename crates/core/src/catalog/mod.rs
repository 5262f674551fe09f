//! Movie catalogue - the relational store of movies and their shared
//! dimension rows (directors, genres, actors).
//!
//! Ingestion reuses existing dimension rows instead of duplicating
//! them, and each ingested movie commits atomically. Reporting queries
//! join movies with their dimensions into flat summaries.

mod sqlite;
mod types;

pub use sqlite::SqliteCatalog;
pub use types::*;

/// Sentinel director name used when the metadata source has none.
pub const UNKNOWN_DIRECTOR: &str = "Unknown";

/// Trait for the movie catalogue storage.
pub trait MovieCatalog: Send + Sync {
    /// Ingest a movie record.
    ///
    /// Rejects (without writing anything) when a movie with exactly the
    /// same title already exists. Director, genre and actor rows are
    /// looked up by name and created on first reference; one join row
    /// is written per genre/actor token, repeats included.
    fn add_movie(&self, record: &MovieRecord) -> Result<AddOutcome, CatalogError>;

    /// Exact-title lookup, used before watchlist and review writes.
    fn movie_id_by_title(&self, title: &str) -> Result<Option<i64>, CatalogError>;

    /// All movies with director, genres and actors.
    fn list_all(&self) -> Result<Vec<MovieSummary>, CatalogError>;

    /// Movies by director name (case-insensitive).
    fn by_director(&self, name: &str) -> Result<Vec<MovieSummary>, CatalogError>;

    /// Movies featuring an actor (case-insensitive).
    fn by_actor(&self, name: &str) -> Result<Vec<MovieSummary>, CatalogError>;

    /// Movies in a genre (case-insensitive).
    fn by_genre(&self, name: &str) -> Result<Vec<MovieSummary>, CatalogError>;

    /// Highest-rated movies, mean recomputed from review rows rather
    /// than the cached `avg_rating`.
    fn top_rated(&self, limit: u32) -> Result<Vec<RatedMovie>, CatalogError>;
}
