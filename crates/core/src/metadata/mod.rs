//! Movie metadata source (OMDb).
//!
//! One blocking GET per lookup keyed by an API key and a free-text
//! title. Failures surface as errors the shell reports; there are no
//! retries and no caching of responses.

mod omdb;
mod parse;

pub use omdb::OmdbClient;
pub use parse::split_names;

use thiserror::Error;

use crate::catalog::MovieRecord;

/// Errors that can occur when fetching movie metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The source has no record for the title.
    #[error("Movie not found: {0}")]
    NotFound(String),

    /// API returned an error status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Trait for metadata sources.
pub trait MetadataSource: Send + Sync {
    /// Fetch a movie record by free-text title.
    fn fetch_by_title(&self, title: &str) -> Result<MovieRecord, MetadataError>;
}
