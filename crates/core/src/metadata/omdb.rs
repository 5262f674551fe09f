//! OMDb API client.
//!
//! OMDb requires an API key for access. The API signals "no record"
//! inside a 200 body via a `Response` flag rather than an HTTP status.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use super::parse::{split_names, ABSENT};
use super::{MetadataError, MetadataSource};
use crate::catalog::MovieRecord;
use crate::config::MetadataConfig;

const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com";

/// OMDb API client.
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    /// Create a new OMDb client.
    pub fn new(config: &MetadataConfig) -> Result<Self, MetadataError> {
        if config.api_key.is_empty() {
            return Err(MetadataError::NotConfigured(
                "OMDb API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }
}

impl MetadataSource for OmdbClient {
    fn fetch_by_title(&self, title: &str) -> Result<MovieRecord, MetadataError> {
        debug!("OMDb lookup: title='{}'", title);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()?;

        let status = response.status();
        if status == 401 {
            return Err(MetadataError::NotConfigured(
                "Invalid OMDb API key".to_string(),
            ));
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(MetadataError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let payload: OmdbPayload = response.json().map_err(|e| {
            MetadataError::ParseError(format!("Failed to parse OMDb response: {}", e))
        })?;

        if payload.response != "True" {
            let reason = payload
                .error
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(MetadataError::NotFound(reason));
        }

        payload
            .into_record()
            .ok_or_else(|| MetadataError::ParseError("response missing Title field".to_string()))
    }
}

// ============================================================================
// OMDb API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct OmdbPayload {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Actors")]
    actors: Option<String>,
    #[serde(rename = "Released")]
    released: Option<String>,
}

impl OmdbPayload {
    /// Convert a success payload into an ingestion record.
    ///
    /// Returns `None` when the payload carries no title. "N/A" fields
    /// are treated as absent.
    fn into_record(self) -> Option<MovieRecord> {
        let title = field(self.title)?;

        Some(MovieRecord {
            title,
            director: field(self.director),
            genres: self.genre.as_deref().map(split_names).unwrap_or_default(),
            actors: self.actors.as_deref().map(split_names).unwrap_or_default(),
            release_date: field(self.released),
        })
    }
}

/// Normalize an OMDb string field: empty and "N/A" mean absent.
fn field(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != ABSENT)
}
