use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Metadata source configuration; without it the catalogue works
    /// but nothing new can be fetched.
    #[serde(default)]
    pub metadata: Option<MetadataConfig>,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("marquee.db")
}

/// Metadata source (OMDb) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetadataConfig {
    /// OMDb API key
    pub api_key: String,
    /// Base URL override (default: https://www.omdbapi.com)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

/// Sanitized config for display (API key redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub database: DatabaseConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SanitizedMetadataConfig>,
}

/// Sanitized metadata config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedMetadataConfig {
    pub api_key_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            database: config.database.clone(),
            metadata: config.metadata.as_ref().map(|m| SanitizedMetadataConfig {
                api_key_configured: !m.api_key.is_empty(),
                base_url: m.base_url.clone(),
                timeout_secs: m.timeout_secs,
            }),
        }
    }
}
