use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Database path is not empty
/// - Metadata section, when present, has a key and a nonzero timeout
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.database.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "database.path cannot be empty".to_string(),
        ));
    }

    if let Some(metadata) = &config.metadata {
        if metadata.api_key.is_empty() {
            return Err(ConfigError::ValidationError(
                "metadata.api_key cannot be empty".to_string(),
            ));
        }
        if metadata.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "metadata.timeout_secs cannot be 0".to_string(),
            ));
        }
    }

    Ok(())
}
