use crate::config::types::{Config, CrawlerConfig, OutputConfig, ServerConfig};
use crate::crawler::is_valid_tag_name;
use crate::ConfigError;
use std::net::SocketAddr;

const MAX_UPLOAD_CEILING: usize = 256 * 1024 * 1024;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_server_config(&config.server)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates server configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config
        .bind_address
        .parse::<SocketAddr>()
        .map_err(|e| ConfigError::InvalidAddress(format!("'{}': {}", config.bind_address, e)))?;

    if config.max_upload_bytes < 1 || config.max_upload_bytes > MAX_UPLOAD_CEILING {
        return Err(ConfigError::Validation(format!(
            "max_upload_bytes must be between 1 and {}, got {}",
            MAX_UPLOAD_CEILING, config.max_upload_bytes
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.fetch_timeout_secs < 1 || config.fetch_timeout_secs > 120 {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout_secs must be between 1 and 120, got {}",
            config.fetch_timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.default_tags.is_empty() {
        return Err(ConfigError::Validation(
            "default_tags must name at least one tag".to_string(),
        ));
    }

    for tag in &config.default_tags {
        validate_tag_name(tag)?;
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.filename_prefix.is_empty() {
        return Err(ConfigError::Validation(
            "filename_prefix cannot be empty".to_string(),
        ));
    }

    if !config
        .filename_prefix
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "filename_prefix must contain only alphanumeric characters, '-' or '_', got '{}'",
            config.filename_prefix
        )));
    }

    Ok(())
}

/// Validates a default tag name (no selector syntax)
fn validate_tag_name(tag: &str) -> Result<(), ConfigError> {
    if !is_valid_tag_name(tag) {
        return Err(ConfigError::Validation(format!(
            "default tag '{}' is not a plain tag name",
            tag
        )));
    }

    Ok(())
}
