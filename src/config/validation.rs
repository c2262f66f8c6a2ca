use crate::config::types::{
    Config, FetcherConfig, HistoryConfig, MarketplaceConfig, ServerConfig, StorageConfig,
};
use crate::ConfigError;
use std::net::SocketAddr;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_server_config(&config.server)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_storage_config(&config.storage)?;
    validate_history_config(&config.history)?;
    validate_marketplace_config(&config.marketplace)?;
    Ok(())
}

/// Validates server configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config.bind_address.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!(
            "bind_address '{}' is not a socket address: {}",
            config.bind_address, e
        ))
    })?;

    if config.static_dir.is_empty() {
        return Err(ConfigError::Validation(
            "static_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.timeout_ms < 100 || config.timeout_ms > 120_000 {
        return Err(ConfigError::Validation(format!(
            "timeout_ms must be between 100 and 120000, got {}",
            config.timeout_ms
        )));
    }

    for (name, value) in [
        ("user_agent", &config.user_agent),
        ("accept", &config.accept),
        ("accept_language", &config.accept_language),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }

    Ok(())
}

/// Validates storage configuration
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_history_config(config: &HistoryConfig) -> Result<(), ConfigError> {
    if config.default_limit < 1 || config.default_limit > 1000 {
        return Err(ConfigError::Validation(format!(
            "default_limit must be between 1 and 1000, got {}",
            config.default_limit
        )));
    }

    Ok(())
}

/// Validates the marketplace host (a bare host name, no scheme or path)
fn validate_marketplace_config(config: &MarketplaceConfig) -> Result<(), ConfigError> {
    let host = &config.host;

    if host.is_empty() {
        return Err(ConfigError::Validation(
            "marketplace host cannot be empty".to_string(),
        ));
    }

    if host.contains("://") || host.contains('/') {
        return Err(ConfigError::Validation(format!(
            "marketplace host '{}' must not contain a scheme or path",
            host
        )));
    }

    if !host.chars().all(|c| c.is_alphanumeric() || c == '.' || c == '-') {
        return Err(ConfigError::Validation(format!(
            "marketplace host '{}' contains invalid characters",
            host
        )));
    }

    Ok(())
}
