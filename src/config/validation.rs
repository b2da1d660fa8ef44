//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use regex::Regex;

use super::Settings;
use crate::utils::errors::{BotError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_bot_config(&settings.bot)?;
    validate_database_config(&settings.database)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate HTTP server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(BotError::Config("Server host is required".to_string()));
    }

    if config.port == 0 {
        return Err(BotError::Config("Server port must be greater than 0".to_string()));
    }

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(BotError::Config("Bot token is required".to_string()));
    }

    let token_shape = Regex::new(r"^\d+:[A-Za-z0-9_-]+$")?;
    if !token_shape.is_match(&config.token) {
        return Err(BotError::Config(
            "Bot token must look like <bot id>:<secret>".to_string(),
        ));
    }

    if let Some(ref webhook_url) = config.webhook_url {
        validate_http_url("Webhook URL", webhook_url)?;
    }

    if let Some(ref api_url) = config.api_url {
        validate_http_url("Bot API URL", api_url)?;
    }

    // Telegram accepts 1-256 characters from this set for secret_token
    if let Some(ref secret) = config.webhook_secret {
        let secret_shape = Regex::new(r"^[A-Za-z0-9_-]{1,256}$")?;
        if !secret_shape.is_match(secret) {
            return Err(BotError::Config(
                "Webhook secret must be 1-256 characters of A-Z, a-z, 0-9, _ and -".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_http_url(label: &str, value: &str) -> Result<()> {
    let url = url::Url::parse(value)?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(BotError::Config(format!(
            "{} must use http or https, got '{}'",
            label, other
        ))),
    }
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(BotError::Config("Database URL is required".to_string()));
    }

    if config.max_connections == 0 {
        return Err(BotError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(BotError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(BotError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(BotError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}
