//! Configuration validation rules.

use super::schema::Config;

/// Validate configuration and return aggregated validation errors.
pub fn validate_config(config: &Config) -> crate::Result<()> {
    let mut errors = Vec::new();

    if config.api.base_url.trim().is_empty() {
        errors.push("api.base_url must not be empty".to_string());
    }
    if config.api.model.trim().is_empty() {
        errors.push("api.model must not be empty".to_string());
    }
    if config.chat.sessions_file.trim().is_empty() {
        errors.push("chat.sessions_file must not be empty".to_string());
    }
    if config.chat.default_title.trim().is_empty() {
        errors.push("chat.default_title must not be empty".to_string());
    }

    const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
    if !LEVELS.contains(&config.logging.level.to_lowercase().as_str()) {
        errors.push(format!(
            "logging.level must be one of {:?}, got {:?}",
            LEVELS, config.logging.level
        ));
    }
    if !["text", "json"].contains(&config.logging.format.to_lowercase().as_str()) {
        errors.push(format!(
            "logging.format must be text or json, got {:?}",
            config.logging.format
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(crate::Error::Validation(errors.join("; ")))
    }
}
