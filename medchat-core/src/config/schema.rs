//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root configuration for medchat
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Completion endpoint configuration
    #[serde(default)]
    pub api: ApiConfig,
    /// Chat/session configuration
    #[serde(default)]
    pub chat: ChatConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Completion endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Ollama-style generate endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model sent with each generate request
    #[serde(default = "default_model")]
    pub model: String,
    /// Models offered by the model switcher
    #[serde(default = "default_models")]
    pub models: Vec<String>,
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "symptoma/medgemma3:27b".to_string()
}

fn default_models() -> Vec<String> {
    vec![
        "symptoma/medgemma3:27b".to_string(),
        "llama3.1:8b".to_string(),
    ]
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            models: default_models(),
        }
    }
}

/// Chat/session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Session file name, relative to the config directory unless
    /// absolute
    #[serde(default = "default_sessions_file")]
    pub sessions_file: String,
    /// Title for sessions created without one
    #[serde(default = "default_session_title")]
    pub default_title: String,
}

fn default_sessions_file() -> String {
    "chat_sessions.json".to_string()
}

fn default_session_title() -> String {
    crate::session::DEFAULT_SESSION_TITLE.to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            sessions_file: default_sessions_file(),
            default_title: default_session_title(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Directory for log files
    #[serde(default = "default_log_dir")]
    pub dir: String,
    /// Module-specific overrides
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            dir: default_log_dir(),
            overrides: HashMap::new(),
        }
    }
}
