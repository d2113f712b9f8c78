//! Configuration loading and management

use std::path::{Path, PathBuf};

use super::schema::Config;
use super::validate::validate_config;

/// Configuration loader
pub struct ConfigLoader {
    config_dir: PathBuf,
}

impl ConfigLoader {
    /// Create a new config loader with the default config directory
    pub fn new() -> Self {
        let config_dir = dirs::home_dir()
            .map(|h| h.join(".medchat"))
            .unwrap_or_else(|| PathBuf::from(".medchat"));

        Self { config_dir }
    }

    /// Create a new config loader with a custom config directory
    pub fn with_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            config_dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Load configuration from file and environment
    pub fn load(&self) -> crate::Result<Config> {
        let config_path = self.config_dir.join("config.json");

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str(&content)
                .map_err(|e| crate::Error::Config(format!("{}: {}", config_path.display(), e)))?
        } else {
            Config::default()
        };

        apply_env_overrides(&mut config);
        validate_config(&config)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, config: &Config) -> crate::Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        let config_path = self.config_dir.join("config.json");
        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Resolve the session file path against the config directory
    pub fn sessions_path(&self, config: &Config) -> PathBuf {
        let file = Path::new(&config.chat.sessions_file);
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.config_dir.join(file)
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_env_overrides(config: &mut Config) {
    // OLLAMA_HOST is the conventional variable the endpoint itself honors
    if let Ok(value) = std::env::var("OLLAMA_HOST") {
        if !value.trim().is_empty() {
            config.api.base_url = value;
        }
    }
    if let Ok(value) = std::env::var("MEDCHAT_API_BASE") {
        if !value.trim().is_empty() {
            config.api.base_url = value;
        }
    }
    if let Ok(value) = std::env::var("MEDCHAT_MODEL") {
        if !value.trim().is_empty() {
            config.api.model = value;
        }
    }
    if let Ok(value) = std::env::var("MEDCHAT_LOG_LEVEL") {
        if !value.trim().is_empty() {
            config.logging.level = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    struct EnvVarGuard {
        key: String,
        original: Option<String>,
    }

    impl EnvVarGuard {
        fn set(key: &str, value: &str) -> Self {
            let original = std::env::var(key).ok();
            std::env::set_var(key, value);
            Self {
                key: key.to_string(),
                original,
            }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            if let Some(value) = &self.original {
                std::env::set_var(&self.key, value);
            } else {
                std::env::remove_var(&self.key);
            }
        }
    }

    fn lock_env() -> MutexGuard<'static, ()> {
        ENV_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn test_load_default_config() {
        let _lock = lock_env();
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::with_dir(temp_dir.path());
        let config = loader.load().unwrap();

        assert_eq!(config.api.base_url, "http://localhost:11434");
        assert_eq!(config.chat.sessions_file, "chat_sessions.json");
    }

    #[test]
    fn test_save_and_load_config() {
        let _lock = lock_env();
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::with_dir(temp_dir.path());

        let mut config = Config::default();
        config.api.model = "test-model".to_string();

        loader.save(&config).unwrap();
        let loaded = loader.load().unwrap();

        assert_eq!(loaded.api.model, "test-model");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let _lock = lock_env();
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::with_dir(temp_dir.path());

        std::fs::write(
            temp_dir.path().join("config.json"),
            r#"{"api":{"model":"llama3.1:8b"}}"#,
        )
        .unwrap();

        let config = loader.load().unwrap();
        assert_eq!(config.api.model, "llama3.1:8b");
        assert_eq!(config.api.base_url, "http://localhost:11434");
    }

    #[test]
    fn test_env_overrides_file() {
        let _lock = lock_env();
        let _model_guard = EnvVarGuard::set("MEDCHAT_MODEL", "env-model");
        let _base_guard = EnvVarGuard::set("MEDCHAT_API_BASE", "http://10.0.0.2:11434");

        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::with_dir(temp_dir.path());

        std::fs::write(
            temp_dir.path().join("config.json"),
            r#"{"api":{"model":"file-model"}}"#,
        )
        .unwrap();

        let config = loader.load().unwrap();
        assert_eq!(config.api.model, "env-model");
        assert_eq!(config.api.base_url, "http://10.0.0.2:11434");
    }

    #[test]
    fn test_sessions_path_resolution() {
        let _lock = lock_env();
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::with_dir(temp_dir.path());
        let config = Config::default();

        let path = loader.sessions_path(&config);
        assert_eq!(path, temp_dir.path().join("chat_sessions.json"));
    }

    #[test]
    fn test_validation_rejects_blank_base_url() {
        let _lock = lock_env();
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::with_dir(temp_dir.path());

        std::fs::write(
            temp_dir.path().join("config.json"),
            r#"{"api":{"base_url":"  "}}"#,
        )
        .unwrap();

        let err = loader.load().unwrap_err();
        assert!(err.to_string().contains("api.base_url"));
    }
}
