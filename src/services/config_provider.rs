// WebShell config provider
// Loads the immutable runtime configuration exactly once, before first use.
// The config is stored as a JSON file at the platform-specific config path.

use std::fs;
use std::path::Path;

use crate::platform;
use crate::types::config::Config;
use crate::types::errors::ConfigError;

/// Trait defining the config provider interface.
pub trait ConfigProviderTrait {
    fn load(&mut self) -> Result<Config, ConfigError>;
    fn config(&self) -> &Config;
    fn config_path(&self) -> &str;
}

/// Config provider that reads a JSON snapshot from disk.
///
/// The loaded snapshot is read-only thereafter; components receive it by
/// reference or as an owned clone, never through an ambient global.
pub struct ConfigProvider {
    config_path: String,
    config: Config,
}

impl ConfigProvider {
    /// Creates a new ConfigProvider.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses the platform-specific config directory with `shell.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => {
                let config_dir = platform::get_config_dir();
                config_dir.join("shell.json").to_string_lossy().to_string()
            }
        };

        Self {
            config_path,
            config: Config::default(),
        }
    }
}

impl ConfigProviderTrait for ConfigProvider {
    /// Loads the config from the JSON file.
    ///
    /// If the file does not exist, returns defaults.
    /// If the file exists but is malformed, returns a serialization error.
    fn load(&mut self) -> Result<Config, ConfigError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            self.config = Config::default();
            return Ok(self.config.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_json::from_str(&content).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;

        self.config = config;
        Ok(self.config.clone())
    }

    fn config(&self) -> &Config {
        &self.config
    }

    fn config_path(&self) -> &str {
        &self.config_path
    }
}
