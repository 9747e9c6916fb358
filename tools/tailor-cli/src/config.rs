//! CLI configuration.

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tailor_commerce::bill::ShopInfo;
use tailor_observability::{LogFormat, LogLevel};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Backend API.
    #[serde(default)]
    pub api: ApiConfig,

    /// Shop details printed on slips.
    #[serde(default)]
    pub shop: ShopInfo,

    /// Local storage.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Environment-specific overrides.
    #[serde(default)]
    pub environments: HashMap<String, EnvironmentConfig>,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Get environment-specific config.
    pub fn for_environment(&self, env: &str) -> CliConfig {
        let mut config = self.clone();

        if let Some(env_config) = self.environments.get(env) {
            if let Some(ref api) = env_config.api {
                config.api = api.clone();
            }
            if let Some(ref shop) = env_config.shop {
                config.shop = shop.clone();
            }
            if let Some(ref storage) = env_config.storage {
                config.storage = storage.clone();
            }
        }

        config
    }

    /// Apply `TAILOR_*` variables from the process environment.
    pub fn apply_env_vars(&mut self, vars: impl IntoIterator<Item = (String, String)>) {
        for (key, value) in vars {
            match key.as_str() {
                "TAILOR_API_URL" => self.api.base_url = value,
                "TAILOR_DATA_DIR" => self.storage.data_dir = value,
                "TAILOR_LOG_FORMAT" => {
                    if let Ok(format) = value.parse() {
                        self.logging.format = format;
                    }
                }
                "TAILOR_LOG_LEVEL" => {
                    if let Ok(level) = value.parse() {
                        self.logging.level = level;
                    }
                }
                _ => {}
            }
        }
    }
}

/// Backend API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL every API path is joined to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Seconds before a request gives up.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Local storage settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory for the cart, session and bookings, relative to the
    /// working directory unless absolute.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    ".tailor".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Log settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    #[serde(default = "default_log_level")]
    pub level: LogLevel,
}

fn default_log_format() -> LogFormat {
    LogFormat::Human
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            level: default_log_level(),
        }
    }
}

/// Environment-specific configuration overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EnvironmentConfig {
    #[serde(default)]
    pub api: Option<ApiConfig>,
    #[serde(default)]
    pub shop: Option<ShopInfo>,
    #[serde(default)]
    pub storage: Option<StorageConfig>,
}

/// Generate a default tailor.toml config file.
pub fn generate_default_config(shop: &str) -> String {
    format!(
        r#"# Tailor shop configuration

[api]
base_url = "http://localhost:8000"
timeout_secs = 20

[shop]
name = "{shop}"
address = ""
phone = ""

[storage]
data_dir = ".tailor"

[logging]
format = "human"
level = "warn"

[environments.staging.api]
base_url = "https://staging.example.com"

[environments.production.api]
base_url = "https://api.example.com"
"#,
        shop = shop
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config("Alphasuits")).unwrap();
        assert_eq!(config.shop.name, "Alphasuits");
        assert_eq!(config.storage.data_dir, ".tailor");
        assert_eq!(config.logging.format, LogFormat::Human);
        assert_eq!(
            config.for_environment("staging").api.base_url,
            "https://staging.example.com"
        );
        assert_eq!(config.for_environment("missing").api, config.api);
    }

    #[test]
    fn test_env_vars_override() {
        let mut config = CliConfig::default();
        config.apply_env_vars([
            ("TAILOR_API_URL".to_string(), "https://shop.test".to_string()),
            ("TAILOR_LOG_LEVEL".to_string(), "debug".to_string()),
            ("TAILOR_LOG_FORMAT".to_string(), "nonsense".to_string()),
            ("HOME".to_string(), "/root".to_string()),
        ]);
        assert_eq!(config.api.base_url, "https://shop.test");
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Human);
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tailor.json");
        let path = path.to_str().unwrap();

        let mut config = CliConfig::default();
        config.shop.phone = "01-4411223".to_string();
        config.save(path).unwrap();

        assert_eq!(CliConfig::load(path).unwrap(), config);
    }
}
