use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path, time::Duration};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid environment variable {name}: {reason}")]
    Env { name: &'static str, reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub port: u16,
    /// `development` enables error details in API responses
    pub environment: String,
    /// Maximum accepted request body, in bytes
    pub max_upload_size: usize,
    pub translation: TranslationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub primary: PrimaryProviderConfig,
    pub secondary: SecondaryProviderConfig,
    #[serde(with = "humantime_serde")]
    pub mock_delay: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryProviderConfig {
    pub base_url: String,
    pub contact_email: String,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Characters sent upstream, the rest is cut off
    pub max_text_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecondaryProviderConfig {
    pub base_url: String,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            environment: "production".to_string(),
            max_upload_size: 10 * 1024 * 1024,
            translation: TranslationConfig::default(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            primary: PrimaryProviderConfig::default(),
            secondary: SecondaryProviderConfig::default(),
            mock_delay: Duration::from_millis(500),
        }
    }
}

impl Default for PrimaryProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.mymemory.translated.net/get".to_string(),
            contact_email: "translation-gateway@example.com".to_string(),
            timeout: Duration::from_secs(10),
            max_text_length: 5000,
        }
    }
}

impl Default for SecondaryProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://translate.googleapis.com/translate_a/single".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }
}

fn read_config(path: &str) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&contents)?)
}

/// `PORT` and `APP_ENV` win over whatever the config file says.
fn apply_overrides(
    mut config: Config,
    port: Option<String>,
    environment: Option<String>,
) -> Result<Config, ConfigError> {
    if let Some(port) = port {
        config.port = port.parse::<u16>().map_err(|e| ConfigError::Env {
            name: "PORT",
            reason: e.to_string(),
        })?;
    }

    if let Some(environment) = environment {
        config.environment = environment;
    }

    Ok(config)
}

fn read_config_file() -> Result<Config, ConfigError> {
    // Retrieve env variable
    let config_path = env::var("GATEWAY_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        return read_config(&config_path);
    }

    // Fallback to config.yaml
    if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        return read_config("config.yaml");
    }

    // Fallback to config.example.yaml
    if Path::new("config.example.yaml").exists() {
        tracing::warn!(
            "Config file '{}' and 'config.yaml' not found, falling back to 'config.example.yaml'",
            config_path
        );
        return read_config("config.example.yaml");
    }

    tracing::info!("No config file found, using defaults");
    Ok(Config::default())
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config = read_config_file()?;
    apply_overrides(config, env::var("PORT").ok(), env::var("APP_ENV").ok())
}
