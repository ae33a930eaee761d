use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub artifacts: ArtifactConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactConfig {
    /// Wastage bundle path: a single JSON file holding {model, scaler, metadata}
    #[serde(default = "default_wastage_path")]
    pub wastage_path: String,
    /// Claims model path: a bare serialized predictor
    #[serde(default = "default_claims_path")]
    pub claims_path: String,
}

fn default_wastage_path() -> String {
    "models/wastage_bundle.json".to_string()
}

fn default_claims_path() -> String {
    "models/claims_model.json".to_string()
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            wastage_path: default_wastage_path(),
            claims_path: default_claims_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP API
    #[serde(default = "default_host")]
    pub host: String,
    /// HTTP API port (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Start with default values
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("artifacts.wastage_path", default_wastage_path())?
            .set_default("artifacts.claims_path", default_claims_path())?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("FOODCAST_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (FOODCAST_SERVER__PORT, etc.)
            .add_source(
                Environment::with_prefix("FOODCAST")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.artifacts.wastage_path.trim().is_empty() {
            errors.push("artifacts.wastage_path must not be empty".to_string());
        }

        if self.artifacts.claims_path.trim().is_empty() {
            errors.push("artifacts.claims_path must not be empty".to_string());
        }

        if self.server.host.trim().is_empty() {
            errors.push("server.host must not be empty".to_string());
        }

        if self.server.port == 0 {
            errors.push("server.port must be non-zero".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config_files() {
        let config = AppConfig::load_from("/nonexistent").expect("defaults should load");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.artifacts.wastage_path, "models/wastage_bundle.json");
        assert_eq!(config.artifacts.claims_path, "models/claims_model.json");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_paths() {
        let mut config = AppConfig::load_from("/nonexistent").unwrap();
        config.artifacts.wastage_path = " ".to_string();
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("wastage_path")));
    }
}
