use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

const CONFIG_FILE: &str = "gradebook.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            database: DatabaseConfig {
                url: "sqlite://gradebook.db".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional gradebook.toml and
    /// GRADEBOOK_-prefixed environment variables, in increasing precedence.
    pub fn load() -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));
        if std::path::Path::new(CONFIG_FILE).exists() {
            figment = figment.merge(Toml::file(CONFIG_FILE));
        }
        figment
            .merge(Env::prefixed("GRADEBOOK_").split("__"))
            .extract()
            .map_err(|e| AppError::ConfigError(format!("Failed to load configuration: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.http.port, 5000);
        assert_eq!(config.database.url, "sqlite://gradebook.db");
    }

    #[test]
    fn test_load_config_defaults() {
        let config = AppConfig::load().unwrap();
        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.http.port, 5000);
    }
}
