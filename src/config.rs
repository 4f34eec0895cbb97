//! Configuration module
//!
//! TOML file at `~/.config/salestrack/config.toml` by default, overridable
//! via the `SALESTRACK_CONFIG` environment variable. Every section has
//! working defaults so the service starts without a file.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub store: StoreConfig,
    pub security: SecurityConfig,
    pub admin: AdminConfig,
}

/// HTTP server listen address.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter; `RUST_LOG` takes precedence when set.
    pub level: String,
}

/// Locations of the flat-file record stores.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub users_file: PathBuf,
    pub sales_file: PathBuf,
}

/// Credential-policy knobs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Minimum accepted password length, in characters.
    pub min_password_length: usize,
    /// bcrypt cost factor for newly stored hashes.
    pub bcrypt_cost: u32,
}

/// Bootstrap admin account, seeded when the user store does not exist yet.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            users_file: PathBuf::from("users.csv"),
            sales_file: PathBuf::from("sales_data.csv"),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            min_password_length: 5,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "changeme".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Default config location: `~/.config/salestrack/config.toml`.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("salestrack")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.address(), "0.0.0.0:8080");
        assert_eq!(cfg.security.min_password_length, 5);
        assert_eq!(cfg.store.users_file, PathBuf::from("users.csv"));
        assert_eq!(cfg.admin.username, "admin");
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9100

            [security]
            min_password_length = 8
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.security.min_password_length, 8);
        assert_eq!(cfg.security.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(cfg.logging.level, "info");
    }
}
