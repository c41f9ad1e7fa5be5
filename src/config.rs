//! Configuration management for the web finder
//!
//! Values come from built-in defaults, an optional `config.toml`, and
//! `FINDER_`-prefixed environment variables, in increasing priority.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Complete server configuration. Every value requires a restart.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// IP address the HTTP listener binds to
    /// Environment: FINDER_BIND_ADDRESS
    pub bind_address: String,

    /// Port of the HTTP listener
    /// Environment: FINDER_HTTP_PORT
    pub http_port: u16,

    /// Directory holding content files named by identifier. Wiped on start.
    pub data_dir: String,

    /// Directory receiving downloaded copies. Wiped on start.
    pub download_dir: String,

    /// Maximum upload request size in MB
    pub max_file_size_mb: u64,

    /// Populate the demo folders and files on start
    pub seed_demo_tree: bool,
}

impl ServerConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        // Docker layout first, then the working directory
        let config_paths = ["web-finder/config", "config"];

        let mut builder = Config::builder()
            .set_default("bind_address", "127.0.0.1")?
            .set_default("http_port", 8080_i64)?
            .set_default("data_dir", "./data")?
            .set_default("download_dir", "./download")?
            .set_default("max_file_size_mb", 10_i64)?
            .set_default("seed_demo_tree", true)?;

        for config_path in config_paths {
            builder = builder.add_source(File::with_name(config_path).required(false));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix("FINDER")
                    .prefix_separator("_")
                    .try_parsing(true),
            )
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.http_port == 0 {
            return Err(config::ConfigError::Message("http_port cannot be 0".into()));
        }

        if self.data_dir.is_empty() || self.download_dir.is_empty() {
            return Err(config::ConfigError::Message(
                "data_dir and download_dir cannot be empty".into(),
            ));
        }

        if self.data_path() == self.download_path() {
            return Err(config::ConfigError::Message(
                "data_dir and download_dir must differ".into(),
            ));
        }

        if self.max_file_size_mb == 0 {
            return Err(config::ConfigError::Message(
                "max_file_size_mb must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get bind address and port as socket address
    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.http_port)
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn download_path(&self) -> PathBuf {
        PathBuf::from(&self.download_dir)
    }

    /// Get maximum upload size in bytes
    pub fn max_file_size_bytes(&self) -> usize {
        (self.max_file_size_mb as usize) * 1024 * 1024
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            http_port: 8080,
            data_dir: "./data".to_string(),
            download_dir: "./download".to_string(),
            max_file_size_mb: 10,
            seed_demo_tree: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.socket_address(), "127.0.0.1:8080");
        assert_eq!(config.max_file_size_bytes(), 10 * 1024 * 1024);
    }

    #[test]
    fn zero_port_and_zero_limit_are_rejected() {
        let config = ServerConfig {
            http_port: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ServerConfig {
            max_file_size_mb: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn shared_directories_are_rejected() {
        let config = ServerConfig {
            download_dir: "./data".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ServerConfig {
            data_dir: String::new(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
