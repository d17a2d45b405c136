//! Configuration management
//!
//! This module handles loading and parsing configuration for the Newsdesk
//! content system. Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults.

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Administrator bootstrap defaults
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database driver (sqlite or mysql)
    #[serde(default)]
    pub driver: DatabaseDriver,
    /// Database connection URL
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: DatabaseDriver::default(),
            url: default_database_url(),
        }
    }
}

fn default_database_url() -> String {
    "data/newsdesk.db".to_string()
}

/// Database driver type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseDriver {
    /// SQLite (default)
    #[default]
    Sqlite,
    /// MySQL
    Mysql,
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache TTL in seconds
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u64,
    /// Maximum number of cached entries
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl(),
            max_entries: default_max_entries(),
        }
    }
}

fn default_ttl() -> u64 {
    3600
}

fn default_max_entries() -> u64 {
    10_000
}

/// Administrator bootstrap defaults
///
/// Used by the `create-admin` binary when no explicit values are supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Admin email address
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    /// Admin username
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    /// Admin display name
    #[serde(default = "default_admin_name")]
    pub admin_name: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            admin_email: default_admin_email(),
            admin_username: default_admin_username(),
            admin_name: default_admin_name(),
        }
    }
}

fn default_admin_email() -> String {
    "admin@yourdomain.com".to_string()
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_name() -> String {
    "System Administrator".to_string()
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        // Handle empty file - return defaults
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: format_yaml_error(&e),
        })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables follow the pattern:
    /// - NEWSDESK_DATABASE_DRIVER
    /// - NEWSDESK_DATABASE_URL
    /// - NEWSDESK_CACHE_TTL_SECONDS
    /// - NEWSDESK_CACHE_MAX_ENTRIES
    /// - NEWSDESK_ADMIN_EMAIL
    /// - NEWSDESK_ADMIN_USERNAME
    /// - NEWSDESK_ADMIN_NAME
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        if let Ok(driver) = std::env::var("NEWSDESK_DATABASE_DRIVER") {
            match driver.to_lowercase().as_str() {
                "sqlite" => self.database.driver = DatabaseDriver::Sqlite,
                "mysql" => self.database.driver = DatabaseDriver::Mysql,
                _ => {} // Ignore invalid values
            }
        }
        if let Ok(url) = std::env::var("NEWSDESK_DATABASE_URL") {
            self.database.url = url;
        }

        if let Ok(ttl) = std::env::var("NEWSDESK_CACHE_TTL_SECONDS") {
            if let Ok(ttl) = ttl.parse::<u64>() {
                self.cache.ttl_seconds = ttl;
            }
        }
        if let Ok(max_entries) = std::env::var("NEWSDESK_CACHE_MAX_ENTRIES") {
            if let Ok(max_entries) = max_entries.parse::<u64>() {
                self.cache.max_entries = max_entries;
            }
        }

        if let Ok(email) = std::env::var("NEWSDESK_ADMIN_EMAIL") {
            self.bootstrap.admin_email = email;
        }
        if let Ok(username) = std::env::var("NEWSDESK_ADMIN_USERNAME") {
            self.bootstrap.admin_username = username;
        }
        if let Ok(name) = std::env::var("NEWSDESK_ADMIN_NAME") {
            self.bootstrap.admin_name = name;
        }
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for all config tests that modify environment variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        CONFIG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let path = std::path::Path::new("nonexistent_config.yml");
        let config = Config::load(path).unwrap();

        assert_eq!(config.database.driver, DatabaseDriver::Sqlite);
        assert_eq!(config.database.url, "data/newsdesk.db");
        assert_eq!(config.cache.ttl_seconds, 3600);
        assert_eq!(config.bootstrap.admin_username, "admin");
    }

    #[test]
    fn test_load_empty_file_returns_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "").unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.database.driver, DatabaseDriver::Sqlite);
        assert_eq!(config.cache.max_entries, 10_000);
    }

    #[test]
    fn test_load_partial_config_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "database:\n  url: \"custom/news.db\"\n").unwrap();

        let config = Config::load(file.path()).unwrap();

        // Specified value
        assert_eq!(config.database.url, "custom/news.db");
        // Default values
        assert_eq!(config.database.driver, DatabaseDriver::Sqlite);
        assert_eq!(config.cache.ttl_seconds, 3600);
    }

    #[test]
    fn test_load_invalid_yaml_reports_location() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "database:\n  url: [unclosed\n").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_env_overrides() {
        let _guard = lock_env();
        std::env::set_var("NEWSDESK_DATABASE_DRIVER", "mysql");
        std::env::set_var("NEWSDESK_DATABASE_URL", "mysql://localhost/news");
        std::env::set_var("NEWSDESK_ADMIN_EMAIL", "root@example.com");

        let config =
            Config::load_with_env(std::path::Path::new("nonexistent_config.yml")).unwrap();

        assert_eq!(config.database.driver, DatabaseDriver::Mysql);
        assert_eq!(config.database.url, "mysql://localhost/news");
        assert_eq!(config.bootstrap.admin_email, "root@example.com");

        std::env::remove_var("NEWSDESK_DATABASE_DRIVER");
        std::env::remove_var("NEWSDESK_DATABASE_URL");
        std::env::remove_var("NEWSDESK_ADMIN_EMAIL");
    }

    #[test]
    fn test_env_invalid_driver_ignored() {
        let _guard = lock_env();
        std::env::set_var("NEWSDESK_DATABASE_DRIVER", "postgres");

        let config =
            Config::load_with_env(std::path::Path::new("nonexistent_config.yml")).unwrap();
        assert_eq!(config.database.driver, DatabaseDriver::Sqlite);

        std::env::remove_var("NEWSDESK_DATABASE_DRIVER");
    }
}
