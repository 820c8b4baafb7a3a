//! Configuration module for the SAR backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::models::AdminCredentials;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite cache file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Artificial delay applied by the static reference feed
    pub feed_delay: Duration,
    /// Built-in admin credential pair; a persisted override takes precedence
    pub default_credentials: AdminCredentials,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("SAR_DB_PATH")
            .unwrap_or_else(|_| "./data/sar.sqlite".to_string())
            .into();

        let bind_addr = env::var("SAR_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid SAR_BIND_ADDR format");

        let log_level = env::var("SAR_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let feed_delay_ms = env::var("SAR_FEED_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(500);

        let defaults = AdminCredentials::default();
        let default_credentials = AdminCredentials::new(
            env::var("SAR_ADMIN_USERNAME").unwrap_or(defaults.username),
            env::var("SAR_ADMIN_PASSWORD").unwrap_or(defaults.password),
        );

        Self {
            db_path,
            bind_addr,
            log_level,
            feed_delay: Duration::from_millis(feed_delay_ms),
            default_credentials,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("SAR_DB_PATH");
        env::remove_var("SAR_BIND_ADDR");
        env::remove_var("SAR_LOG_LEVEL");
        env::remove_var("SAR_FEED_DELAY_MS");
        env::remove_var("SAR_ADMIN_USERNAME");
        env::remove_var("SAR_ADMIN_PASSWORD");

        let config = Config::from_env();

        assert_eq!(config.db_path, PathBuf::from("./data/sar.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.feed_delay, Duration::from_millis(500));
        assert_eq!(config.default_credentials, AdminCredentials::default());
    }
}
