//! Configuration module for the giftlist backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key for API authentication (required in production)
    pub api_psk: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// API key for the remote model provider
    pub model_api_key: Option<String>,
    /// Base URL of the remote model API
    pub model_base_url: String,
    /// Model identifier sent with every suggestion request
    pub model_name: String,
    /// Endpoint for fire-and-forget analytics capture (disabled when unset)
    pub analytics_endpoint: Option<String>,
    /// Project key sent with analytics events
    pub analytics_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_psk = env::var("GIFTLIST_API_PSK").ok();

        let db_path = env::var("GIFTLIST_DB_PATH")
            .unwrap_or_else(|_| "./data/app.sqlite".to_string())
            .into();

        let bind_addr = env::var("GIFTLIST_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid GIFTLIST_BIND_ADDR format");

        let log_level = env::var("GIFTLIST_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let model_api_key = env::var("OPENAI_API_KEY").ok();

        let model_base_url = env::var("GIFTLIST_MODEL_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        let model_name =
            env::var("GIFTLIST_MODEL_NAME").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let analytics_endpoint = env::var("GIFTLIST_ANALYTICS_ENDPOINT").ok();
        let analytics_api_key = env::var("GIFTLIST_ANALYTICS_API_KEY").ok();

        Self {
            api_psk,
            db_path,
            bind_addr,
            log_level,
            model_api_key,
            model_base_url,
            model_name,
            analytics_endpoint,
            analytics_api_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("GIFTLIST_API_PSK");
        env::remove_var("GIFTLIST_DB_PATH");
        env::remove_var("GIFTLIST_BIND_ADDR");
        env::remove_var("GIFTLIST_LOG_LEVEL");
        env::remove_var("OPENAI_API_KEY");
        env::remove_var("GIFTLIST_MODEL_BASE_URL");
        env::remove_var("GIFTLIST_MODEL_NAME");
        env::remove_var("GIFTLIST_ANALYTICS_ENDPOINT");
        env::remove_var("GIFTLIST_ANALYTICS_API_KEY");

        let config = Config::from_env();

        assert!(config.api_psk.is_none());
        assert_eq!(config.db_path, PathBuf::from("./data/app.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.model_base_url, "https://api.openai.com/v1");
        assert_eq!(config.model_name, "gpt-4o-mini");
        assert!(config.analytics_endpoint.is_none());
    }
}
