//! Configuration module
//!
//! Application configuration loaded from environment variables, with
//! defaults suitable for local development.

use std::env;

use anyhow::Context;

// Common constants
const DEFAULT_SERVER_PORT: u16 = 3001;
const DEFAULT_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_UPLOAD_SIZE_BYTES: usize = 5 * 1024 * 1024;
const DEFAULT_UPLOAD_DIR: &str = "./uploads";
const DEFAULT_UPLOAD_BASE_URL: &str = "/files";

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    // Database
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    // Upload adapter
    pub upload_dir: String,
    pub upload_base_url: String,
    pub max_upload_size_bytes: usize,
    pub upload_allowed_extensions: Vec<String>,
    pub upload_allowed_content_types: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let database_url = env::var("DATABASE_URL")
            .context("DATABASE_URL environment variable is required")?;

        Ok(Config {
            server_port: parse_env_or("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            cors_origins: parse_env_list("CORS_ORIGINS", &["*"]),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            database_url,
            db_max_connections: parse_env_or("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            db_timeout_seconds: parse_env_or("DB_TIMEOUT_SECONDS", DEFAULT_CONNECTION_TIMEOUT_SECS)?,
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.to_string()),
            upload_base_url: env::var("UPLOAD_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_UPLOAD_BASE_URL.to_string()),
            max_upload_size_bytes: parse_env_or(
                "MAX_UPLOAD_SIZE_BYTES",
                DEFAULT_MAX_UPLOAD_SIZE_BYTES,
            )?,
            upload_allowed_extensions: parse_env_list(
                "UPLOAD_ALLOWED_EXTENSIONS",
                &["pdf", "jpg", "jpeg", "png"],
            ),
            upload_allowed_content_types: parse_env_list(
                "UPLOAD_ALLOWED_CONTENT_TYPES",
                &["application/pdf", "image/jpeg", "image/png"],
            ),
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

fn parse_env_or<T>(key: &str, default: T) -> Result<T, anyhow::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .parse::<T>()
            .with_context(|| format!("Invalid value for {}", key)),
        Err(_) => Ok(default),
    }
}

fn parse_env_list(key: &str, default: &[&str]) -> Vec<String> {
    env::var(key)
        .map(|value| {
            value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_else(|_| default.iter().map(|s| s.to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server_port: DEFAULT_SERVER_PORT,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            database_url: "postgres://localhost/casfos_test".to_string(),
            db_max_connections: DEFAULT_MAX_CONNECTIONS,
            db_timeout_seconds: DEFAULT_CONNECTION_TIMEOUT_SECS,
            upload_dir: DEFAULT_UPLOAD_DIR.to_string(),
            upload_base_url: DEFAULT_UPLOAD_BASE_URL.to_string(),
            max_upload_size_bytes: DEFAULT_MAX_UPLOAD_SIZE_BYTES,
            upload_allowed_extensions: vec![
                "pdf".to_string(),
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
            ],
            upload_allowed_content_types: vec![
                "application/pdf".to_string(),
                "image/jpeg".to_string(),
                "image/png".to_string(),
            ],
        }
    }

    #[test]
    fn test_is_production() {
        let mut config = test_config();
        assert!(!config.is_production());

        config.environment = "production".to_string();
        assert!(config.is_production());

        config.environment = "PROD".to_string();
        assert!(config.is_production());
    }

    #[test]
    fn test_default_upload_limits() {
        let config = test_config();
        assert_eq!(config.max_upload_size_bytes, 5 * 1024 * 1024);
        assert!(config
            .upload_allowed_content_types
            .contains(&"application/pdf".to_string()));
        assert!(config
            .upload_allowed_extensions
            .contains(&"jpeg".to_string()));
    }
}
