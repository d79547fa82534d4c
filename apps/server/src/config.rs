//! Server configuration, loaded from environment variables with
//! fallback to defaults.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port (`HTTP_PORT`, default 8080).
    pub http_port: u16,

    /// SQLite database file (`DATABASE_PATH`, default `storefront.db`).
    pub database_path: PathBuf,
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {0}")]
    InvalidValue(&'static str),
}

impl ServerConfig {
    /// Loads configuration from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(ServerConfig {
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_owned())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT"))?,
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "storefront.db".to_owned())
                .into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_env() {
        // Only checks the defaults; the test runner environment does not
        // set these variables.
        let config = ServerConfig::load().unwrap();
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.database_path, PathBuf::from("storefront.db"));
    }
}
