//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::sync::LazyLock;

use crate::constants::{
    DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS, DEFAULT_DATABASE_MAX_CONNECTIONS,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_TOKEN_EXPIRY_DAYS,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub mail: MailConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    /// Deployment posture; stack traces in error bodies are suppressed
    /// when this equals "production"
    pub environment: String,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

/// Session token configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_days: i64,
}

/// Mail relay configuration
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// HTTP endpoint of the mail-relay API
    pub api_url: String,
    pub api_key: String,
    /// From address on outgoing mail
    pub from: String,
    /// Recipient of contact-form submissions
    pub contact_recipient: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            mail: MailConfig::from_env()?,
        })
    }

    /// Whether the process runs with production posture
    pub fn is_production(&self) -> bool {
        self.server.environment == "production"
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            environment: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DATABASE_MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,
            connect_timeout_secs: env::var("DATABASE_CONNECT_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_CONNECT_TIMEOUT_SECS".to_string()))?,
        })
    }
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET".to_string()))?,
            expiry_days: env::var("TOKEN_EXPIRY_DAYS")
                .unwrap_or_else(|_| DEFAULT_TOKEN_EXPIRY_DAYS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("TOKEN_EXPIRY_DAYS".to_string()))?,
        })
    }
}

impl MailConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: env::var("MAIL_API_URL").map_err(|_| ConfigError::Missing("MAIL_API_URL".to_string()))?,
            api_key: env::var("MAIL_API_KEY").map_err(|_| ConfigError::Missing("MAIL_API_KEY".to_string()))?,
            from: env::var("MAIL_FROM").map_err(|_| ConfigError::Missing("MAIL_FROM".to_string()))?,
            contact_recipient: env::var("CONTACT_RECIPIENT")
                .unwrap_or_else(|_| "support@ridetogether.app".to_string()),
        })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        // Test that defaults are applied when env vars are not set
        let server = ServerConfig {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            rust_log: "info".to_string(),
            environment: "development".to_string(),
        };
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 5000);
    }

    #[test]
    fn test_production_posture() {
        let mut config = Config {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                rust_log: "info".to_string(),
                environment: "development".to_string(),
            },
            database: DatabaseConfig {
                url: "postgres://localhost/test".to_string(),
                max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
                connect_timeout_secs: DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
            },
            jwt: JwtConfig {
                secret: "secret".to_string(),
                expiry_days: DEFAULT_TOKEN_EXPIRY_DAYS,
            },
            mail: MailConfig {
                api_url: "http://localhost:8025/send".to_string(),
                api_key: "key".to_string(),
                from: "noreply@ridetogether.app".to_string(),
                contact_recipient: "support@ridetogether.app".to_string(),
            },
        };
        assert!(!config.is_production());

        config.server.environment = "production".to_string();
        assert!(config.is_production());
    }
}
