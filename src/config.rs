use std::env;

use serde::Deserialize;

use crate::services::notification_cooldown::DEFAULT_COOLDOWN_MINUTES;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub notifications: NotificationConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origin (the mobile web build / dev server).
    pub frontend_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Cooldown window used when a caller does not pass one.
    /// Read from env var `NOTIFICATION_COOLDOWN_MINUTES`; must be finite and positive.
    pub cooldown_minutes: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
    /// Page size when the request omits `limit`.
    pub default_limit: i64,
    /// Upper bound for `limit`.
    pub max_limit: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let cooldown_minutes: f64 = env::var("NOTIFICATION_COOLDOWN_MINUTES")
            .unwrap_or_else(|_| DEFAULT_COOLDOWN_MINUTES.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("NOTIFICATION_COOLDOWN_MINUTES".to_string()))?;
        if !cooldown_minutes.is_finite() || cooldown_minutes <= 0.0 {
            return Err(ConfigError::InvalidValue(
                "NOTIFICATION_COOLDOWN_MINUTES".to_string(),
            ));
        }

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,
                frontend_url: env::var("FRONTEND_URL")
                    .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite://data/feedverse.db".to_string()),
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .unwrap_or(5),
            },
            notifications: NotificationConfig { cooldown_minutes },
            pagination: PaginationConfig {
                default_limit: env::var("PAGINATION_DEFAULT_LIMIT")
                    .unwrap_or_else(|_| "20".to_string())
                    .parse()
                    .unwrap_or(20),
                max_limit: env::var("PAGINATION_MAX_LIMIT")
                    .unwrap_or_else(|_| "100".to_string())
                    .parse()
                    .unwrap_or(100),
            },
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                frontend_url: "http://localhost:3000".to_string(),
            },
            database: DatabaseConfig {
                url: "sqlite://data/feedverse.db".to_string(),
                max_connections: 5,
            },
            notifications: NotificationConfig {
                cooldown_minutes: DEFAULT_COOLDOWN_MINUTES,
            },
            pagination: PaginationConfig {
                default_limit: 20,
                max_limit: 100,
            },
        }
    }
}
