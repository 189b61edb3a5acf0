//! Application configuration loaded from environment variables.

use std::env;

use blog_infra::{DatabaseConfig, JwtConfig};

/// Application configuration. Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = DatabaseConfig::default();
        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").unwrap_or(defaults.url),
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_connections),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.min_connections),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            jwt: JwtConfig::from_env(),
        }
    }
}
