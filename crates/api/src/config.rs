//! Environment-driven server configuration.

use std::str::FromStr;

use axum::http::HeaderValue;

/// Default allowed origin (the local frontend dev server).
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173";

/// Invalid or missing configuration, reported at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
///
/// All fields except `database_url` have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins, validated as header values.
    pub cors_origins: Vec<HeaderValue>,
    pub request_timeout_secs: u64,
    /// Seconds to wait for in-flight requests after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    pub database_url: String,
    pub db_max_connections: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                    |
    /// | `DATABASE_URL`          | (required)              |
    /// | `DB_MAX_CONNECTIONS`    | `20`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let origins =
            std::env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string());

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_or("PORT", 3000)?,
            cors_origins: parse_origins(&origins)?,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30)?,
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", 30)?,
            database_url,
            db_max_connections: env_or("DB_MAX_CONNECTIONS", prodrank_db::DEFAULT_MAX_CONNECTIONS)?,
        })
    }
}

/// Read and parse `var`, falling back to `default` when unset.
fn env_or<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigError::Invalid {
                var: "CORS_ORIGINS",
                value: origin.to_string(),
            })
        })
        .collect()
}
