//! Server configuration

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in {1} environment")]
    MissingSecret(&'static str, String),

    #[error("{0} must not be empty in {1} environment")]
    EmptySecret(&'static str, String),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL, e.g. `sqlite:recur.db`
    pub database_url: String,
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// HS256 secret for bearer tokens
    pub jwt_secret: String,
    pub log_level: String,
    /// Daily rolling log files go here when the directory exists
    pub log_dir: Option<String>,
    pub db_max_connections: u32,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &'static str, environment: &str) -> Result<String, ConfigError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(ConfigError::MissingSecret(name, environment.to_string()));
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(ConfigError::EmptySecret(name, environment.to_string()));
        }
        Ok(val)
    }

    fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
        match std::env::var(name) {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { name, value }),
            Err(_) => Ok(default),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let db_max_connections = Self::parse_or("DB_MAX_CONNECTIONS", 5u32)?;
        if db_max_connections == 0 {
            return Err(ConfigError::Invalid {
                name: "DB_MAX_CONNECTIONS",
                value: "0".into(),
            });
        }

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:recur.db".into()),
            http_port: Self::parse_or("HTTP_PORT", 3000)?,
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            environment,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            db_max_connections,
        })
    }
}
