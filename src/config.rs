//! Process-wide configuration
//!
//! Loaded once at startup and passed explicitly into the services that need
//! it. Business logic never reads the environment itself.

use std::fmt;

use thiserror::Error;
use zeroize::Zeroizing;

/// Default bind host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port
pub const DEFAULT_PORT: u16 = 5000;

/// Default SQLite database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite://./goalsetter.db";

/// `DATABASE_URL` value selecting the in-process stores
pub const MEMORY_DATABASE_URL: &str = "memory";

/// Default bcrypt work factor
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Work factor range accepted by bcrypt
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// Default session token lifetime in days
pub const DEFAULT_TOKEN_EXPIRY_DAYS: u32 = 30;

/// Longest accepted token lifetime (ten years)
pub const MAX_TOKEN_EXPIRY_DAYS: u32 = 3650;

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET is not set or is empty")]
    MissingSecret,

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    /// Token signing secret
    pub jwt_secret: Zeroizing<String>,
    pub host: String,
    pub port: u16,
    /// SQLite URL, or [`MEMORY_DATABASE_URL`]
    pub database_url: String,
    pub bcrypt_cost: u32,
    pub token_expiry_days: u32,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("jwt_secret", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("token_expiry_days", &self.token_expiry_days)
            .finish()
    }
}

impl AppConfig {
    /// Build a config with defaults for everything except the secret.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: Zeroizing::new(secret.into()),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            token_expiry_days: DEFAULT_TOKEN_EXPIRY_DAYS,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// [`ConfigError::MissingSecret`] when `JWT_SECRET` is absent or blank,
    /// [`ConfigError::Invalid`] when a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingSecret)?;

        let mut config = Self::with_secret(secret);

        if let Some(host) = lookup("HOST").filter(|s| !s.trim().is_empty()) {
            config.host = host;
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty()) {
            config.database_url = url;
        }
        config.port = parse_var(&lookup, "PORT", DEFAULT_PORT)?;
        config.bcrypt_cost = parse_var(&lookup, "BCRYPT_COST", DEFAULT_BCRYPT_COST)?;
        config.token_expiry_days =
            parse_var(&lookup, "TOKEN_EXPIRY_DAYS", DEFAULT_TOKEN_EXPIRY_DAYS)?;

        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&config.bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                value: config.bcrypt_cost.to_string(),
            });
        }
        if !(1..=MAX_TOKEN_EXPIRY_DAYS).contains(&config.token_expiry_days) {
            return Err(ConfigError::Invalid {
                key: "TOKEN_EXPIRY_DAYS",
                value: config.token_expiry_days.to_string(),
            });
        }

        Ok(config)
    }

    /// Whether the in-process stores were requested
    pub fn uses_memory_storage(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }

    /// `host:port` bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
