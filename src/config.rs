use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};
use dotenvy::dotenv;

/// The punch limiter is opt-in; many clients can share one peer IP behind a proxy.
pub const DEFAULT_RATE_PUNCH_PER_MIN: u32 = 0;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,

    // Rate limiting, 0 disables it
    pub rate_punch_per_min: u32,

    pub log_dir: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 5000)?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://database.db".to_string()),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 5)?,
            rate_punch_per_min: parse_var("RATE_PUNCH_PER_MIN", DEFAULT_RATE_PUNCH_PER_MIN)?,
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a number, got {raw:?}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// In-memory database, limiter off.
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_url: "sqlite::memory:".to_string(),
            db_max_connections: 1,
            rate_punch_per_min: 0,
            log_dir: "logs".to_string(),
            log_level: "debug".to_string(),
        }
    }
}
