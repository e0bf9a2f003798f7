//! Configuration management for the events service.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgSslMode;

use crate::{Error, Result};

/// Logging profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    /// Human-readable output, debug level
    Local,
    /// JSON output, debug level
    Dev,
    /// JSON output, info level
    Prod,
}

impl FromStr for AppEnv {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "local" => Ok(AppEnv::Local),
            "dev" => Ok(AppEnv::Dev),
            "prod" => Ok(AppEnv::Prod),
            other => Err(Error::Config(format!("unknown APP_ENV {other:?}"))),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub address: SocketAddr,
    /// Upper bound on a single request, storage call included
    pub timeout: Duration,
    /// How long a request body may stall before the connection is dropped
    pub idle_timeout: Duration,
    /// Drain window for in-flight requests on shutdown
    pub shutdown_grace: Duration,
}

/// Database connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: PgSslMode,
    pub max_connections: u32,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub env: AppEnv,
    pub http: HttpConfig,
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let http = HttpConfig {
            address: parse(&var("HTTP_ADDRESS", "0.0.0.0:8080"), "HTTP_ADDRESS")?,
            timeout: secs(&var("HTTP_TIMEOUT_SECS", "4"), "HTTP_TIMEOUT_SECS")?,
            idle_timeout: secs(&var("HTTP_IDLE_TIMEOUT_SECS", "60"), "HTTP_IDLE_TIMEOUT_SECS")?,
            shutdown_grace: secs(&var("SHUTDOWN_GRACE_SECS", "10"), "SHUTDOWN_GRACE_SECS")?,
        };

        let database = DatabaseConfig {
            host: var("DB_HOST", "localhost"),
            port: parse(&var("DB_PORT", "5432"), "DB_PORT")?,
            user: var("DB_USER", "postgres"),
            password: lookup("DB_PASSWORD")
                .ok_or_else(|| Error::Config("DB_PASSWORD not set".to_string()))?,
            name: var("DB_NAME", "events_service"),
            ssl_mode: var("DB_SSLMODE", "disable")
                .parse()
                .map_err(|e| Error::Config(format!("DB_SSLMODE: {e}")))?,
            max_connections: parse(&var("DB_MAX_CONNECTIONS", "5"), "DB_MAX_CONNECTIONS")?,
        };

        Ok(Self {
            env: var("APP_ENV", "local").parse()?,
            http,
            database,
        })
    }
}

fn parse<T>(raw: &str, key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|e| Error::Config(format!("{key}={raw:?}: {e}")))
}

fn secs(raw: &str, key: &str) -> Result<Duration> {
    parse::<u64>(raw, key).map(Duration::from_secs)
}
