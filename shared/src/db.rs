//! Database connection management.

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::{Error, Result};

/// Create a database connection pool and make sure the server answers.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name)
        .ssl_mode(config.ssl_mode);

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(options)
        .await
        .map_err(Error::database("db.connect"))?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .map_err(Error::database("db.ping"))?;

    Ok(pool)
}
