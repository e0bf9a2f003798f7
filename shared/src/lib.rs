//! Shared library for the events service.
//!
//! This crate provides the domain model, configuration, error taxonomy and the
//! PostgreSQL storage gateway used by the HTTP handlers.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod storage;

pub use config::{AppEnv, Config, DatabaseConfig, HttpConfig};
pub use error::{Error, Result};
pub use models::{Event, EventId, EventView, UserId};
pub use storage::PgStorage;

/// Minimal schema the storage gateway expects.
pub const SCHEMA: &str = include_str!("../sql/schema.sql");
