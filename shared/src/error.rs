//! Error types for the events service.

use thiserror::Error;

use crate::models::UserId;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while serving an events request.
#[derive(Error, Debug)]
pub enum Error {
    /// Request body is not valid JSON for the operation
    #[error("Decode error: {0}")]
    Decode(String),

    /// Required field missing or zero-valued
    #[error("Validation error: {0}")]
    Validation(String),

    /// Date not in `YYYY-MM-DD` form
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Owning user does not exist
    #[error("User {0} not found")]
    UserNotFound(UserId),

    /// No event matched the (event, owner) pair
    #[error("Event not found")]
    EventNotFound,

    /// Reserved for uniqueness constraints on events
    #[error("Event already exists")]
    EventAlreadyExists,

    /// Database error, tagged with the storage operation that failed
    #[error("Database error in {op}: {source}")]
    Database {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Wrap a driver error with the operation it came from.
    pub fn database(op: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Error::Database { op, source }
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Decode(_) | Error::Validation(_) | Error::InvalidDate(_) => 400,
            Error::UserNotFound(_) | Error::EventNotFound => 404,
            Error::EventAlreadyExists => 409,
            Error::Database { .. } | Error::Config(_) => 500,
        }
    }

    /// Whether the caller sent something we refuse before touching storage.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::Decode("eof".into()).status_code(), 400);
        assert_eq!(Error::Validation("user_id".into()).status_code(), 400);
        assert_eq!(Error::InvalidDate("2025-13-01".into()).status_code(), 400);
        assert_eq!(Error::UserNotFound(7).status_code(), 404);
        assert_eq!(Error::EventNotFound.status_code(), 404);
        assert_eq!(Error::EventAlreadyExists.status_code(), 409);
        assert_eq!(
            Error::database("event.save")(sqlx::Error::PoolTimedOut).status_code(),
            500
        );
    }

    #[test]
    fn test_database_error_keeps_operation() {
        let err = Error::database("event.delete")(sqlx::Error::PoolClosed);
        assert!(err.to_string().starts_with("Database error in event.delete"));
        assert!(!err.is_client_error());
    }
}
