//! HTTP handlers, one module per operation.
//!
//! Every handler follows the same path: decode the body, validate it, make a
//! single storage call, render the envelope. Decode and validation failures
//! never reach storage.

pub mod create_event;
pub mod delete_event;
pub mod get_events;
pub mod update_event;
pub mod user;

use std::fmt::Debug;

use axum::response::Response;
use serde::de::DeserializeOwned;
use shared::http::{error_response, parse_json_body};
use shared::Error;
use tracing::{error, info};
use validator::Validate;

use crate::validation::validate_request;

pub const DECODE_FAILED: &str = "failed to decode request";
pub const INVALID_DATE: &str = "invalid date format, use YYYY-MM-DD";

/// Decode and validate a request body, rendering the error response on failure.
pub(crate) fn decode_request<T>(body: &[u8]) -> Result<T, Response>
where
    T: DeserializeOwned + Validate + Debug,
{
    let request: T = parse_json_body(body).map_err(|err| {
        error!(error = %err, "failed to decode request body");
        error_response(&err, DECODE_FAILED)
    })?;

    info!(request = ?request, "request body decoded");

    validate_request(&request).map_err(|err| {
        error!(error = %err, "invalid request");
        let message = match &err {
            Error::Validation(message) => message.clone(),
            other => other.to_string(),
        };
        error_response(&err, message)
    })?;

    Ok(request)
}

/// Map a storage error to the envelope. `failure` is the message for
/// anything that is not a domain condition; driver detail only goes to the log.
pub(crate) fn storage_error(err: Error, failure: &str) -> Response {
    let message = match &err {
        Error::UserNotFound(_) => "user not found",
        Error::EventNotFound => "event not found",
        Error::EventAlreadyExists => "event already exists",
        Error::InvalidDate(_) => INVALID_DATE,
        _ => failure,
    };

    if err.is_client_error() {
        info!(error = %err, "{message}");
    } else {
        error!(error = %err, "{failure}");
    }

    error_response(&err, message)
}
