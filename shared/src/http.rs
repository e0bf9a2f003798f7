//! HTTP helpers shared by the handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{Error, Result};

/// Outcome marker carried by every response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Error")]
    Error,
}

/// Standard response envelope: `{status, error?, ...payload}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub data: Option<T>,
}

/// Payload for responses that carry nothing beyond the status.
#[derive(Debug, Serialize)]
pub struct Empty {}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: Status::Ok,
            error: None,
            data: Some(data),
        }
    }
}

impl Envelope<Empty> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            error: Some(message.into()),
            data: None,
        }
    }
}

/// Create a JSON response with the given status code and body.
pub fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, Json(body)).into_response()
}

/// 200 with the payload flattened into an OK envelope.
pub fn ok_response<T: Serialize>(data: T) -> Response {
    json_response(StatusCode::OK, Envelope::ok(data))
}

/// Error envelope whose status code follows the error kind.
pub fn error_response(err: &Error, message: impl Into<String>) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    json_response(status, Envelope::error(message))
}

/// Parse request body as JSON. An empty body is malformed, not `{}`.
pub fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| Error::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Serialize)]
    struct Created {
        event_id: i64,
    }

    #[test]
    fn test_ok_envelope_flattens_payload() {
        let body = serde_json::to_value(Envelope::ok(Created { event_id: 42 })).unwrap();
        assert_eq!(body, json!({"status": "OK", "event_id": 42}));

        let body = serde_json::to_value(Envelope::ok(Empty {})).unwrap();
        assert_eq!(body, json!({"status": "OK"}));
    }

    #[test]
    fn test_error_envelope() {
        let body = serde_json::to_value(Envelope::error("event not found")).unwrap();
        assert_eq!(body, json!({"status": "Error", "error": "event not found"}));
    }

    #[test]
    fn test_error_response_status() {
        let response = error_response(&Error::EventNotFound, "event not found");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = error_response(&Error::Decode("eof".into()), "failed to decode request");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default)]
        user_id: i64,
    }

    #[test]
    fn test_parse_json_body() {
        let probe: Probe = parse_json_body(br#"{"user_id": 5}"#).unwrap();
        assert_eq!(probe.user_id, 5);

        let probe: Probe = parse_json_body(b"{}").unwrap();
        assert_eq!(probe.user_id, 0);

        assert!(matches!(parse_json_body::<Probe>(b""), Err(Error::Decode(_))));

        assert!(matches!(
            parse_json_body::<Probe>(b"{\"user_id\":"),
            Err(Error::Decode(_))
        ));
        assert!(matches!(
            parse_json_body::<Probe>(br#"{"user_id": "five"}"#),
            Err(Error::Decode(_))
        ));
    }
}
