//! `POST /create_user`

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::Response;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared::http::{error_response, ok_response, parse_json_body};
use shared::storage::UserCreator;
use shared::UserId;
use tracing::{error, info, instrument};

use super::DECODE_FAILED;

/// No fields are collected; any JSON object is accepted. Arrays and scalars
/// are malformed.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct CreateUserRequest(Map<String, Value>);

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedUser {
    pub user_id: UserId,
}

#[instrument(skip_all, fields(op = "handlers.user.create"))]
pub async fn create_user<S>(State(storage): State<Arc<S>>, body: Bytes) -> Response
where
    S: UserCreator + ?Sized + 'static,
{
    let request: CreateUserRequest = match parse_json_body(&body) {
        Ok(request) => request,
        Err(err) => {
            error!(error = %err, "failed to decode request body");
            return error_response(&err, DECODE_FAILED);
        }
    };

    info!(ignored_fields = request.0.len(), "request body decoded");

    match storage.create_user().await {
        Ok(user_id) => {
            info!(user_id, "user created");
            ok_response(CreatedUser { user_id })
        }
        Err(err) => super::storage_error(err, "failed to create user"),
    }
}
