//! `POST /create_event`

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::Response;
use serde::{Deserialize, Serialize};
use shared::http::ok_response;
use shared::storage::EventCreator;
use shared::{EventId, UserId};
use tracing::{info, instrument};
use validator::Validate;

use super::{decode_request, storage_error};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateEventRequest {
    #[serde(default)]
    #[validate(range(min = 1, code = "required"))]
    pub user_id: UserId,
    #[serde(default)]
    #[validate(length(min = 1, code = "required"))]
    pub date: String,
    #[serde(default)]
    #[validate(length(min = 1, code = "required"))]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedEvent {
    pub event_id: EventId,
}

#[instrument(skip_all, fields(op = "handlers.event.create"))]
pub async fn create_event<S>(State(storage): State<Arc<S>>, body: Bytes) -> Response
where
    S: EventCreator + ?Sized + 'static,
{
    let request: CreateEventRequest = match decode_request(&body) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match storage
        .save_event(request.user_id, &request.date, &request.text)
        .await
    {
        Ok(event_id) => {
            info!(event_id, user_id = request.user_id, "event added");
            ok_response(CreatedEvent { event_id })
        }
        Err(err) => storage_error(err, "failed to add event"),
    }
}
