//! `POST /update_event`
//!
//! Partial update: only the supplied (non-empty) fields change.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::Response;
use serde::{Deserialize, Serialize};
use shared::http::{ok_response, Empty};
use shared::storage::EventUpdater;
use shared::models::EventPatch;
use shared::{EventId, UserId};
use tracing::{info, instrument};
use validator::Validate;

use super::{decode_request, storage_error};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct UpdateEventRequest {
    #[serde(default)]
    #[validate(range(min = 1, code = "required"))]
    pub user_id: UserId,
    #[serde(default)]
    #[validate(range(min = 1, code = "required"))]
    pub event_id: EventId,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[instrument(skip_all, fields(op = "handlers.event.update"))]
pub async fn update_event<S>(State(storage): State<Arc<S>>, body: Bytes) -> Response
where
    S: EventUpdater + ?Sized + 'static,
{
    let request: UpdateEventRequest = match decode_request(&body) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match storage
        .update_event(
            request.user_id,
            request.event_id,
            EventPatch {
                date: request.date,
                text: request.text,
            },
        )
        .await
    {
        Ok(()) => {
            info!(event_id = request.event_id, "event updated");
            ok_response(Empty {})
        }
        Err(err) => storage_error(err, "failed to update event"),
    }
}
