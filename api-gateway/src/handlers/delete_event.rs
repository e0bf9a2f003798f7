//! `POST /delete_event`

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::Response;
use serde::{Deserialize, Serialize};
use shared::http::{ok_response, Empty};
use shared::storage::EventDeleter;
use shared::{EventId, UserId};
use tracing::{info, instrument};
use validator::Validate;

use super::{decode_request, storage_error};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct DeleteEventRequest {
    #[serde(default)]
    #[validate(range(min = 1, code = "required"))]
    pub user_id: UserId,
    #[serde(default)]
    #[validate(range(min = 1, code = "required"))]
    pub event_id: EventId,
}

#[instrument(skip_all, fields(op = "handlers.event.delete"))]
pub async fn delete_event<S>(State(storage): State<Arc<S>>, body: Bytes) -> Response
where
    S: EventDeleter + ?Sized + 'static,
{
    let request: DeleteEventRequest = match decode_request(&body) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match storage
        .delete_event(request.user_id, request.event_id)
        .await
    {
        Ok(()) => {
            info!(event_id = request.event_id, "event deleted");
            ok_response(Empty {})
        }
        Err(err) => storage_error(err, "failed to delete event"),
    }
}
