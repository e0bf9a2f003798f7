//! `GET /events_for_day`, `/events_for_week`, `/events_for_month`
//!
//! The week is the literal seven days starting at the given date, not an ISO
//! week. The month is the calendar month containing the given date.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::Response;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use shared::http::{error_response, ok_response};
use shared::models::parse_date;
use shared::storage::{EventsByDay, EventsByMonth, EventsByWeek};
use shared::{Event, EventView, Result, UserId};
use tracing::{error, info, instrument};
use validator::Validate;

use super::{decode_request, storage_error, INVALID_DATE};

const QUERY_FAILED: &str = "failed to get events";

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct EventsRequest {
    #[serde(default)]
    #[validate(range(min = 1, code = "required"))]
    pub user_id: UserId,
    #[serde(default)]
    #[validate(length(min = 1, code = "required"))]
    pub date: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EventsResponse {
    pub events: Vec<EventView>,
}

fn render(result: Result<Vec<Event>>) -> Response {
    match result {
        Ok(events) => {
            info!(count = events.len(), "got events");
            ok_response(EventsResponse {
                events: events.into_iter().map(EventView::from).collect(),
            })
        }
        Err(err) => storage_error(err, QUERY_FAILED),
    }
}

/// Date parsing for the week/month variants happens here, before storage.
fn parse_request_date(raw: &str) -> std::result::Result<NaiveDate, Response> {
    parse_date(raw).map_err(|err| {
        error!(error = %err, "invalid date format");
        error_response(&err, INVALID_DATE)
    })
}

#[instrument(skip_all, fields(op = "handlers.event.get_events.by_day"))]
pub async fn by_day<S>(State(storage): State<Arc<S>>, body: Bytes) -> Response
where
    S: EventsByDay + ?Sized + 'static,
{
    let request: EventsRequest = match decode_request(&body) {
        Ok(request) => request,
        Err(response) => return response,
    };

    render(storage.events_by_day(request.user_id, &request.date).await)
}

#[instrument(skip_all, fields(op = "handlers.event.get_events.by_week"))]
pub async fn by_week<S>(State(storage): State<Arc<S>>, body: Bytes) -> Response
where
    S: EventsByWeek + ?Sized + 'static,
{
    let request: EventsRequest = match decode_request(&body) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let start = match parse_request_date(&request.date) {
        Ok(start) => start,
        Err(response) => return response,
    };

    render(storage.events_by_week(request.user_id, start).await)
}

#[instrument(skip_all, fields(op = "handlers.event.get_events.by_month"))]
pub async fn by_month<S>(State(storage): State<Arc<S>>, body: Bytes) -> Response
where
    S: EventsByMonth + ?Sized + 'static,
{
    let request: EventsRequest = match decode_request(&body) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let date = match parse_request_date(&request.date) {
        Ok(date) => date,
        Err(response) => return response,
    };

    render(
        storage
            .events_by_month(request.user_id, date.year(), date.month())
            .await,
    )
}
