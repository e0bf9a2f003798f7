#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use mockall::mock;
use serde_json::Value;
use shared::models::EventPatch;
use shared::storage::{
    EventCreator, EventDeleter, EventUpdater, EventsByDay, EventsByMonth, EventsByWeek,
    UserCreator,
};
use shared::{Error, Event, EventId, Result, UserId};
use tower::ServiceExt;

mock! {
    pub Users {}

    #[async_trait]
    impl UserCreator for Users {
        async fn create_user(&self) -> Result<UserId>;
    }
}

mock! {
    pub Creator {}

    #[async_trait]
    impl EventCreator for Creator {
        async fn save_event(&self, user_id: UserId, date: &str, text: &str) -> Result<EventId>;
    }
}

mock! {
    pub Updater {}

    #[async_trait]
    impl EventUpdater for Updater {
        async fn update_event(&self, user_id: UserId, event_id: EventId, patch: EventPatch) -> Result<()>;
    }
}

mock! {
    pub Deleter {}

    #[async_trait]
    impl EventDeleter for Deleter {
        async fn delete_event(&self, user_id: UserId, event_id: EventId) -> Result<()>;
    }
}

mock! {
    pub Reader {}

    #[async_trait]
    impl EventsByDay for Reader {
        async fn events_by_day(&self, user_id: UserId, date: &str) -> Result<Vec<Event>>;
    }

    #[async_trait]
    impl EventsByWeek for Reader {
        async fn events_by_week(&self, user_id: UserId, start: NaiveDate) -> Result<Vec<Event>>;
    }

    #[async_trait]
    impl EventsByMonth for Reader {
        async fn events_by_month(&self, user_id: UserId, year: i32, month: u32) -> Result<Vec<Event>>;
    }
}

pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

pub fn event(event_id: EventId, day: &str, text: &str) -> Event {
    Event {
        event_id,
        date: date(day),
        text: text.to_string(),
    }
}

pub fn db_failure(op: &'static str) -> Error {
    Error::Database {
        op,
        source: sqlx::Error::PoolTimedOut,
    }
}

/// Send one request through `router` and return status plus parsed JSON body.
pub async fn call(router: Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}
