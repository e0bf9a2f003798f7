//! Storage gateway and the narrow capabilities handlers depend on.
//!
//! Each trait covers exactly what one handler calls, so a handler can be
//! exercised against a substitute without stubbing the rest of the store.
//! [`PgStorage`] implements all of them. Query results come back ordered by
//! date ascending.

mod postgres;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{Event, EventId, EventPatch, UserId};
use crate::Result;

pub use postgres::PgStorage;

/// Registers new users.
#[async_trait]
pub trait UserCreator: Send + Sync {
    async fn create_user(&self) -> Result<UserId>;
}

/// Persists new events for an existing user.
#[async_trait]
pub trait EventCreator: Send + Sync {
    /// Fails with `UserNotFound` if `user_id` is unknown and `InvalidDate` if
    /// `date` is not `YYYY-MM-DD`.
    async fn save_event(&self, user_id: UserId, date: &str, text: &str) -> Result<EventId>;
}

/// Partially updates an event owned by a user.
#[async_trait]
pub trait EventUpdater: Send + Sync {
    /// Fields left out of `patch` are untouched; an empty patch writes
    /// nothing and succeeds.
    async fn update_event(&self, user_id: UserId, event_id: EventId, patch: EventPatch)
        -> Result<()>;
}

/// Removes an event owned by a user.
#[async_trait]
pub trait EventDeleter: Send + Sync {
    async fn delete_event(&self, user_id: UserId, event_id: EventId) -> Result<()>;
}

/// Events on a single day.
#[async_trait]
pub trait EventsByDay: Send + Sync {
    async fn events_by_day(&self, user_id: UserId, date: &str) -> Result<Vec<Event>>;
}

/// Events in `[start, start + 7 days)`.
#[async_trait]
pub trait EventsByWeek: Send + Sync {
    async fn events_by_week(&self, user_id: UserId, start: NaiveDate) -> Result<Vec<Event>>;
}

/// Events in `[first of month, first of next month)`.
#[async_trait]
pub trait EventsByMonth: Send + Sync {
    async fn events_by_month(&self, user_id: UserId, year: i32, month: u32) -> Result<Vec<Event>>;
}
