//! PostgreSQL implementation of the storage capabilities.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::debug;

use super::{
    EventCreator, EventDeleter, EventUpdater, EventsByDay, EventsByMonth, EventsByWeek,
    UserCreator,
};
use crate::models::{
    day_range, month_range, parse_date, week_range, Event, EventId, EventPatch, UserId,
};
use crate::{Error, Result};

const SELECT_RANGE: &str = r#"
    SELECT id, date::date AS date, text
    FROM event
    WHERE user_id = $1 AND date >= $2 AND date < $3
    ORDER BY date, id
"#;

/// Event row from database
#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    id: i64,
    date: NaiveDate,
    text: String,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            event_id: row.id,
            date: row.date,
            text: row.text,
        }
    }
}

/// Storage gateway over a pooled PostgreSQL connection.
#[derive(Debug, Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close every pooled connection. Waits for checked-out connections to come back.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn user_exists(&self, user_id: UserId) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::database("user.exists"))
    }

    async fn events_between(
        &self,
        op: &'static str,
        user_id: UserId,
        (start, end): (NaiveDate, NaiveDate),
    ) -> Result<Vec<Event>> {
        debug!(op, user_id, %start, %end, "querying events");

        let rows = sqlx::query_as::<_, EventRow>(SELECT_RANGE)
            .bind(user_id)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::database(op))?;

        Ok(rows.into_iter().map(Event::from).collect())
    }
}

#[async_trait]
impl UserCreator for PgStorage {
    async fn create_user(&self) -> Result<UserId> {
        sqlx::query_scalar::<_, i64>("INSERT INTO users DEFAULT VALUES RETURNING user_id")
            .fetch_one(&self.pool)
            .await
            .map_err(Error::database("user.create"))
    }
}

#[async_trait]
impl EventCreator for PgStorage {
    async fn save_event(&self, user_id: UserId, date: &str, text: &str) -> Result<EventId> {
        if !self.user_exists(user_id).await? {
            return Err(Error::UserNotFound(user_id));
        }

        let date = parse_date(date)?;

        sqlx::query_scalar::<_, i64>(
            "INSERT INTO event (user_id, date, text) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(user_id)
        .bind(date)
        .bind(text)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::database("event.save"))
    }
}

#[async_trait]
impl EventUpdater for PgStorage {
    async fn update_event(
        &self,
        user_id: UserId,
        event_id: EventId,
        patch: EventPatch,
    ) -> Result<()> {
        let date = patch.date().map(parse_date).transpose()?;
        let text = patch.text();

        let query = match (date, text) {
            (None, None) => return Ok(()),
            (Some(date), Some(text)) => {
                sqlx::query("UPDATE event SET date = $1, text = $2 WHERE id = $3 AND user_id = $4")
                    .bind(date)
                    .bind(text)
            }
            (Some(date), None) => {
                sqlx::query("UPDATE event SET date = $1 WHERE id = $2 AND user_id = $3").bind(date)
            }
            (None, Some(text)) => {
                sqlx::query("UPDATE event SET text = $1 WHERE id = $2 AND user_id = $3").bind(text)
            }
        };

        let result = query
            .bind(event_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(Error::database("event.update"))?;

        if result.rows_affected() == 0 {
            return Err(Error::EventNotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl EventDeleter for PgStorage {
    async fn delete_event(&self, user_id: UserId, event_id: EventId) -> Result<()> {
        let result = sqlx::query("DELETE FROM event WHERE id = $1 AND user_id = $2")
            .bind(event_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(Error::database("event.delete"))?;

        if result.rows_affected() == 0 {
            return Err(Error::EventNotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl EventsByDay for PgStorage {
    async fn events_by_day(&self, user_id: UserId, date: &str) -> Result<Vec<Event>> {
        let range = day_range(parse_date(date)?)?;
        self.events_between("events.by_day", user_id, range).await
    }
}

#[async_trait]
impl EventsByWeek for PgStorage {
    async fn events_by_week(&self, user_id: UserId, start: NaiveDate) -> Result<Vec<Event>> {
        let range = week_range(start)?;
        self.events_between("events.by_week", user_id, range).await
    }
}

#[async_trait]
impl EventsByMonth for PgStorage {
    async fn events_by_month(&self, user_id: UserId, year: i32, month: u32) -> Result<Vec<Event>> {
        let range = month_range(year, month)?;
        self.events_between("events.by_month", user_id, range).await
    }
}
