use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use super::{not_found, EventRepository};
use crate::models::{Event, EventInput};
use crate::utils::AppResult;

const INSERT_EVENT: &str = r#"
    INSERT INTO events (name, description, venue_name, address, date, time, contact_mobile, contact_email, contact_instagram)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
    RETURNING id, name, description, venue_name, address, date, time, contact_mobile, contact_email, contact_instagram, created_at, updated_at
"#;

const SELECT_ALL_EVENTS: &str = r#"
    SELECT id, name, description, venue_name, address, date, time, contact_mobile, contact_email, contact_instagram, created_at, updated_at
    FROM events
    ORDER BY date ASC, time ASC
"#;

const SELECT_EVENT_BY_ID: &str = r#"
    SELECT id, name, description, venue_name, address, date, time, contact_mobile, contact_email, contact_instagram, created_at, updated_at
    FROM events
    WHERE id = $1
"#;

const EVENT_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM events WHERE id = $1)";

const UPDATE_EVENT: &str = r#"
    UPDATE events
    SET name = $1, description = $2, venue_name = $3, address = $4, date = $5, time = $6,
        contact_mobile = $7, contact_email = $8, contact_instagram = $9,
        updated_at = clock_timestamp()
    WHERE id = $10
    RETURNING id, name, description, venue_name, address, date, time, contact_mobile, contact_email, contact_instagram, created_at, updated_at
"#;

const DELETE_EVENT: &str = "DELETE FROM events WHERE id = $1";

/// Event store backed by the Postgres `events` table.
#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: Uuid) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(EVENT_EXISTS)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Second step of `update`. No returned row means the event was deleted
    /// after the existence check.
    async fn replace(&self, id: Uuid, input: EventInput) -> AppResult<Event> {
        let updated = sqlx::query_as::<_, Event>(UPDATE_EVENT)
            .bind(input.name)
            .bind(input.description)
            .bind(input.venue_name)
            .bind(input.address)
            .bind(input.date)
            .bind(input.time)
            .bind(input.contact_mobile)
            .bind(input.contact_email)
            .bind(input.contact_instagram)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match updated {
            Some(event) => {
                info!(event_id = %id, "Updated event");
                Ok(event)
            }
            None => {
                warn!(event_id = %id, "Event deleted before update was applied");
                Err(not_found(id))
            }
        }
    }

    /// Second step of `delete`.
    async fn remove(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query(DELETE_EVENT)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            warn!(event_id = %id, "Event deleted concurrently");
            return Err(not_found(id));
        }

        info!(event_id = %id, "Deleted event");
        Ok(())
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn create(&self, input: EventInput) -> AppResult<Event> {
        let event = sqlx::query_as::<_, Event>(INSERT_EVENT)
            .bind(input.name)
            .bind(input.description)
            .bind(input.venue_name)
            .bind(input.address)
            .bind(input.date)
            .bind(input.time)
            .bind(input.contact_mobile)
            .bind(input.contact_email)
            .bind(input.contact_instagram)
            .fetch_one(&self.pool)
            .await?;

        info!(event_id = %event.id, "Created event");
        Ok(event)
    }

    async fn find_all(&self) -> AppResult<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(SELECT_ALL_EVENTS)
            .fetch_all(&self.pool)
            .await?;

        info!(count = events.len(), "Fetched events");
        Ok(events)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Event> {
        sqlx::query_as::<_, Event>(SELECT_EVENT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn update(&self, id: Uuid, input: EventInput) -> AppResult<Event> {
        if !self.exists(id).await? {
            return Err(not_found(id));
        }
        self.replace(id, input).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.exists(id).await? {
            return Err(not_found(id));
        }
        self.remove(id).await
    }
}
