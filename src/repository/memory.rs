use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use super::{not_found, EventRepository};
use crate::models::{Event, EventInput};
use crate::utils::AppResult;

/// In-memory event store for tests and local development.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<HashMap<Uuid, Event>>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn contains(&self, id: Uuid) -> bool {
        self.events.read().await.contains_key(&id)
    }

    /// Second step of `update`: the row may have gone since the check.
    async fn replace(&self, id: Uuid, input: EventInput) -> AppResult<Event> {
        let mut events = self.events.write().await;
        let Some(event) = events.get_mut(&id) else {
            warn!(event_id = %id, "Event deleted before update was applied");
            return Err(not_found(id));
        };

        let now = next_timestamp(event.updated_at);
        event.apply(input, now);

        info!(event_id = %id, "Updated event");
        Ok(event.clone())
    }

    /// Second step of `delete`.
    async fn remove(&self, id: Uuid) -> AppResult<()> {
        if self.events.write().await.remove(&id).is_none() {
            warn!(event_id = %id, "Event deleted concurrently");
            return Err(not_found(id));
        }

        info!(event_id = %id, "Deleted event");
        Ok(())
    }
}

/// `updated_at` must move forward even if the clock has not ticked.
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create(&self, input: EventInput) -> AppResult<Event> {
        let event = Event::new(input, Utc::now());
        self.events.write().await.insert(event.id, event.clone());

        info!(event_id = %event.id, "Created event");
        Ok(event)
    }

    async fn find_all(&self) -> AppResult<Vec<Event>> {
        let mut events: Vec<Event> = self.events.read().await.values().cloned().collect();
        events.sort_by(|a, b| (a.date, a.time).cmp(&(b.date, b.time)));

        info!(count = events.len(), "Fetched events");
        Ok(events)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Event> {
        self.events
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn update(&self, id: Uuid, input: EventInput) -> AppResult<Event> {
        if !self.contains(id).await {
            return Err(not_found(id));
        }
        self.replace(id, input).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.contains(id).await {
            return Err(not_found(id));
        }
        self.remove(id).await
    }
}
