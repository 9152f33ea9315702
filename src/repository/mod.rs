use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Event, EventInput};
use crate::utils::{AppError, AppResult};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryEventRepository;
pub use postgres::PgEventRepository;

/// Persistence for events.
///
/// Update and delete check for the row first and then mutate it. The two
/// steps are not wrapped in a transaction: if the row vanishes in between,
/// the mutation itself reports `NotFound`.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Inserts a new event; the store assigns the id and both timestamps.
    async fn create(&self, input: EventInput) -> AppResult<Event>;

    /// All events ordered by date, then time.
    async fn find_all(&self) -> AppResult<Vec<Event>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Event>;

    /// Replaces every mutable field and refreshes `updated_at`.
    async fn update(&self, id: Uuid, input: EventInput) -> AppResult<Event>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub(crate) fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("event {} not found", id))
}
