//! CRUD service for venue-and-time-bound event records.

pub mod config;
pub mod database;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod state;
pub mod utils;
pub mod validation;

pub use models::{CreateEventRequest, Event, EventInput, EventRequest, UpdateEventRequest};
pub use repository::{EventRepository, InMemoryEventRepository, PgEventRepository};
pub use state::AppState;
pub use utils::{AppError, AppResult};
pub use validation::{validate_event, ValidationError};
