use std::sync::Arc;

use crate::repository::EventRepository;

/// Shared handler state. Built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub events: Arc<dyn EventRepository>,
}

impl AppState {
    pub fn new<R>(events: R) -> Self
    where
        R: EventRepository + 'static,
    {
        Self {
            events: Arc::new(events),
        }
    }
}
