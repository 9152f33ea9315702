pub mod event;

pub use event::{CreateEventRequest, Event, EventInput, EventRequest, UpdateEventRequest};
