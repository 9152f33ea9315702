use std::any::Any;

use axum::response::{IntoResponse, Response};
use axum::{routing::get, Router};
use tower_http::catch_panic::CatchPanicLayer;

use crate::config::{create_cors_layer, RequestLogLayer};
use crate::handlers::events::{create_event, delete_event, get_event, list_events, update_event};
use crate::handlers::health_check;
use crate::state::AppState;
use crate::utils::AppError;

pub fn create_routes(state: AppState, cors_allowed_origins: Option<&[String]>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/events", get(list_events).post(create_event))
        .route(
            "/api/events/:id",
            get(get_event).put(update_event).delete(delete_event),
        )
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(create_cors_layer(cors_allowed_origins))
        .layer(RequestLogLayer::new())
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::InternalServerError(detail).into_response()
}
