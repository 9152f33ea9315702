//! HTTP handlers for `/api/events`.
//!
//! Each handler validates first and only then touches the repository.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::models::{CreateEventRequest, UpdateEventRequest};
use crate::state::AppState;
use crate::utils::response::{created, no_content, ok};
use crate::utils::{AppError, AppResult};
use crate::validation::validate_event;

pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(request) = payload.map_err(invalid_body)?;
    let input = validate_event(&request)?;

    let event = state.events.create(input).await?;
    Ok(created(event).into_response())
}

pub async fn list_events(State(state): State<AppState>) -> AppResult<Response> {
    let events = state.events.find_all().await?;
    Ok(ok(events).into_response())
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_event_id(&id)?;

    let event = state.events.find_by_id(id).await?;
    Ok(ok(event).into_response())
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateEventRequest>, JsonRejection>,
) -> AppResult<Response> {
    let id = require_event_id(&id)?;
    let Json(request) = payload.map_err(invalid_body)?;
    let input = validate_event(&request)?;

    let id = event_uuid(id)?;
    let event = state.events.update(id, input).await?;
    Ok(ok(event).into_response())
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_event_id(&id)?;

    state.events.delete(id).await?;
    Ok(no_content().into_response())
}

fn parse_event_id(raw: &str) -> AppResult<Uuid> {
    event_uuid(require_event_id(raw)?)
}

/// A blank id is a client error.
fn require_event_id(raw: &str) -> AppResult<&str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::ValidationError("event id is required".to_string()));
    }
    Ok(raw)
}

/// Anything that is not a UUID cannot name a stored event.
fn event_uuid(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("event {} not found", raw)))
}

fn invalid_body(rejection: JsonRejection) -> AppError {
    tracing::debug!(error = %rejection.body_text(), "Rejected request body");
    AppError::ValidationError("invalid request body".to_string())
}
