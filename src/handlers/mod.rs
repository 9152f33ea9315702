use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::utils::response::ok;

pub mod events;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "events-api",
    };

    ok(payload).into_response()
}
