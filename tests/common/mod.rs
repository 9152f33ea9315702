//! Shared helpers for router-level tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use events_api::routes::create_routes;
use events_api::{AppState, EventRepository, InMemoryEventRepository};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

pub fn build_test_app() -> Router {
    build_app_with(InMemoryEventRepository::new())
}

pub fn build_app_with<R>(repository: R) -> Router
where
    R: EventRepository + 'static,
{
    create_routes(AppState::new(repository), None)
}

pub fn valid_event_json() -> Value {
    json!({
        "name": "Test Event",
        "venue_name": "Test Venue",
        "address": "Test Address",
        "date": "2024-03-15",
        "time": "14:30:00"
    })
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&value).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.oneshot(request).await.unwrap()
}

pub async fn send_raw(app: Router, method: Method, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap();

    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

/// Asserts the error envelope and returns its message.
pub async fn expect_error(response: Response<Body>, status: StatusCode, code: &str) -> String {
    assert_eq!(response.status(), status);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], code);
    json["error"]["message"].as_str().unwrap().to_string()
}

/// Creates an event through the API and returns its JSON.
pub async fn create_event(app: &Router, body: Value) -> Value {
    let response = post_json(app.clone(), "/api/events", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
