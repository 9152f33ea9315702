use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// CORS for the events API. Without a configured origin list every origin is
/// allowed.
pub fn create_cors_layer(allowed_origins: Option<&[String]>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN]);

    match allowed_origins.map(parse_origins) {
        Some(origins) if !origins.is_empty() => {
            tracing::info!("CORS: Configured with {} allowed origin(s)", origins.len());
            layer.allow_origin(AllowOrigin::list(origins))
        }
        _ => {
            tracing::info!("CORS: Allowing any origin");
            layer.allow_origin(Any)
        }
    }
}

fn parse_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect()
}
