//! HTTP routes for ranking endpoints.

use axum::{
    extract::{DefaultBodyLimit, Request},
    routing::{get, post},
    Router,
};
use http::HeaderValue;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;

use super::handlers::{health, submit, RankingAppState};

/// Creates the ranking router with all endpoints.
pub fn ranking_routes(state: RankingAppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/submit", post(submit))
        .with_state(state)
}

/// Creates the service router: endpoints plus the HTTP middleware stack.
///
/// Layers run top to bottom: the request id is assigned before the trace
/// span opens, so every request log line carries it.
pub fn app_router(state: RankingAppState, server: &ServerConfig) -> Router {
    ranking_routes(state).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(cors_layer(server))
            .layer(TimeoutLayer::new(server.request_timeout()))
            .layer(DefaultBodyLimit::max(server.max_upload_bytes)),
    )
}

fn request_span(request: &Request) -> tracing::Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id,
    )
}

/// Any origin when none are configured; otherwise the configured list.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}
