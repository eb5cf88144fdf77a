//! Shared HTTP middleware.

use axum::http::header::{HeaderName, CONTENT_TYPE};
use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// CORS for a UI served from another origin. The identity header has to be
/// allowed explicitly or browsers strip it from preflighted requests.
pub fn cors_policy() -> CorsLayer {
    CorsLayer::new()
        .allow_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static("x-user-id")])
        .allow_origin(Any)
}
