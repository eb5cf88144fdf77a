//! Axum surface of the API. Routes map one-to-one onto service operations;
//! the handlers only translate between HTTP and the domain types.

pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use services::{ForumService, ProductService};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub forum: Arc<ForumService>,
    pub products: Arc<ProductService>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/discussions",
            get(handlers::list_discussions).post(handlers::create_discussion),
        )
        .route(
            "/api/discussions/{id}",
            get(handlers::get_discussion)
                .put(handlers::update_discussion)
                .delete(handlers::delete_discussion),
        )
        .route(
            "/api/discussions/{id}/posts",
            get(handlers::list_posts).post(handlers::create_post),
        )
        .route(
            "/api/posts/{post_id}/comments",
            get(handlers::list_comments).post(handlers::create_comment),
        )
        .route("/api/products", post(handlers::create_product))
        .route(
            "/api/products/{id}",
            get(handlers::get_product).put(handlers::update_product),
        )
        .route("/api/products/{id}/orders", post(handlers::record_order))
        .layer(middleware::cors_policy())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
