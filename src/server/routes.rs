//! HTTP routes definition

use axum::{routing::get, Router};

use super::handlers;

/// Quote routes
///
/// - POST   /quotes              - Add a quote
/// - GET    /quotes              - List all quotes
/// - GET    /quotes?author=...   - List quotes by author (204 when none)
/// - GET    /quotes/random       - Any quote (204 on an empty store)
/// - GET    /quotes/:id          - Get a quote
/// - DELETE /quotes/:id          - Delete a quote (404 when absent)
pub fn quote_routes() -> Router {
    Router::new()
        .route(
            "/quotes",
            get(handlers::list_quotes).post(handlers::add_quote),
        )
        .route("/quotes/random", get(handlers::random_quote))
        .route(
            "/quotes/:id",
            get(handlers::get_quote).delete(handlers::delete_quote),
        )
}

/// Health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/_health", get(handlers::health))
        .route("/_metrics", get(handlers::metrics))
}
