use crate::api::{handlers, AppState};
use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Build the main API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health_check))
        // Global search
        .route("/api/global-search", get(handlers::quick_search))
        .route("/api/global-search/full", get(handlers::full_search))
        // Search history
        .route(
            "/api/global-search/history",
            get(handlers::get_history).delete(handlers::clear_history),
        )
        .route(
            "/api/global-search/history/:id",
            delete(handlers::delete_history_entry),
        )
        // Add state
        .with_state(state)
        // Add middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new())
                .on_response(DefaultOnResponse::new()),
        )
        .layer(CorsLayer::permissive())
}
