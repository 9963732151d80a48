//! Route definitions for the Beacon HTTP API.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let delivery_routes = Router::new()
        .route("/push", post(handlers::delivery::handle_push))
        .route("/interactions", post(handlers::delivery::handle_interaction));

    let sync_routes = Router::new()
        .route("/sync", post(handlers::sync::trigger_sync_all))
        .route("/sync/{tag}", post(handlers::sync::trigger_sync));

    let engine_routes = Router::new()
        .route(
            "/prescriptions/schedule",
            post(handlers::engine::schedule_prescription),
        )
        .route("/completions", post(handlers::engine::process_completion));

    let system_routes = Router::new()
        .route("/health", get(handlers::system::health))
        .route("/queues", get(handlers::system::queue_depths));

    Router::new()
        .merge(delivery_routes)
        .merge(sync_routes)
        .merge(engine_routes)
        .merge(system_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
