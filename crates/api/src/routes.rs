use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// JSON management API, mounted under `/api`.
pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/stats", get(handlers::get_stats))
        .merge(handlers::filter::routes())
        .with_state(state)
}

pub fn create_doh_routes(state: AppState) -> Router {
    handlers::doh::routes().with_state(state)
}

/// Everything the HTTP listener serves, with request tracing.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(create_doh_routes(state.clone()))
        .nest("/api", create_api_routes(state))
        .layer(TraceLayer::new_for_http())
}
