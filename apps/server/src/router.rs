use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::handlers::{approval_status_handler, approval_status_info_handler, health_handler};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/approval-status",
            get(approval_status_info_handler).post(approval_status_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests;
