pub mod health;
pub mod interviews;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/interviews",
            post(interviews::handle_start_interview),
        )
        .route(
            "/api/v1/interviews/:id",
            get(interviews::handle_interview_status),
        )
        .route(
            "/api/v1/interviews/:id/messages",
            post(interviews::handle_submit_message),
        )
        .with_state(state)
}
