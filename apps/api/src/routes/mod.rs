pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assessment::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Assessment API
        .route(
            "/api/v1/assessment/questions",
            get(handlers::handle_questions),
        )
        .route("/api/v1/assessment/submit", post(handlers::handle_submit))
        .route("/api/v1/assessment/results", get(handlers::handle_results))
        // Careers API
        .route("/api/v1/careers", get(handlers::handle_list_careers))
        .route(
            "/api/v1/careers/categories",
            get(handlers::handle_categories),
        )
        .route("/api/v1/careers/:slug", get(handlers::handle_get_career))
        .with_state(state)
}
