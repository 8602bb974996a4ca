pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::advisor::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Static datasets
        .route("/api/v1/profile", get(handlers::handle_get_profile))
        .route("/api/v1/jobs", get(handlers::handle_list_jobs))
        // Profile analysis
        .route(
            "/api/v1/analysis",
            get(handlers::handle_get_analysis).post(handlers::handle_run_analysis),
        )
        // Career path exploration
        .route("/api/v1/skill-gap", post(handlers::handle_skill_gap))
        .route(
            "/api/v1/recommendations",
            post(handlers::handle_recommendations),
        )
        .route("/api/v1/alumni", get(handlers::handle_alumni))
        .route("/api/v1/explore", post(handlers::handle_explore))
        .with_state(state)
}
