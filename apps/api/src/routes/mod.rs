pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ats::handlers as analysis;
use crate::layout::handlers as layout;
use crate::patterns::handlers as patterns;
use crate::semantic::handlers as semantic;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analysis", post(analysis::handle_full_analysis))
        .route("/api/v1/analysis/ats", post(analysis::handle_ats))
        .route("/api/v1/analysis/semantic", post(semantic::handle_semantic))
        .route("/api/v1/analysis/visa", post(analysis::handle_visa))
        // Pattern API
        .route(
            "/api/v1/patterns/formatting",
            post(patterns::handle_formatting_patterns),
        )
        .route(
            "/api/v1/patterns/content",
            post(patterns::handle_content_patterns),
        )
        .route(
            "/api/v1/patterns/compare",
            post(patterns::handle_compare_patterns),
        )
        // Layout API
        .route("/api/v1/layout/fit", post(layout::handle_fit))
        .with_state(state)
}
