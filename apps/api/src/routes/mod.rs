pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::generation::handlers as generation;
use crate::interview::handlers as interview;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile API
        .route(
            "/api/v1/profiles/:id",
            get(profile::handle_get_profile)
                .put(profile::handle_put_profile)
                .delete(profile::handle_reset_profile),
        )
        .route(
            "/api/v1/profiles/:id/template",
            put(profile::handle_put_template),
        )
        .route(
            "/api/v1/profiles/:id/render",
            get(profile::handle_render_profile),
        )
        // Generation API
        .route(
            "/api/v1/profiles/:id/resume",
            post(generation::handle_generate_resume),
        )
        .route(
            "/api/v1/profiles/:id/score",
            post(generation::handle_score_resume),
        )
        .route(
            "/api/v1/profiles/:id/skills",
            post(generation::handle_suggest_skills),
        )
        .route(
            "/api/v1/profiles/:id/cover-letter",
            post(generation::handle_cover_letter),
        )
        .route(
            "/api/v1/profiles/:id/career-path",
            post(generation::handle_career_path),
        )
        .route(
            "/api/v1/market-insights",
            post(generation::handle_market_insights),
        )
        // Interview API
        .route("/api/v1/interviews", post(interview::handle_create))
        .route(
            "/api/v1/interviews/:id",
            get(interview::handle_get).delete(interview::handle_delete),
        )
        .route("/api/v1/interviews/:id/start", post(interview::handle_start))
        .route(
            "/api/v1/interviews/:id/answer",
            post(interview::handle_answer),
        )
        .route("/api/v1/interviews/:id/next", post(interview::handle_next))
        .route(
            "/api/v1/interviews/:id/summary",
            post(interview::handle_retry_summary),
        )
        .route("/api/v1/interviews/:id/reset", post(interview::handle_reset))
        .with_state(state)
}
