pub mod cv;
pub mod health;
pub mod job;
pub mod matching;


use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // slack over the upload cap so the handler can answer 413 itself with a
    // structured error body
    let body_limit = state.config.max_upload_bytes() + 1024 * 1024;

    Router::new()
        .route("/health", get(health::health_handler))
        // CV API
        .route("/api/v1/cv/upload", post(cv::handle_upload_cv))
        .route("/api/v1/cv/", get(cv::handle_list_cvs))
        .route("/api/v1/cv/:cv_id", get(cv::handle_get_cv))
        // Job API
        .route("/api/v1/job/analyze", post(job::handle_analyze_job))
        .route("/api/v1/job/", get(job::handle_list_jobs))
        .route("/api/v1/job/:job_id", get(job::handle_get_job))
        // Match API
        .route("/api/v1/match/analyze", post(matching::handle_analyze_match))
        .route("/api/v1/match/:match_id", get(matching::handle_get_match))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
