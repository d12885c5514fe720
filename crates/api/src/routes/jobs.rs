//! Route definitions for generation jobs.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

/// ```text
/// POST   /generate            -> submit_generation
/// GET    /job/{id}            -> get_job
/// GET    /job/{id}/result     -> get_job_result
/// GET    /history             -> list_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(jobs::submit_generation))
        .route("/job/{id}", get(jobs::get_job))
        .route("/job/{id}/result", get(jobs::get_job_result))
        .route("/history", get(jobs::list_history))
}
