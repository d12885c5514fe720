//! Handlers for generation jobs: submit, poll, results and history.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pomelli_core::error::CoreError;
use pomelli_core::job::{clamp_variations, validate_input, Job, JobStatus};
use pomelli_core::templates::DEFAULT_TEMPLATE_ID;
use pomelli_core::types::JobId;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::store::DEFAULT_HISTORY_LIMIT;

/// Upper bound on `?limit=` for the history endpoint.
const MAX_HISTORY_LIMIT: usize = 200;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /generate`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub input: Option<String>,
    pub template_id: Option<String>,
    /// Requested variation count; clamped to 1..=10, default 3.
    pub n: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub job_id: JobId,
}

#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub job: Job,
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub results: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub jobs: Vec<Job>,
}

/// Query parameters for `GET /history`.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_job(state: &AppState, job_id: &str) -> AppResult<Job> {
    state.jobs.get(job_id).await.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Job",
            id: job_id.to_string(),
        })
    })
}

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

/// POST /api/v1/generate
///
/// Create a `queued` job and hand it to the generation queue. Returns 202
/// with the job id; clients poll `/job/{id}` for progress.
pub async fn submit_generation(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<GenerateRequest>,
) -> AppResult<impl IntoResponse> {
    let text = validate_input(input.input.as_deref())?;
    let template_id = input
        .template_id
        .unwrap_or_else(|| DEFAULT_TEMPLATE_ID.to_string());
    let n = clamp_variations(input.n);

    let job = Job::new(text, template_id, n);
    let job_id = job.id.clone();
    state.jobs.save(job).await;
    state.queue.enqueue(job_id.clone(), job_id.clone());

    tracing::info!(
        job_id = %job_id,
        n,
        queue_depth = state.queue.size(),
        "Generation job queued",
    );

    Ok((StatusCode::ACCEPTED, Json(GenerateResponse { job_id })))
}

// ---------------------------------------------------------------------------
// Poll
// ---------------------------------------------------------------------------

/// GET /api/v1/job/{id}
pub async fn get_job(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(job_id): Path<JobId>,
) -> AppResult<Json<JobResponse>> {
    let job = find_job(&state, &job_id).await?;
    Ok(Json(JobResponse { job }))
}

/// GET /api/v1/job/{id}/result
///
/// Generated variations of a finished job. Any status other than `done`,
/// including `failed`, is a 409 carrying the current status.
pub async fn get_job_result(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(job_id): Path<JobId>,
) -> AppResult<Json<ResultsResponse>> {
    let job = find_job(&state, &job_id).await?;
    if job.status != JobStatus::Done {
        return Err(AppError::JobNotComplete(job.status));
    }
    Ok(Json(ResultsResponse {
        results: job.results,
    }))
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// GET /api/v1/history
///
/// Most recent jobs first. `?limit=` defaults to 50 and is capped at 200.
pub async fn list_history(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<HistoryQuery>,
) -> AppResult<Json<HistoryResponse>> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .min(MAX_HISTORY_LIMIT);
    let jobs = state.jobs.list(limit).await;
    Ok(Json(HistoryResponse { jobs }))
}
