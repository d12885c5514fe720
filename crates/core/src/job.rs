//! Generation job record, lifecycle transitions, and submission rules.
//!
//! A job moves `queued -> running -> done | failed`. `done` and `failed` are
//! terminal. The record is mutated in place by the queue worker and read by
//! the polling endpoints.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{JobId, Timestamp};

/// Number of variations produced when the client does not ask for a count.
pub const DEFAULT_VARIATIONS: u32 = 3;
/// Lower bound on requested variations.
pub const MIN_VARIATIONS: u32 = 1;
/// Upper bound on requested variations.
pub const MAX_VARIATIONS: u32 = 10;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Running,
    Done,
    Failed,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Running => "running",
            JobStatus::Done => "done",
            JobStatus::Failed => "failed",
        }
    }

    /// Whether the job can no longer change state.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Failed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Job
// ---------------------------------------------------------------------------

/// A queued text-generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub input: String,
    /// Requested template id. Replaced with the resolved id once the job runs.
    pub template_id: String,
    /// Number of variations to generate.
    pub n: u32,
    pub status: JobStatus,
    pub results: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Job {
    /// Create a new `queued` job with a fresh id.
    pub fn new(input: impl Into<String>, template_id: impl Into<String>, n: u32) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            input: input.into(),
            template_id: template_id.into(),
            n,
            status: JobStatus::Queued,
            results: Vec::new(),
            created_at: now,
            updated_at: now,
            error: None,
        }
    }

    /// Transition to `running`, recording the template actually used.
    pub fn mark_running(&mut self, resolved_template_id: &str) {
        self.template_id = resolved_template_id.to_string();
        self.status = JobStatus::Running;
        self.touch();
    }

    /// Transition to `done` with the generated variations.
    pub fn complete(&mut self, results: Vec<String>) {
        self.results = results;
        self.status = JobStatus::Done;
        self.touch();
    }

    /// Transition to `failed` with a human-readable reason.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.status = JobStatus::Failed;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = chrono::Utc::now();
    }
}

// ---------------------------------------------------------------------------
// Submission rules
// ---------------------------------------------------------------------------

/// Reject missing or whitespace-only input.
pub fn validate_input(input: Option<&str>) -> Result<&str, CoreError> {
    match input {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(CoreError::Validation("input is required".into())),
    }
}

/// Apply the default variation count and clamp into
/// [`MIN_VARIATIONS`]..=[`MAX_VARIATIONS`].
pub fn clamp_variations(n: Option<i64>) -> u32 {
    let requested = n.unwrap_or(i64::from(DEFAULT_VARIATIONS));
    requested.clamp(i64::from(MIN_VARIATIONS), i64::from(MAX_VARIATIONS)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_job_is_queued() {
        let job = Job::new("hello", "default", 2);
        assert_eq!(job.status, JobStatus::Queued);
        assert!(job.results.is_empty());
        assert_eq!(job.created_at, job.updated_at);
        assert!(job.error.is_none());
        assert!(!job.id.is_empty());
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(Job::new("a", "default", 1).id, Job::new("a", "default", 1).id);
    }

    #[test]
    fn lifecycle_to_done() {
        let mut job = Job::new("hello", "unknown-template", 2);
        job.mark_running("default");
        assert_eq!(job.status, JobStatus::Running);
        assert_eq!(job.template_id, "default");

        job.complete(vec!["a".into(), "b".into()]);
        assert_eq!(job.status, JobStatus::Done);
        assert_eq!(job.results.len(), 2);
        assert!(job.updated_at >= job.created_at);
    }

    #[test]
    fn lifecycle_to_failed() {
        let mut job = Job::new("hello", "default", 1);
        job.mark_running("default");
        job.fail("boom");
        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(job.error.as_deref(), Some("boom"));
        assert!(job.status.is_terminal());
    }

    #[test]
    fn serializes_camel_case_and_omits_missing_error() {
        let job = Job::new("hello", "playful", 3);
        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["templateId"], "playful");
        assert_eq!(json["status"], "queued");
        assert!(json["createdAt"].is_string());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn input_validation() {
        assert_eq!(validate_input(Some(" text ")).unwrap(), " text ");
        assert!(validate_input(Some("   \n")).is_err());
        let err = validate_input(None).unwrap_err();
        assert!(err.to_string().contains("input is required"));
    }

    #[test]
    fn variations_default_and_clamp() {
        assert_eq!(clamp_variations(None), DEFAULT_VARIATIONS);
        assert_eq!(clamp_variations(Some(0)), 1);
        assert_eq!(clamp_variations(Some(-5)), 1);
        assert_eq!(clamp_variations(Some(7)), 7);
        assert_eq!(clamp_variations(Some(50)), 10);
    }

    #[test]
    fn only_done_and_failed_are_terminal() {
        assert!(!JobStatus::Queued.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Done.is_terminal());
        assert_eq!(JobStatus::Running.to_string(), "running");
    }
}
