//! In-memory job store.
//!
//! Jobs live only for the lifetime of the process. The queue worker mutates
//! records through [`JobStore::update`] while the polling endpoints read
//! snapshots.

use std::collections::HashMap;

use pomelli_core::job::Job;
use pomelli_core::types::JobId;
use tokio::sync::RwLock;

/// Number of jobs returned by the history endpoint when no limit is given.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
#[derive(Debug, Default)]
pub struct JobStore {
    jobs: RwLock<HashMap<JobId, Job>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a job.
    pub async fn save(&self, job: Job) {
        self.jobs.write().await.insert(job.id.clone(), job);
    }

    /// Snapshot of a single job.
    pub async fn get(&self, id: &str) -> Option<Job> {
        self.jobs.read().await.get(id).cloned()
    }

    /// Mutate a job in place and return the updated snapshot.
    ///
    /// Returns `None` (and does not call `f`) if the job does not exist.
    pub async fn update<F>(&self, id: &str, f: F) -> Option<Job>
    where
        F: FnOnce(&mut Job),
    {
        let mut jobs = self.jobs.write().await;
        let job = jobs.get_mut(id)?;
        f(job);
        Some(job.clone())
    }

    /// Most recently created jobs first, at most `limit`.
    pub async fn list(&self, limit: usize) -> Vec<Job> {
        let mut jobs: Vec<Job> = self.jobs.read().await.values().cloned().collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        jobs.truncate(limit);
        jobs
    }

    /// Number of stored jobs.
    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use pomelli_core::job::JobStatus;

    use super::*;

    fn job_created_at(offset_secs: i64) -> Job {
        let mut job = Job::new("text", "default", 1);
        job.created_at = chrono::Utc::now() + Duration::seconds(offset_secs);
        job
    }

    #[tokio::test]
    async fn save_and_get() {
        let store = JobStore::new();
        assert!(store.is_empty().await);

        let job = Job::new("hello", "default", 2);
        store.save(job.clone()).await;

        assert_eq!(store.get(&job.id).await, Some(job));
        assert_eq!(store.get("missing").await, None);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn save_replaces_existing() {
        let store = JobStore::new();
        let mut job = Job::new("hello", "default", 2);
        store.save(job.clone()).await;

        job.fail("boom");
        store.save(job.clone()).await;

        assert_eq!(store.len().await, 1);
        assert_eq!(store.get(&job.id).await.unwrap().status, JobStatus::Failed);
    }

    #[tokio::test]
    async fn update_mutates_in_place() {
        let store = JobStore::new();
        let job = Job::new("hello", "default", 2);
        store.save(job.clone()).await;

        let updated = store
            .update(&job.id, |j| j.mark_running("default"))
            .await
            .unwrap();
        assert_eq!(updated.status, JobStatus::Running);
        assert_eq!(store.get(&job.id).await.unwrap().status, JobStatus::Running);
    }

    #[tokio::test]
    async fn update_missing_returns_none() {
        let store = JobStore::new();
        let mut called = false;
        assert!(store.update("missing", |_| called = true).await.is_none());
        assert!(!called);
    }

    #[tokio::test]
    async fn list_is_newest_first_and_limited() {
        let store = JobStore::new();
        let oldest = job_created_at(-20);
        let middle = job_created_at(-10);
        let newest = job_created_at(0);
        for job in [&middle, &oldest, &newest] {
            store.save(job.clone()).await;
        }

        let ids: Vec<_> = store.list(10).await.into_iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![newest.id.clone(), middle.id.clone(), oldest.id.clone()]);

        let limited = store.list(2).await;
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].id, newest.id);
    }
}
