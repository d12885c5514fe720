//! Queue handler that runs one generation job.

use std::sync::Arc;

use async_trait::async_trait;
use pomelli_adapters::TextAdapter;
use pomelli_core::error::CoreError;
use pomelli_core::templates::find_template;
use pomelli_core::types::JobId;

use crate::engine::queue::{BoxError, TaskHandler};
use crate::store::JobStore;

/// Error recorded on a job whose adapter call panicked.
pub const GENERATION_PANICKED: &str = "Generation panicked";

/// Resolves the job's template, calls the adapter and records the outcome
/// on the stored job.
///
/// Adapter failures and panics are written to the job (`failed` + message)
/// and are not reported to the queue. Only an unknown job id is returned as an error.
pub struct GenerationProcessor {
    store: Arc<JobStore>,
    adapter: Arc<dyn TextAdapter>,
}

impl GenerationProcessor {
    pub fn new(store: Arc<JobStore>, adapter: Arc<dyn TextAdapter>) -> Self {
        Self { store, adapter }
    }
}

#[async_trait]
impl TaskHandler<JobId> for GenerationProcessor {
    async fn handle(&self, job_id: JobId) -> Result<(), BoxError> {
        let job = self
            .store
            .update(&job_id, |job| {
                let template = find_template(&job.template_id);
                job.mark_running(template.id);
            })
            .await
            .ok_or_else(|| CoreError::NotFound {
                entity: "Job",
                id: job_id.clone(),
            })?;
        // `template_id` now holds the resolved id.
        let template = find_template(&job.template_id);

        tracing::info!(
            job_id = %job.id,
            template_id = template.id,
            n = job.n,
            adapter = self.adapter.name(),
            "Generation started",
        );

        // Run the adapter on its own task so a panic still settles the job.
        let adapter = Arc::clone(&self.adapter);
        let (input, n) = (job.input.clone(), job.n);
        let outcome =
            tokio::spawn(async move { adapter.generate_variations(&input, template, n).await })
                .await;

        match outcome {
            Ok(Ok(results)) => {
                let count = results.len();
                self.store.update(&job_id, |job| job.complete(results)).await;
                tracing::info!(job_id = %job_id, results = count, "Generation finished");
            }
            Ok(Err(e)) => {
                tracing::error!(job_id = %job_id, error = %e, "Generation failed");
                self.store.update(&job_id, |job| job.fail(e.to_string())).await;
            }
            Err(e) => {
                tracing::error!(job_id = %job_id, error = %e, "Generation panicked");
                self.store
                    .update(&job_id, |job| job.fail(GENERATION_PANICKED))
                    .await;
            }
        }

        Ok(())
    }
}
