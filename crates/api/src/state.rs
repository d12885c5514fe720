use std::sync::Arc;

use pomelli_adapters::TextAdapter;
use pomelli_brand::{BaserowClient, BrandError, BrandScanner};
use pomelli_core::types::JobId;

use crate::config::ServerConfig;
use crate::engine::processor::GenerationProcessor;
use crate::engine::queue::InMemoryQueue;
use crate::store::JobStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (auth, Baserow target, limits).
    pub config: Arc<ServerConfig>,
    /// Every job submitted since startup.
    pub jobs: Arc<JobStore>,
    /// Sequential generation queue; payload is the job id.
    pub queue: InMemoryQueue<JobId>,
    /// Page fetcher for brand scans.
    pub scanner: BrandScanner,
    /// Baserow row exporter.
    pub baserow: BaserowClient,
}

impl AppState {
    /// Wire the job store, queue and generation processor around `adapter`.
    pub fn new(config: ServerConfig, adapter: Arc<dyn TextAdapter>) -> Result<Self, BrandError> {
        let jobs = Arc::new(JobStore::new());
        let queue = InMemoryQueue::new(GenerationProcessor::new(Arc::clone(&jobs), adapter));

        Ok(Self {
            config: Arc::new(config),
            jobs,
            queue,
            scanner: BrandScanner::new()?,
            baserow: BaserowClient::new()?,
        })
    }
}
