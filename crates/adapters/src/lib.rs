//! Pluggable text-generation adapters.
//!
//! An adapter turns `(input, template, n)` into `n` generated strings.
//! [`resolve_adapter`] picks the implementation once at startup:
//!
//! - [`OpenAiAdapter`] when an API key is configured (placeholder, no network),
//! - [`MockAdapter`] otherwise.

pub mod mock;
pub mod openai;

use std::sync::Arc;

use async_trait::async_trait;
use pomelli_core::templates::Template;

pub use mock::MockAdapter;
pub use openai::OpenAiAdapter;

/// Error type for adapter construction and generation failures.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// The adapter needs an API key that was not supplied.
    #[error("{0} is required for the OpenAI adapter")]
    MissingApiKey(&'static str),
}

/// Produces text variations for a template.
#[async_trait]
pub trait TextAdapter: Send + Sync {
    /// Short identifier used in logs (e.g. `"mock"`).
    fn name(&self) -> &'static str;

    /// Generate exactly `n` variations of `input` shaped by `template`.
    async fn generate_variations(
        &self,
        input: &str,
        template: &Template,
        n: u32,
    ) -> Result<Vec<String>, AdapterError>;
}

/// Select the adapter for this process.
///
/// A non-empty `openai_api_key` selects the OpenAI adapter; anything else
/// falls back to the mock.
pub fn resolve_adapter(openai_api_key: Option<&str>) -> Arc<dyn TextAdapter> {
    match openai_api_key.map(str::trim).filter(|k| !k.is_empty()) {
        Some(key) => match OpenAiAdapter::new(key) {
            Ok(adapter) => Arc::new(adapter),
            Err(e) => {
                tracing::warn!(error = %e, "Falling back to mock adapter");
                Arc::new(MockAdapter::new())
            }
        },
        None => Arc::new(MockAdapter::new()),
    }
}
