//! OpenAI-backed adapter.
//!
//! Currently a placeholder: it validates that a key is present and returns
//! labelled echoes without calling the network, so the rest of the pipeline
//! can be exercised with a key configured.

use async_trait::async_trait;
use pomelli_core::templates::Template;

use crate::{AdapterError, TextAdapter};

/// Environment variable that carries the key.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

pub struct OpenAiAdapter {
    api_key: String,
}

impl OpenAiAdapter {
    /// Build the adapter. Fails if `api_key` is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self, AdapterError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AdapterError::MissingApiKey(OPENAI_API_KEY_VAR));
        }
        Ok(Self { api_key })
    }
}

impl std::fmt::Debug for OpenAiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiAdapter")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl TextAdapter for OpenAiAdapter {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate_variations(
        &self,
        input: &str,
        template: &Template,
        n: u32,
    ) -> Result<Vec<String>, AdapterError> {
        if self.api_key.is_empty() {
            return Err(AdapterError::MissingApiKey(OPENAI_API_KEY_VAR));
        }

        tracing::debug!(template = template.id, n, "OpenAI placeholder generation");

        Ok((1..=n)
            .map(|label| format!("{} (OpenAI placeholder) [v{label}]: {input}", template.name))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use pomelli_core::templates::find_template;

    use super::*;

    #[test]
    fn empty_key_is_rejected() {
        let err = OpenAiAdapter::new("").unwrap_err();
        assert!(matches!(err, AdapterError::MissingApiKey(OPENAI_API_KEY_VAR)));
    }

    #[test]
    fn debug_redacts_key() {
        let adapter = OpenAiAdapter::new("sk-secret").unwrap();
        assert!(!format!("{adapter:?}").contains("sk-secret"));
    }

    #[tokio::test]
    async fn echoes_input_with_labels() {
        let adapter = OpenAiAdapter::new("sk-test").unwrap();
        let results = adapter
            .generate_variations("hello", find_template("technical"), 2)
            .await
            .unwrap();
        assert_eq!(
            results,
            vec![
                "Technical brief (OpenAI placeholder) [v1]: hello".to_string(),
                "Technical brief (OpenAI placeholder) [v2]: hello".to_string(),
            ]
        );
    }
}
