//! Optional export of brand profiles to a Baserow table.
//!
//! Sync never returns an error: every outcome, including transport failures,
//! is reported as a [`BaserowSyncResult`] so the caller can embed it in its
//! own response.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::profile::BrandProfile;
use crate::BrandError;

/// Default Baserow API host when `BASEROW_API_URL` is not set.
pub const DEFAULT_BASEROW_API_URL: &str = "https://api.baserow.io";

/// Error bodies are truncated to this many characters.
const MAX_ERROR_BODY_CHARS: usize = 500;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// `reason` reported when no Baserow configuration is available.
pub const REASON_MISSING_CONFIG: &str = "missing-config";
/// `reason` reported when the caller did not ask for a sync.
pub const REASON_DISABLED: &str = "disabled";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, Eq)]
pub struct BaserowConfig {
    pub api_token: String,
    pub api_url: String,
    pub table_id: String,
}

impl std::fmt::Debug for BaserowConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaserowConfig")
            .field("api_token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("table_id", &self.table_id)
            .finish()
    }
}

impl BaserowConfig {
    /// Build a config from optional parts. Returns `None` unless both the
    /// token and the table id are non-empty.
    pub fn resolve(
        api_token: Option<String>,
        api_url: Option<String>,
        table_id: Option<String>,
    ) -> Option<Self> {
        let api_token = api_token.filter(|v| !v.is_empty())?;
        let table_id = table_id.filter(|v| !v.is_empty())?;
        let api_url = api_url
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASEROW_API_URL.to_string());
        Some(Self {
            api_token,
            api_url,
            table_id,
        })
    }

    /// Load from the environment.
    ///
    /// | Env Var                  | Required | Default                  |
    /// |--------------------------|----------|--------------------------|
    /// | `BASEROW_API_TOKEN`      | yes      | --                       |
    /// | `BASEROW_API_URL`        | no       | `https://api.baserow.io` |
    /// | `BASEROW_BRAND_TABLE_ID` | yes      | --                       |
    pub fn from_env() -> Option<Self> {
        Self::resolve(
            std::env::var("BASEROW_API_TOKEN").ok(),
            std::env::var("BASEROW_API_URL").ok(),
            std::env::var("BASEROW_BRAND_TABLE_ID").ok(),
        )
    }

    /// Row-creation endpoint for the configured table.
    pub fn rows_endpoint(&self) -> String {
        format!(
            "{}/api/database/rows/table/{}/?user_field_names=true",
            self.api_url.trim_end_matches('/'),
            self.table_id
        )
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaserowSyncStatus {
    Skipped,
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaserowSyncResult {
    pub status: BaserowSyncStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BaserowSyncResult {
    pub fn skipped(reason: &str) -> Self {
        Self {
            status: BaserowSyncStatus::Skipped,
            reason: Some(reason.to_string()),
            error: None,
        }
    }

    pub fn success() -> Self {
        Self {
            status: BaserowSyncStatus::Success,
            reason: None,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: BaserowSyncStatus::Failed,
            reason: None,
            error: Some(error.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Map a profile to the Baserow row shape (user field names).
pub fn profile_row(profile: &BrandProfile) -> serde_json::Value {
    json!({
        "Website": profile.url,
        "Title": profile.title.as_deref().unwrap_or_default(),
        "Description": profile.description.as_deref().unwrap_or_default(),
        "Colors": profile.colors.join(", "),
        "Fonts": profile.font_families.join(", "),
        "Logos": profile.logo_urls.join(", "),
        "Images": profile.image_urls.join(", "),
        "FetchedAt": profile.fetched_at,
    })
}

/// Posts brand profiles as Baserow rows. Cheap to clone.
#[derive(Debug, Clone)]
pub struct BaserowClient {
    client: reqwest::Client,
}

impl BaserowClient {
    pub fn new() -> Result<Self, BrandError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    /// Create one row for `profile`. Skips when `config` is `None`.
    pub async fn sync_profile(
        &self,
        profile: &BrandProfile,
        config: Option<&BaserowConfig>,
    ) -> BaserowSyncResult {
        let Some(config) = config else {
            return BaserowSyncResult::skipped(REASON_MISSING_CONFIG);
        };

        let endpoint = config.rows_endpoint();
        let sent = self
            .client
            .post(&endpoint)
            .header(AUTHORIZATION, format!("Token {}", config.api_token))
            .json(&profile_row(profile))
            .send()
            .await;

        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(endpoint = %endpoint, error = %e, "Baserow request failed");
                return BaserowSyncResult::failed(e.to_string());
            }
        };

        let status = response.status();
        if status.is_success() {
            tracing::info!(url = %profile.url, table_id = %config.table_id, "Brand profile synced to Baserow");
            return BaserowSyncResult::success();
        }

        let body: String = response
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(MAX_ERROR_BODY_CHARS)
            .collect();
        let mut message = format!("Baserow sync failed: {status}");
        if !body.is_empty() {
            message.push_str(" - ");
            message.push_str(&body);
        }
        tracing::warn!(endpoint = %endpoint, %status, "Baserow rejected brand profile row");
        BaserowSyncResult::failed(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::extract_brand_profile;

    #[test]
    fn resolve_requires_token_and_table() {
        assert!(BaserowConfig::resolve(None, None, Some("1".into())).is_none());
        assert!(BaserowConfig::resolve(Some("t".into()), None, None).is_none());
        assert!(BaserowConfig::resolve(Some("".into()), None, Some("".into())).is_none());

        let config = BaserowConfig::resolve(Some("t".into()), None, Some("7".into())).unwrap();
        assert_eq!(config.api_url, DEFAULT_BASEROW_API_URL);
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let config = BaserowConfig::resolve(
            Some("t".into()),
            Some("https://baserow.example/".into()),
            Some("123".into()),
        )
        .unwrap();
        assert_eq!(
            config.rows_endpoint(),
            "https://baserow.example/api/database/rows/table/123/?user_field_names=true"
        );
    }

    #[test]
    fn debug_redacts_token() {
        let config =
            BaserowConfig::resolve(Some("secret-token".into()), None, Some("1".into())).unwrap();
        assert!(!format!("{config:?}").contains("secret-token"));
    }

    #[test]
    fn row_joins_lists_and_blanks_missing_text() {
        let profile = extract_brand_profile(
            "example.com",
            "<style>a { color: #abc; font-family: Inter, serif }</style>",
        );
        let row = profile_row(&profile);
        assert_eq!(row["Website"], "https://example.com");
        assert_eq!(row["Title"], "");
        assert_eq!(row["Colors"], "#AABBCC");
        assert_eq!(row["Fonts"], "Inter, serif");
        assert!(row["FetchedAt"].is_string());
    }

    #[tokio::test]
    async fn skips_without_config() {
        let profile = extract_brand_profile("example.com", "");
        let result = BaserowClient::new()
            .unwrap()
            .sync_profile(&profile, None)
            .await;
        assert_eq!(result, BaserowSyncResult::skipped(REASON_MISSING_CONFIG));
    }

    #[test]
    fn result_serialization_omits_empty_fields() {
        let json = serde_json::to_value(BaserowSyncResult::success()).unwrap();
        assert_eq!(json, json!({ "status": "success" }));

        let json = serde_json::to_value(BaserowSyncResult::skipped(REASON_DISABLED)).unwrap();
        assert_eq!(json, json!({ "status": "skipped", "reason": "disabled" }));
    }
}
