//! Fetches a web page and extracts its [`BrandProfile`].

use std::time::Duration;

use reqwest::header::{ACCEPT, USER_AGENT};

use crate::profile::{ensure_http_url, extract_brand_profile, BrandProfile};
use crate::BrandError;

/// User agent sent with every page fetch.
pub const SCANNER_USER_AGENT: &str = "pomelli-lite-brand-scanner/1.0";

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml";

/// HTTP timeout for a single page fetch.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Page fetcher for brand scans. Cheap to clone.
#[derive(Debug, Clone)]
pub struct BrandScanner {
    client: reqwest::Client,
}

impl BrandScanner {
    /// Create a scanner with its own pre-configured HTTP client.
    pub fn new() -> Result<Self, BrandError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    /// Fetch `raw_url` (defaulting to `https://`) and extract its profile.
    ///
    /// Non-2xx responses are reported as [`BrandError::HttpStatus`].
    pub async fn scan(&self, raw_url: &str) -> Result<BrandProfile, BrandError> {
        let url = ensure_http_url(raw_url);

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, SCANNER_USER_AGENT)
            .header(ACCEPT, ACCEPT_HTML)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, %status, "Brand scan fetch rejected");
            return Err(BrandError::HttpStatus { url, status });
        }

        let html = response.text().await?;
        tracing::debug!(url = %url, bytes = html.len(), "Fetched page for brand scan");

        Ok(extract_brand_profile(&url, &html))
    }
}
