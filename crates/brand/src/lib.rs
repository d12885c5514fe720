//! Brand asset scanning.
//!
//! - [`profile`] -- regex-based extraction of a [`BrandProfile`] from HTML.
//! - [`scanner`] -- fetches a page and extracts its profile.
//! - [`baserow`] -- optional export of a profile as a Baserow table row.

pub mod baserow;
mod html;
pub mod profile;
pub mod scanner;

pub use baserow::{BaserowClient, BaserowConfig, BaserowSyncResult, BaserowSyncStatus};
pub use profile::{ensure_http_url, extract_brand_profile, BrandProfile};
pub use scanner::BrandScanner;

/// Error type for page fetches.
#[derive(Debug, thiserror::Error)]
pub enum BrandError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The page responded with a non-2xx status.
    #[error("Failed to fetch {url}: {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },
}
