//! Handler for the `/brand-scan` resource.

use axum::extract::State;
use axum::Json;
use pomelli_brand::baserow::REASON_DISABLED;
use pomelli_brand::{BaserowSyncResult, BrandProfile};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /brand-scan`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandScanRequest {
    pub url: Option<String>,
    /// Also export the profile to Baserow. Off unless `true`.
    #[serde(default)]
    pub sync_to_baserow: bool,
}

#[derive(Debug, Serialize)]
pub struct BrandScanResponse {
    pub profile: BrandProfile,
    pub baserow: BaserowSyncResult,
}

/// POST /api/v1/brand-scan
///
/// Fetch the page, extract its brand profile and optionally export it.
/// A fetch failure is reported as 502; the Baserow outcome never fails the
/// request.
pub async fn scan_brand(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<BrandScanRequest>,
) -> AppResult<Json<BrandScanResponse>> {
    let url = input
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::BadRequest("url is required".into()))?;

    let profile = state
        .scanner
        .scan(url)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    let baserow = if input.sync_to_baserow {
        state
            .baserow
            .sync_profile(&profile, state.config.baserow.as_ref())
            .await
    } else {
        BaserowSyncResult::skipped(REASON_DISABLED)
    };

    tracing::info!(
        url = %profile.url,
        colors = profile.colors.len(),
        logos = profile.logo_urls.len(),
        baserow = ?baserow.status,
        "Brand scan completed",
    );

    Ok(Json(BrandScanResponse { profile, baserow }))
}
