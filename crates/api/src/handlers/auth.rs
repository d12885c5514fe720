//! Handler for the `/login` stub.
//!
//! Mounted only when auth is enabled. There are no accounts: a caller that
//! knows the shared `AUTH_TOKEN` receives a short-lived JWT.

use axum::extract::State;
use axum::Json;
use pomelli_core::error::CoreError;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_token, TOKEN_SUBJECT};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub jwt: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/login
///
/// Exchange the shared token for a JWT.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid token".into()));

    let jwt_config = state.config.auth.as_ref().ok_or_else(invalid)?;
    if !jwt_config.accepts_login(input.token.as_deref()) {
        tracing::warn!("Login rejected");
        return Err(invalid());
    }

    let jwt = generate_token(TOKEN_SUBJECT, jwt_config)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(subject = TOKEN_SUBJECT, "Login succeeded");
    Ok(Json(LoginResponse { jwt }))
}
