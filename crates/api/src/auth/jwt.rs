//! JWT generation and validation for the login stub.
//!
//! Tokens are HS256-signed and carry a fixed subject; there are no user
//! accounts. Auth is enabled only when `AUTH_SECRET` is configured.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subject embedded in every token issued by `POST /login`.
pub const TOKEN_SUBJECT: &str = "user";

/// Default token lifetime in minutes.
const DEFAULT_TOKEN_EXPIRY_MINS: i64 = 30;

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Configuration for token issuing and validation.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Shared token exchanged for a JWT at login. `None` rejects every login.
    pub login_token: Option<String>,
    /// Token lifetime in minutes.
    pub token_expiry_mins: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("login_token", &self.login_token.as_ref().map(|_| "<redacted>"))
            .field("token_expiry_mins", &self.token_expiry_mins)
            .finish()
    }
}

impl JwtConfig {
    /// Load auth configuration from environment variables.
    ///
    /// | Env Var                  | Required | Default |
    /// |--------------------------|----------|---------|
    /// | `AUTH_SECRET`            | no       | --      |
    /// | `AUTH_TOKEN`             | no       | --      |
    /// | `AUTH_TOKEN_EXPIRY_MINS` | no       | `30`    |
    ///
    /// Returns `None` (auth disabled) when `AUTH_SECRET` is unset or empty.
    ///
    /// # Panics
    ///
    /// Panics if `AUTH_TOKEN_EXPIRY_MINS` is not a valid integer.
    pub fn from_env() -> Option<Self> {
        let secret = std::env::var("AUTH_SECRET")
            .ok()
            .filter(|s| !s.is_empty())?;

        let login_token = std::env::var("AUTH_TOKEN").ok().filter(|s| !s.is_empty());

        let token_expiry_mins: i64 = std::env::var("AUTH_TOKEN_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_TOKEN_EXPIRY_MINS.to_string())
            .parse()
            .expect("AUTH_TOKEN_EXPIRY_MINS must be a valid i64");

        Some(Self {
            secret,
            login_token,
            token_expiry_mins,
        })
    }

    /// Whether `candidate` matches the configured login token.
    pub fn accepts_login(&self, candidate: Option<&str>) -> bool {
        match (&self.login_token, candidate) {
            (Some(expected), Some(given)) => !given.is_empty() && expected == given,
            _ => false,
        }
    }
}

/// Issue an HS256 token for `subject`.
pub fn generate_token(
    subject: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: subject.to_string(),
        exp: now + config.token_expiry_mins * 60,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a token, returning the embedded [`Claims`].
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}
