//! Request extractors that enforce authentication.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from a JWT Bearer token when
//!   auth is enabled.

pub mod auth;
