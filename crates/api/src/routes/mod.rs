pub mod auth;
pub mod brand;
pub mod health;
pub mod jobs;

use axum::routing::get;
use axum::Router;

use crate::config::ServerConfig;
use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login                  exchange shared token for a JWT (auth enabled only)
///
/// /templates              list prompt templates
///
/// /generate               submit a generation job (POST)
/// /job/{id}               job status
/// /job/{id}/result        generated variations
/// /history                recent jobs
///
/// /brand-scan             scan a website for brand assets (POST)
/// ```
///
/// When auth is enabled every route except `/login` requires a bearer token.
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    let mut router = Router::new()
        .route("/templates", get(handlers::templates::list_templates))
        .merge(jobs::router())
        .merge(brand::router());

    if config.auth.is_some() {
        router = router.merge(auth::router());
    }

    router
}
