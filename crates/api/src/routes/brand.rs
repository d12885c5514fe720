use axum::routing::post;
use axum::Router;

use crate::handlers::brand;
use crate::state::AppState;

/// ```text
/// POST   /brand-scan     -> scan_brand
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/brand-scan", post(brand::scan_brand))
}
