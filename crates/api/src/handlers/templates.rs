//! Handler for the `/templates` resource.

use axum::Json;
use pomelli_core::templates::{Template, TEMPLATES};
use serde::Serialize;

use crate::middleware::auth::AuthUser;

#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub templates: &'static [Template],
}

/// GET /api/v1/templates
///
/// All prompt templates in display order.
pub async fn list_templates(_auth: AuthUser) -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        templates: TEMPLATES,
    })
}
