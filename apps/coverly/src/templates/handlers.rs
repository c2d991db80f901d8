//! Axum route handlers for the template registry.

use axum::{
    extract::{Path, Query},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::export::export_resume;
use crate::templates::screen::html_page;
use crate::templates::{list_templates, RenderTarget, TemplateId, TemplateSummary};

#[derive(Debug, Default, Deserialize)]
pub struct PreviewQuery {
    #[serde(default)]
    pub target: RenderTarget,
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateSummary>> {
    Json(list_templates())
}

/// GET /api/v1/templates/:id/preview?target=screen|document
///
/// Renders the template's sample document: an HTML page for `screen`, a PDF
/// for `document`. Unknown ids preview the default template.
pub async fn handle_preview(
    Path(id): Path<String>,
    Query(query): Query<PreviewQuery>,
) -> Result<Response, AppError> {
    let template = TemplateId::resolve(&id);
    let sample = template.sample();
    match query.target {
        RenderTarget::Screen => {
            let page = html_page(template.name(), &template.illustrate(&sample));
            Ok(Html(page).into_response())
        }
        RenderTarget::Document => Ok(export_resume(template.as_str(), &sample)?.into_response()),
    }
}
