//! Axum route handlers for generation and the session built from it.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::ExportedFile;
use crate::generation::generator::{generate_document, GenerateRequest};
use crate::generation::session::SessionSnapshot;
use crate::models::form::{DocumentKind, FormRecord, FormSection};
use crate::state::AppState;
use crate::templates::{render, RenderTarget, Rendered};

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct SelectRequest {
    pub kind: Option<DocumentKind>,
    pub template_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RenderRequest {
    pub template_id: Option<String>,
    #[serde(default)]
    pub target: RenderTarget,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportRequest {
    pub template_id: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/generate
///
/// Composes the prompt for `kind`, calls the backend and stores the result.
/// 409 while another generation is running.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let snapshot = generate_document(
        state.generator.as_ref(),
        &state.session,
        &state.in_flight,
        request,
    )
    .await?;
    Ok(Json(snapshot))
}

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(SessionSnapshot::capture(&state.session, &state.in_flight))
}

/// PATCH /api/v1/session
pub async fn handle_select(
    State(state): State<AppState>,
    Json(request): Json<SelectRequest>,
) -> Json<SessionSnapshot> {
    state
        .session
        .lock()
        .select(request.kind, request.template_id.as_deref());
    Json(SessionSnapshot::capture(&state.session, &state.in_flight))
}

/// DELETE /api/v1/session
pub async fn handle_clear(State(state): State<AppState>) -> Json<SessionSnapshot> {
    state.session.lock().clear();
    Json(SessionSnapshot::capture(&state.session, &state.in_flight))
}

/// GET /api/v1/session/text
///
/// Current output in copy-to-clipboard form.
pub async fn handle_session_text(State(state): State<AppState>) -> Result<String, AppError> {
    let text = state.session.lock().copy_text()?;
    Ok(text)
}

// ────────────────────────────────────────────────────────────────────────────
// Draft form
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/form
pub async fn handle_get_form(State(state): State<AppState>) -> Json<FormRecord> {
    Json(state.session.lock().form.clone())
}

/// PUT /api/v1/form
pub async fn handle_put_form(
    State(state): State<AppState>,
    Json(form): Json<FormRecord>,
) -> Json<FormRecord> {
    let mut session = state.session.lock();
    session.form = form;
    Json(session.form.clone())
}

/// POST /api/v1/form/:section
///
/// Appends a blank experience or education row.
pub async fn handle_add_row(
    State(state): State<AppState>,
    Path(section): Path<FormSection>,
) -> Json<FormRecord> {
    let mut session = state.session.lock();
    let id = session.form.add_row(section);
    debug!(?section, %id, "Added form row");
    Json(session.form.clone())
}

/// DELETE /api/v1/form/:section/:id
///
/// Removing the last row of a list, or an unknown id, leaves the form as is.
pub async fn handle_remove_row(
    State(state): State<AppState>,
    Path((section, id)): Path<(FormSection, Uuid)>,
) -> Json<FormRecord> {
    let mut session = state.session.lock();
    let removed = session.form.remove_row(section, id);
    debug!(?section, %id, removed, "Remove form row");
    Json(session.form.clone())
}

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/render
///
/// Renders the current resume with the requested (or selected) template.
pub async fn handle_render(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Result<Json<Rendered>, AppError> {
    let session = state.session.lock();
    let doc = session.document.as_ref().ok_or_else(|| {
        AppError::Validation("Generate a resume before rendering it.".to_string())
    })?;
    let template_id = request
        .template_id
        .as_deref()
        .unwrap_or(session.template.as_str());
    Ok(Json(render(template_id, doc, request.target)))
}

/// POST /api/v1/export
///
/// PDF download of the current resume or cover letter.
pub async fn handle_export(
    State(state): State<AppState>,
    request: Option<Json<ExportRequest>>,
) -> Result<ExportedFile, AppError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let file = state
        .session
        .lock()
        .export(request.template_id.as_deref())?;
    Ok(file)
}
