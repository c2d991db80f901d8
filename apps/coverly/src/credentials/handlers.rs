//! Axum route handlers for the stored Gemini API key.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

pub const KEY_SAVED: &str = "Custom Gemini API key saved locally.";
pub const KEY_REMOVED: &str = "Custom Gemini API key removed.";

#[derive(Debug, Deserialize)]
pub struct SaveKeyRequest {
    #[serde(default)]
    pub api_key: String,
}

/// Never includes the key itself.
#[derive(Debug, Serialize)]
pub struct CredentialStatus {
    pub stored: bool,
    pub environment: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

fn status(state: &AppState, message: Option<&'static str>) -> CredentialStatus {
    CredentialStatus {
        stored: state.credentials.load().is_some(),
        environment: state.config.gemini_api_key.is_some(),
        message,
    }
}

/// GET /api/v1/credential
pub async fn handle_credential_status(State(state): State<AppState>) -> Json<CredentialStatus> {
    Json(status(&state, None))
}

/// PUT /api/v1/credential
///
/// Saves the key; a blank key removes the stored one.
pub async fn handle_save_credential(
    State(state): State<AppState>,
    Json(request): Json<SaveKeyRequest>,
) -> Result<Json<CredentialStatus>, AppError> {
    state.credentials.save(&request.api_key)?;
    let message = if request.api_key.trim().is_empty() {
        KEY_REMOVED
    } else {
        KEY_SAVED
    };
    state.session.lock().status = Some(message.to_string());
    Ok(Json(status(&state, Some(message))))
}

/// DELETE /api/v1/credential
pub async fn handle_clear_credential(
    State(state): State<AppState>,
) -> Result<Json<CredentialStatus>, AppError> {
    state.credentials.clear()?;
    state.session.lock().status = Some(KEY_REMOVED.to_string());
    Ok(Json(status(&state, Some(KEY_REMOVED))))
}
