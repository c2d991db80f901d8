use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::credentials::CredentialError;
use crate::export::ExportError;
use crate::generation::interpreter::InterpretError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("A generation is already running")]
    GenerationInFlight,

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Interpretation error: {0}")]
    Interpret(#[from] InterpretError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::GenerationInFlight => (
                StatusCode::CONFLICT,
                "GENERATION_IN_FLIGHT",
                "A draft is already being generated. Please wait for it to finish.".to_string(),
            ),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                let (status, code) = match e {
                    LlmError::MissingCredential => (StatusCode::UNAUTHORIZED, "MISSING_CREDENTIAL"),
                    LlmError::Truncated | LlmError::EmptyOutput => {
                        (StatusCode::BAD_GATEWAY, "EMPTY_OUTPUT")
                    }
                    LlmError::Http(_) | LlmError::Api { .. } => (StatusCode::BAD_GATEWAY, "LLM_ERROR"),
                };
                (status, code, e.user_message())
            }
            AppError::Interpret(e) => {
                tracing::warn!("Unparseable response: {e:?}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "UNPARSEABLE_RESPONSE",
                    e.to_string(),
                )
            }
            AppError::Export(ExportError::Empty) => (
                StatusCode::BAD_REQUEST,
                "NOTHING_TO_EXPORT",
                ExportError::Empty.to_string(),
            ),
            AppError::Export(e) => {
                tracing::error!("Export error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    "The PDF could not be created. Please try again.".to_string(),
                )
            }
            AppError::Credential(e) => {
                tracing::error!("Credential error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CREDENTIAL_ERROR",
                    "The API key could not be stored on this device.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
