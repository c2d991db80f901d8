/// LLM Client: the single point of entry for every Gemini call in Coverly.
///
/// No other module talks to the generative backend directly; generation code
/// depends on the `TextGenerator` trait so tests can substitute a stub.
///
/// Calls are never retried. A failure is reported to the user, who decides
/// whether to submit again.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::credentials::CredentialStore;

pub mod prompts;

const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.9;
const MAX_OUTPUT_TOKENS: u32 = 2048;
const FINISH_MAX_TOKENS: &str = "MAX_TOKENS";

pub const GENERIC_FAILURE: &str =
    "We couldn't reach the Gemini API right now. Double-check your API key and try again.";
const UNEXPECTED_API_ERROR: &str = "Gemini returned an unexpected error.";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Missing Gemini API key. Save one in the app or set GEMINI_API_KEY in your .env file.")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Gemini stopped early because the response hit its token limit. Try shortening the details or refining your request.")]
    Truncated,

    #[error("The AI did not return any text. Try refining the details and try again.")]
    EmptyOutput,
}

impl LlmError {
    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            LlmError::Http(_) => GENERIC_FAILURE.to_string(),
            LlmError::Api { message, .. } if message.trim().is_empty() => {
                GENERIC_FAILURE.to_string()
            }
            LlmError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: Option<String>,
}

fn request_body(prompt: &str) -> GenerateContentRequest<'static> {
    GenerateContentRequest {
        contents: vec![RequestContent {
            role: "user",
            parts: vec![RequestPart {
                text: prompts::with_preamble(prompt),
            }],
        }],
        generation_config: GenerationConfig {
            temperature: TEMPERATURE,
            top_p: TOP_P,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        },
    }
}

/// Joins the first candidate's text parts, classifying empty output.
pub fn candidate_text(response: &GenerateContentResponse) -> Result<String, LlmError> {
    let Some(candidate) = response.candidates.first() else {
        return Err(LlmError::EmptyOutput);
    };
    let text: String = candidate
        .content
        .iter()
        .flat_map(|c| c.parts.iter())
        .filter_map(|p| p.text.as_deref())
        .collect();
    let text = text.trim();
    if !text.is_empty() {
        return Ok(text.to_string());
    }
    match candidate.finish_reason.as_deref() {
        Some(FINISH_MAX_TOKENS) => Err(LlmError::Truncated),
        _ => Err(LlmError::EmptyOutput),
    }
}

/// Best message for a non-success response: the backend's own
/// `error.message`, then the status reason phrase, then a generic line.
fn api_error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<GeminiError>(body)
        .ok()
        .and_then(|e| e.error.message)
        .filter(|m| !m.trim().is_empty())
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| UNEXPECTED_API_ERROR.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Anything that can turn a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Gemini `generateContent` client.
///
/// The API key is resolved per call: a key saved in the credential store
/// wins over the one from the environment.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    env_key: Option<String>,
    store: CredentialStore,
}

impl GeminiClient {
    pub fn new(config: &Config, store: CredentialStore) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.llm_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
            env_key: config.gemini_api_key.clone(),
            store,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn api_key(&self) -> Option<String> {
        self.store
            .load()
            .or_else(|| self.env_key.clone())
            .filter(|k| !k.trim().is_empty())
    }

    fn endpoint(&self, api_key: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self.api_key().ok_or(LlmError::MissingCredential)?;

        let response = self
            .client
            .post(self.endpoint(&api_key))
            .json(&request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = api_error_message(status, &body);
            warn!(status = status.as_u16(), "Gemini returned an error: {message}");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload: GenerateContentResponse = response.json().await?;
        let text = candidate_text(&payload)?;
        debug!(model = %self.model, chars = text.len(), "Gemini call succeeded");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::path::PathBuf;

    fn response(value: Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    fn test_config(base_url: String, key: Option<&str>) -> Config {
        Config {
            gemini_api_key: key.map(str::to_string),
            gemini_model: "gemini-test".to_string(),
            gemini_base_url: base_url,
            llm_timeout_secs: 5,
            data_dir: PathBuf::from("."),
            port: 0,
            rust_log: "info".to_string(),
        }
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(request_body("Write a resume.")).unwrap();
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            "You are Coverly, an expert writing assistant specializing in resumes and cover letters.\n\nWrite a resume."
        );
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 2048);
        assert!((body["generationConfig"]["topP"].as_f64().unwrap() - 0.9).abs() < 1e-6);
        assert!((body["generationConfig"]["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_candidate_text_joins_parts() {
        let r = response(json!({
            "candidates": [{"content": {"parts": [{"text": " Dear "}, {"text": "team, "}]}}]
        }));
        assert_eq!(candidate_text(&r).unwrap(), "Dear team,");
    }

    #[test]
    fn test_truncated_and_empty_are_distinct() {
        let truncated = response(json!({"candidates": [{"finishReason": "MAX_TOKENS"}]}));
        assert!(matches!(candidate_text(&truncated), Err(LlmError::Truncated)));

        let blank = response(json!({"candidates": [{"content": {"parts": [{"text": "  "}]}, "finishReason": "STOP"}]}));
        assert!(matches!(candidate_text(&blank), Err(LlmError::EmptyOutput)));

        assert!(matches!(candidate_text(&response(json!({}))), Err(LlmError::EmptyOutput)));
    }

    #[test]
    fn test_api_error_message_fallbacks() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid."}}"#;
        assert_eq!(api_error_message(StatusCode::BAD_REQUEST, body), "API key not valid.");
        assert_eq!(api_error_message(StatusCode::FORBIDDEN, "<html>"), "Forbidden");
        let odd = StatusCode::from_u16(599).unwrap();
        assert_eq!(api_error_message(odd, ""), UNEXPECTED_API_ERROR);
    }

    #[test]
    fn test_user_messages() {
        let api = LlmError::Api {
            status: 400,
            message: "API key not valid.".to_string(),
        };
        assert_eq!(api.user_message(), "API key not valid.");
        let blank = LlmError::Api {
            status: 500,
            message: String::new(),
        };
        assert_eq!(blank.user_message(), GENERIC_FAILURE);
        assert!(LlmError::Truncated.user_message().contains("token limit"));
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_generate_against_local_backend() {
        let router = Router::new().route(
            "/models/:call",
            post(|Json(body): Json<Value>| async move {
                let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default();
                Json(json!({
                    "candidates": [{"content": {"parts": [{"text": format!("echo: {}", prompt.len())}]}}]
                }))
            }),
        );
        let base = serve(router).await;
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path()).with_rounds(10);
        let client = GeminiClient::new(&test_config(base, Some("env-key")), store).unwrap();

        let text = client.generate("hi").await.unwrap();
        assert!(text.starts_with("echo: "));
    }

    #[tokio::test]
    async fn test_generate_surfaces_backend_error_message() {
        let router = Router::new().route(
            "/models/:call",
            post(|| async {
                (
                    axum::http::StatusCode::BAD_REQUEST,
                    Json(json!({"error": {"message": "API key not valid."}})),
                )
            }),
        );
        let base = serve(router).await;
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path()).with_rounds(10);
        let client = GeminiClient::new(&test_config(base, Some("bad")), store).unwrap();

        match client.generate("hi").await {
            Err(LlmError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid.");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_any_request() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path()).with_rounds(10);
        let client =
            GeminiClient::new(&test_config("http://127.0.0.1:9".to_string(), None), store).unwrap();
        assert!(matches!(
            client.generate("hi").await,
            Err(LlmError::MissingCredential)
        ));
    }

    #[test]
    fn test_stored_key_wins_over_environment() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path()).with_rounds(10);
        store.save("stored-key").unwrap();
        let client =
            GeminiClient::new(&test_config("http://localhost/v1beta/".to_string(), Some("env-key")), store)
                .unwrap();
        assert_eq!(
            client.endpoint(&client.api_key().unwrap()),
            "http://localhost/v1beta/models/gemini-test:generateContent?key=stored-key"
        );
    }
}
