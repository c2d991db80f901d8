//! Document generation: orchestrates one round trip to the backend.
//!
//! Flow: in-flight guard → compose_prompt (from the posted form, or the
//!       session's draft form) → TextGenerator::generate → interpret →
//!       Session::apply → snapshot.
//!
//! Every failure is recorded on the session as a user-visible message and
//! the in-flight flag is released by the guard, so the user can simply
//! submit again.

use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::interpreter::interpret;
use crate::generation::prompts::compose_prompt;
use crate::generation::session::{InFlight, SessionSnapshot, SharedSession};
use crate::llm_client::TextGenerator;
use crate::models::form::{DocumentKind, FormRecord};

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub kind: DocumentKind,
    /// Replaces the session's draft form when present.
    #[serde(default)]
    pub form: Option<FormRecord>,
}

pub async fn generate_document(
    generator: &dyn TextGenerator,
    session: &SharedSession,
    in_flight: &InFlight,
    request: GenerateRequest,
) -> Result<SessionSnapshot, AppError> {
    let guard = in_flight.try_begin()?;
    let kind = request.kind;
    let prompt = {
        let mut state = session.lock();
        if let Some(form) = request.form {
            state.form = form;
        }
        state.begin(kind);
        compose_prompt(&state.form, kind)
    };

    info!(kind = kind.label(), prompt_chars = prompt.len(), "Generating document");

    let text = match generator.generate(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Generation failed: {e}");
            session.lock().fail(e.user_message());
            return Err(AppError::Llm(e));
        }
    };

    session.lock().apply(interpret(&text, kind))?;
    // Release before the snapshot so it reports the finished state.
    drop(guard);
    Ok(SessionSnapshot::capture(session, in_flight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::session::{DRAFT_READY, RESUME_READY};
    use crate::llm_client::LlmError;
    use crate::templates::samples;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns canned responses in order and records every prompt.
    struct ScriptedGenerator {
        replies: Mutex<Vec<Result<String, LlmError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn new(replies: Vec<Result<String, LlmError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().rev().collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies.lock().unwrap().pop().unwrap_or(Err(LlmError::EmptyOutput))
        }
    }

    fn request(kind: DocumentKind) -> GenerateRequest {
        GenerateRequest {
            kind,
            form: Some(FormRecord {
                target_role: "Data Analyst".to_string(),
                skills: "SQL".to_string(),
                ..FormRecord::default()
            }),
        }
    }

    #[tokio::test]
    async fn test_resume_generation_updates_session() {
        let reply = format!("```json\n{}\n```", serde_json::to_string(&samples::pastel()).unwrap());
        let generator = ScriptedGenerator::new(vec![Ok(reply)]);
        let session = SharedSession::default();
        let in_flight = InFlight::default();

        let snapshot = generate_document(&generator, &session, &in_flight, request(DocumentKind::Resume))
            .await
            .unwrap();
        assert_eq!(snapshot.session.document, Some(samples::pastel()));
        assert_eq!(snapshot.session.status.as_deref(), Some(RESUME_READY));
        assert!(!snapshot.generating);
        assert!(generator.prompts.lock().unwrap()[0].contains("Target Role: Data Analyst"));
    }

    #[tokio::test]
    async fn test_cover_letter_generation() {
        let generator = ScriptedGenerator::new(vec![Ok("Dear hiring team,".to_string())]);
        let session = SharedSession::default();
        let snapshot = generate_document(&generator, &session, &InFlight::default(), request(DocumentKind::CoverLetter))
            .await
            .unwrap();
        assert_eq!(snapshot.session.output.as_deref(), Some("Dear hiring team,"));
        assert_eq!(snapshot.session.status.as_deref(), Some(DRAFT_READY));
        assert!(generator.prompts.lock().unwrap()[0].contains("several years of experience"));
        assert!(!snapshot.generating);
    }

    #[tokio::test]
    async fn test_flag_is_free_for_the_next_generation() {
        let generator = ScriptedGenerator::new(vec![
            Ok("First draft.".to_string()),
            Ok("Second draft.".to_string()),
        ]);
        let session = SharedSession::default();
        let in_flight = InFlight::default();

        let first = generate_document(&generator, &session, &in_flight, request(DocumentKind::CoverLetter))
            .await
            .unwrap();
        assert!(!first.generating);
        assert!(!in_flight.is_active());

        let second = generate_document(&generator, &session, &in_flight, request(DocumentKind::CoverLetter))
            .await
            .unwrap();
        assert_eq!(second.session.output.as_deref(), Some("Second draft."));
        assert!(!second.generating);
    }

    #[tokio::test]
    async fn test_unparseable_reply_keeps_previous_document() {
        let first = serde_json::to_string(&samples::classic()).unwrap();
        let generator = ScriptedGenerator::new(vec![Ok(first), Ok("Sorry, I can't help.".to_string())]);
        let session = SharedSession::default();
        let in_flight = InFlight::default();

        generate_document(&generator, &session, &in_flight, request(DocumentKind::Resume))
            .await
            .unwrap();
        let err = generate_document(&generator, &session, &in_flight, request(DocumentKind::Resume))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Interpret(_)));
        let state = session.lock();
        assert_eq!(state.document, Some(samples::classic()));
        assert_eq!(state.last_raw_response.as_deref(), Some("Sorry, I can't help."));
        assert!(!in_flight.is_active());
    }

    #[tokio::test]
    async fn test_backend_failure_is_recorded_and_releases_flag() {
        let generator = ScriptedGenerator::new(vec![Err(LlmError::Truncated)]);
        let session = SharedSession::default();
        let in_flight = InFlight::default();

        let err = generate_document(&generator, &session, &in_flight, request(DocumentKind::Resume))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(LlmError::Truncated)));
        assert!(session.lock().error.as_deref().unwrap().contains("token limit"));
        assert!(!in_flight.is_active());
    }

    #[tokio::test]
    async fn test_missing_form_uses_the_draft_form() {
        let generator = ScriptedGenerator::new(vec![Ok("Dear team,".to_string())]);
        let session = SharedSession::default();
        session.lock().form.target_role = "Pastry Chef".to_string();

        let request = GenerateRequest {
            kind: DocumentKind::CoverLetter,
            form: None,
        };
        generate_document(&generator, &session, &InFlight::default(), request)
            .await
            .unwrap();
        assert!(generator.prompts.lock().unwrap()[0].contains("for a Pastry Chef with"));
        assert_eq!(session.lock().form.target_role, "Pastry Chef");
    }

    #[tokio::test]
    async fn test_second_generation_is_rejected_while_in_flight() {
        let generator = ScriptedGenerator::new(vec![Ok("unused".to_string())]);
        let in_flight = InFlight::default();
        let _held = in_flight.try_begin().unwrap();
        let err = generate_document(&generator, &SharedSession::default(), &in_flight, request(DocumentKind::Resume))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::GenerationInFlight));
        assert!(generator.prompts.lock().unwrap().is_empty());
    }
}
