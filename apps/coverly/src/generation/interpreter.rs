//! Turns raw backend text into a resume document or cover-letter prose.
//!
//! Backend output is untrusted. The resume path tolerates code fences and
//! surrounding commentary, then coerces whatever object it finds through
//! `ResumeDocument::from_value`. Anything that is not a JSON object is a
//! parse failure that keeps the raw text for diagnosis.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::form::DocumentKind;
use crate::models::resume::ResumeDocument;

const FENCE: &str = "```";
const FENCE_LANG: &str = "json";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Interpretation {
    Resume(ResumeDocument),
    Prose(String),
}

#[derive(Debug, Error)]
pub enum InterpretError {
    #[error("The AI response could not be parsed. Please adjust your inputs and try again.")]
    Unparseable { raw: String, reason: String },
}

impl InterpretError {
    pub fn raw(&self) -> &str {
        match self {
            InterpretError::Unparseable { raw, .. } => raw,
        }
    }
}

/// Strips code fences and slices out the outermost `{ … }` span.
///
/// Without a usable brace pair the cleaned text is returned as-is, which then
/// fails to parse downstream.
pub fn extract_json(raw: &str) -> String {
    let cleaned = strip_fences(raw.trim());
    match (cleaned.find('{'), cleaned.rfind('}')) {
        (Some(first), Some(last)) if first < last => cleaned[first..=last].to_string(),
        _ => cleaned,
    }
}

/// Removes every "```json" and "```" marker, case-insensitively.
fn strip_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(at) = rest.find(FENCE) {
        out.push_str(&rest[..at]);
        rest = &rest[at + FENCE.len()..];
        let tagged = rest
            .get(..FENCE_LANG.len())
            .is_some_and(|tag| tag.eq_ignore_ascii_case(FENCE_LANG));
        if tagged {
            rest = &rest[FENCE_LANG.len()..];
        }
    }
    out.push_str(rest);
    out
}

pub fn interpret(raw: &str, kind: DocumentKind) -> Result<Interpretation, InterpretError> {
    match kind {
        DocumentKind::CoverLetter => Ok(Interpretation::Prose(raw.trim().to_string())),
        DocumentKind::Resume => {
            let candidate = extract_json(raw);
            let unparseable = |reason: String| InterpretError::Unparseable {
                raw: raw.to_string(),
                reason,
            };
            let value: Value =
                serde_json::from_str(&candidate).map_err(|e| unparseable(e.to_string()))?;
            let root = value
                .as_object()
                .ok_or_else(|| unparseable("top-level value is not an object".to_string()))?;
            Ok(Interpretation::Resume(ResumeDocument::from_value(root)))
        }
    }
}
