//! Explicit application state for the single local user.
//!
//! Holds the draft form, the selected document kind and template, the
//! current output and the status/error lines. The core functions stay pure; only this struct
//! changes between requests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::export::{export_prose, export_resume, ExportError, ExportedFile};
use crate::generation::interpreter::{InterpretError, Interpretation};
use crate::models::form::{DocumentKind, FormRecord};
use crate::models::resume::ResumeDocument;
use crate::templates::TemplateId;

pub const RESUME_READY: &str = "All set! Your resume draft is ready.";
pub const DRAFT_READY: &str = "All set! Your draft is ready.";
pub const CLEARED: &str = "Cleared the output.";
pub const COPIED: &str = "Copied to clipboard.";
pub const RESUME_PDF_DOWNLOADED: &str = "Resume PDF downloaded.";
pub const PDF_DOWNLOADED: &str = "PDF downloaded.";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Session {
    /// Form as last submitted or edited; generation reads from it.
    pub form: FormRecord,
    pub kind: DocumentKind,
    pub template: TemplateId,
    /// Last successfully parsed resume.
    pub document: Option<ResumeDocument>,
    /// Last cover-letter text.
    pub output: Option<String>,
    pub status: Option<String>,
    pub error: Option<String>,
    /// Raw backend text of the last response that failed to parse.
    pub last_raw_response: Option<String>,
}

impl Session {
    /// Resets the status and error lines for a new generation.
    pub fn begin(&mut self, kind: DocumentKind) {
        self.kind = kind;
        self.status = None;
        self.error = None;
    }

    /// Applies an interpreted backend response.
    ///
    /// On success the new output replaces whatever was there. On a parse
    /// failure the previous document and prose are kept untouched; only the
    /// error line and `last_raw_response` change.
    pub fn apply(
        &mut self,
        result: Result<Interpretation, InterpretError>,
    ) -> Result<(), InterpretError> {
        match result {
            Ok(Interpretation::Resume(doc)) => {
                self.document = Some(doc);
                self.output = None;
                self.last_raw_response = None;
                self.status = Some(RESUME_READY.to_string());
                Ok(())
            }
            Ok(Interpretation::Prose(text)) => {
                self.document = None;
                self.output = Some(text);
                self.last_raw_response = None;
                self.status = Some(DRAFT_READY.to_string());
                Ok(())
            }
            Err(err) => {
                warn!("Keeping previous output after unparseable response");
                self.last_raw_response = Some(err.raw().to_string());
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn fail(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn clear(&mut self) {
        self.document = None;
        self.output = None;
        self.error = None;
        self.last_raw_response = None;
        self.status = Some(CLEARED.to_string());
    }

    pub fn select(&mut self, kind: Option<DocumentKind>, template: Option<&str>) {
        if let Some(kind) = kind {
            self.kind = kind;
        }
        if let Some(id) = template {
            self.template = TemplateId::resolve(id);
        }
    }

    /// Text for the current kind, in copy-to-clipboard form.
    pub fn plain_text(&self) -> Option<String> {
        let text = match self.kind {
            DocumentKind::Resume => self.document.as_ref().map(ResumeDocument::to_plain_text),
            DocumentKind::CoverLetter => self.output.clone(),
        }?;
        (!text.trim().is_empty()).then_some(text)
    }

    pub fn copy_text(&mut self) -> Result<String, ExportError> {
        let text = self.plain_text().ok_or(ExportError::Empty)?;
        self.status = Some(COPIED.to_string());
        Ok(text)
    }

    /// Exports the current kind as PDF. `template` overrides the selected
    /// template for resumes.
    pub fn export(&mut self, template: Option<&str>) -> Result<ExportedFile, ExportError> {
        let file = match self.kind {
            DocumentKind::Resume => {
                let doc = self.document.as_ref().ok_or(ExportError::Empty)?;
                let id = template.unwrap_or(self.template.as_str());
                let file = export_resume(id, doc)?;
                self.status = Some(RESUME_PDF_DOWNLOADED.to_string());
                file
            }
            DocumentKind::CoverLetter => {
                let text = self.output.as_deref().ok_or(ExportError::Empty)?;
                let file = export_prose(self.kind.label(), text)?;
                self.status = Some(PDF_DOWNLOADED.to_string());
                file
            }
        };
        Ok(file)
    }
}

/// Session behind a lock, shared by the request handlers.
#[derive(Debug, Clone, Default)]
pub struct SharedSession(Arc<Mutex<Session>>);

impl SharedSession {
    pub fn lock(&self) -> MutexGuard<'_, Session> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-flight guard
// ────────────────────────────────────────────────────────────────────────────

/// At most one generation at a time.
#[derive(Debug, Clone, Default)]
pub struct InFlight(Arc<AtomicBool>);

impl InFlight {
    pub fn try_begin(&self) -> Result<InFlightGuard, AppError> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AppError::GenerationInFlight)?;
        debug!("Generation started");
        Ok(InFlightGuard(Arc::clone(&self.0)))
    }

    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Clears the in-flight flag when dropped, on every exit path.
#[derive(Debug)]
pub struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
        info!("Generation finished");
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    #[serde(flatten)]
    pub session: Session,
    pub generating: bool,
}

impl SessionSnapshot {
    pub fn capture(session: &SharedSession, in_flight: &InFlight) -> Self {
        Self {
            session: session.lock().clone(),
            generating: in_flight.is_active(),
        }
    }
}
