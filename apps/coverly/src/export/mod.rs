// Document exporter: paginated layout → PDF bytes plus a stable file name.
// Nothing is written to disk here; the HTTP layer streams the bytes back as
// an attachment.

pub mod pdf;

use axum::http::header;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::info;

use crate::layout::{
    BlockStyle, Color, ColumnFlow, DrawOp, FontWeight, PageGeometry, PageSheet, TextRun,
};
use crate::models::resume::ResumeDocument;
use crate::templates::TemplateId;

pub const PDF_MIME: &str = "application/pdf";

const PROSE_TITLE: &str = "Coverly AI Draft";
const PROSE_TITLE_SIZE: f32 = 18.0;
const PROSE_TITLE_Y: f32 = 48.0;
const PROSE_BODY_SIZE: f32 = 12.0;
const PROSE_BODY_Y: f32 = 76.0;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("There is nothing to export yet.")]
    Empty,

    #[error("PDF encoding failed: {0}")]
    Encode(String),
}

#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Sent as a download so the browser saves it under `file_name`.
impl IntoResponse for ExportedFile {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.file_name);
        (
            [
                (header::CONTENT_TYPE, PDF_MIME.to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.bytes,
        )
            .into_response()
    }
}

pub fn resume_file_name(template: TemplateId) -> String {
    format!("coverly-{}.pdf", template.as_str())
}

/// `Cover Letter` → `coverly-cover-letter.pdf`.
pub fn prose_file_name(label: &str) -> String {
    let slug = label
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    format!("coverly-{slug}.pdf")
}

/// Paginates `doc` with the resolved template and encodes it.
pub fn export_resume(template_id: &str, doc: &ResumeDocument) -> Result<ExportedFile, ExportError> {
    let template = TemplateId::resolve(template_id);
    let paginated = template.paginate(doc);
    let bytes = pdf::encode(&paginated)?;
    info!(
        template = template.as_str(),
        pages = paginated.page_count(),
        bytes = bytes.len(),
        "Exported resume PDF"
    );
    Ok(ExportedFile {
        file_name: resume_file_name(template),
        bytes,
    })
}

/// Lays out free-form prose under a fixed title and encodes it.
pub fn export_prose(label: &str, text: &str) -> Result<ExportedFile, ExportError> {
    let body = text.trim();
    if body.is_empty() {
        return Err(ExportError::Empty);
    }

    let geometry = PageGeometry::A4;
    let mut sheet = PageSheet::new(geometry, None);
    sheet.push(
        0,
        DrawOp::Text(TextRun {
            x: geometry.margin,
            y: PROSE_TITLE_Y,
            text: PROSE_TITLE.to_string(),
            size: PROSE_TITLE_SIZE,
            weight: FontWeight::Bold,
            color: Color::BLACK,
        }),
    );

    let mut flow = ColumnFlow::new(&geometry, geometry.margin, geometry.printable_width(), PROSE_BODY_Y);
    flow.emit_block(&mut sheet, body, &BlockStyle::new(PROSE_BODY_SIZE));

    let paginated = sheet.finish();
    let bytes = pdf::encode(&paginated)?;
    info!(
        label,
        pages = paginated.page_count(),
        bytes = bytes.len(),
        "Exported prose PDF"
    );
    Ok(ExportedFile {
        file_name: prose_file_name(label),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::samples;
    use lopdf::Document;

    #[test]
    fn test_file_names() {
        assert_eq!(prose_file_name("Cover Letter"), "coverly-cover-letter.pdf");
        assert_eq!(prose_file_name("Resume"), "coverly-resume.pdf");
        assert_eq!(resume_file_name(TemplateId::Pastel), "coverly-pastel.pdf");
    }

    #[test]
    fn test_export_resume_names_file_after_resolved_template() {
        let file = export_resume("Nonexistent", &samples::classic()).unwrap();
        assert_eq!(file.file_name, "coverly-classic.pdf");
        assert!(file.bytes.starts_with(b"%PDF"));

        let file = export_resume("default", &samples::classic()).unwrap();
        assert_eq!(file.file_name, "coverly-classic.pdf");

        let file = export_resume("timeline", &samples::timeline()).unwrap();
        assert_eq!(file.file_name, "coverly-timeline.pdf");
    }

    #[test]
    fn test_blank_prose_is_rejected() {
        assert!(matches!(export_prose("Cover Letter", "  \n\t "), Err(ExportError::Empty)));
    }

    #[test]
    fn test_long_prose_spans_pages() {
        let paragraph = "I am excited to bring my experience in platform engineering to your team. ";
        let text = vec![paragraph.repeat(4); 40].join("\n");
        let file = export_prose("Cover Letter", &text).unwrap();
        let doc = Document::load_mem(&file.bytes).unwrap();
        assert!(doc.get_pages().len() >= 2);
    }

    #[test]
    fn test_response_is_a_named_attachment() {
        let file = export_prose("Cover Letter", "Dear team,").unwrap();
        let response = file.into_response();
        assert_eq!(response.headers()[header::CONTENT_TYPE], PDF_MIME);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"coverly-cover-letter.pdf\""
        );
    }

    #[test]
    fn test_prose_export_is_deterministic() {
        let a = export_prose("Cover Letter", "Dear hiring team,\nThank you.").unwrap();
        let b = export_prose("Cover Letter", "Dear hiring team,\nThank you.").unwrap();
        assert_eq!(a.bytes, b.bytes);
        assert_eq!(a.file_name, "coverly-cover-letter.pdf");
    }
}
