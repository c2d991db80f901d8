// Template registry: four built-in resume layouts.
// Each variant renders the same ResumeDocument two ways: a screen tree and a
// paginated document. Dispatch is a closed enum; the registry never changes.

pub mod classic;
pub mod creative;
pub mod handlers;
pub mod pastel;
pub mod samples;
pub mod screen;
pub mod timeline;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::PaginatedDocument;
use crate::models::resume::{join_meta, ResumeDocument};
use screen::{el, text_el, ScreenNode};

// ────────────────────────────────────────────────────────────────────────────
// Identity
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    #[default]
    Classic,
    Creative,
    Pastel,
    Timeline,
}

impl TemplateId {
    /// Registry order.
    pub const ALL: [TemplateId; 4] = [
        TemplateId::Classic,
        TemplateId::Creative,
        TemplateId::Pastel,
        TemplateId::Timeline,
    ];

    /// Maps a client-supplied id to a template. Anything unrecognised,
    /// including the legacy id `default`, falls back to Classic.
    pub fn resolve(id: &str) -> Self {
        let wanted = id.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .unwrap_or(TemplateId::Classic)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Classic => "classic",
            TemplateId::Creative => "creative",
            TemplateId::Pastel => "pastel",
            TemplateId::Timeline => "timeline",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TemplateId::Classic => "Modern Classic",
            TemplateId::Creative => "Creative Spotlight",
            TemplateId::Pastel => "Pastel Breeze",
            TemplateId::Timeline => "Timeline Pro",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TemplateId::Classic => "Clean two-column layout with balanced typography.",
            TemplateId::Creative => "Bold sidebar for creatives and portfolios.",
            TemplateId::Pastel => "Soft gradients ideal for hospitality and services.",
            TemplateId::Timeline => "Sophisticated timeline for consultants and managers.",
        }
    }

    pub fn illustrate(&self, doc: &ResumeDocument) -> ScreenNode {
        let doc = &doc.tidied();
        match self {
            TemplateId::Classic => classic::illustrate(doc),
            TemplateId::Creative => creative::illustrate(doc),
            TemplateId::Pastel => pastel::illustrate(doc),
            TemplateId::Timeline => timeline::illustrate(doc),
        }
    }

    pub fn paginate(&self, doc: &ResumeDocument) -> PaginatedDocument {
        let doc = &doc.tidied();
        match self {
            TemplateId::Classic => classic::paginate(doc),
            TemplateId::Creative => creative::paginate(doc),
            TemplateId::Pastel => pastel::paginate(doc),
            TemplateId::Timeline => timeline::paginate(doc),
        }
    }

    /// Fixed preview document for this template.
    pub fn sample(&self) -> ResumeDocument {
        match self {
            TemplateId::Classic => samples::classic(),
            TemplateId::Creative => samples::creative(),
            TemplateId::Pastel => samples::pastel(),
            TemplateId::Timeline => samples::timeline(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Registry API
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub fn list_templates() -> Vec<TemplateSummary> {
    TemplateId::ALL
        .iter()
        .map(|t| TemplateSummary {
            id: t.as_str(),
            name: t.name(),
            description: t.description(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderTarget {
    #[default]
    Screen,
    Document,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "target", content = "output", rename_all = "lowercase")]
pub enum Rendered {
    Screen(ScreenNode),
    Document(PaginatedDocument),
}

pub fn render(template_id: &str, doc: &ResumeDocument, target: RenderTarget) -> Rendered {
    let template = TemplateId::resolve(template_id);
    match target {
        RenderTarget::Screen => Rendered::Screen(template.illustrate(doc)),
        RenderTarget::Document => {
            let paginated = template.paginate(doc);
            debug!(
                template = template.as_str(),
                pages = paginated.page_count(),
                "Paginated resume"
            );
            Rendered::Document(paginated)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ────────────────────────────────────────────────────────────────────────────

pub(crate) fn date_range(start: &str, end: &str) -> String {
    join_meta([start, end], " – ")
}

pub(crate) fn bulleted(item: &str) -> String {
    format!("• {item}")
}

/// Screen section with a title heading followed by `children`.
pub(crate) fn section(class: &str, title: &str, children: Vec<ScreenNode>) -> ScreenNode {
    let mut nodes = vec![text_el("h2", "section-title", title)];
    nodes.extend(children);
    el("section", class, nodes)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Contact, EducationItem, ExperienceItem, Skills};

    /// Contact, one role and one school; every optional section empty.
    fn bare_document() -> ResumeDocument {
        ResumeDocument {
            contact: Contact {
                name: "Jordan Lee".to_string(),
                headline: "Data Engineer".to_string(),
                email: "jordan@example.com".to_string(),
                ..Default::default()
            },
            experience: vec![ExperienceItem {
                role: "Data Engineer".to_string(),
                company: "Northwind".to_string(),
                start: "2021".to_string(),
                end: "Present".to_string(),
                bullets: vec!["Built the ingestion pipeline.".to_string()],
                ..Default::default()
            }],
            education: vec![EducationItem {
                institution: "State University".to_string(),
                degree: "BSc Computer Science".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn overflowing_document() -> ResumeDocument {
        let sentence = "Coordinated a cross-functional migration that moved every reporting workload onto the new warehouse without downtime";
        ResumeDocument {
            experience: vec![ExperienceItem {
                role: "Staff Engineer".to_string(),
                company: "Globex".to_string(),
                start: "2015".to_string(),
                end: "2024".to_string(),
                bullets: (0..80).map(|i| format!("{sentence} ({i}).")).collect(),
                ..Default::default()
            }],
            skills: Skills {
                core: vec!["SQL".to_string()],
                soft: vec![],
            },
            ..bare_document()
        }
    }

    #[test]
    fn test_list_templates_in_registry_order() {
        let ids: Vec<&str> = list_templates().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["classic", "creative", "pastel", "timeline"]);
        assert_eq!(list_templates()[3].name, "Timeline Pro");
    }

    #[test]
    fn test_resolve_known_and_unknown_ids() {
        assert_eq!(TemplateId::resolve("pastel"), TemplateId::Pastel);
        assert_eq!(TemplateId::resolve(" Timeline "), TemplateId::Timeline);
        assert_eq!(TemplateId::resolve("default"), TemplateId::Classic);
        assert_eq!(TemplateId::resolve("nonexistent-id"), TemplateId::Classic);
        assert_eq!(TemplateId::resolve(""), TemplateId::Classic);
    }

    #[test]
    fn test_unknown_template_renders_classic_document() {
        let doc = TemplateId::Classic.sample();
        let fallback = render("nonexistent-id", &doc, RenderTarget::Document);
        let classic = render("classic", &doc, RenderTarget::Document);
        assert_eq!(fallback, classic);
    }

    #[test]
    fn test_empty_optional_sections_are_omitted_everywhere() {
        let doc = bare_document();
        for template in TemplateId::ALL {
            let screen = template.illustrate(&doc);
            let paged = template.paginate(&doc);
            for title in ["Profile", "Certifications", "Certificates", "Projects", "Languages"] {
                assert!(
                    !screen.contains_text(title),
                    "{} screen shows empty {title}",
                    template.as_str()
                );
                assert!(
                    !paged.contains_text(&title.to_uppercase()),
                    "{} document shows empty {title}",
                    template.as_str()
                );
            }
            assert!(paged.contains_text("Jordan Lee"));
            assert!(screen.contains_text("Jordan Lee"));
        }
    }

    #[test]
    fn test_blank_placeholders_are_omitted_everywhere() {
        let mut doc = bare_document();
        doc.summary = Some("   ".to_string());
        doc.projects = vec![String::new()];
        doc.certifications = vec![" ".to_string()];
        doc.languages = vec![String::new()];
        for template in TemplateId::ALL {
            let screen = template.illustrate(&doc);
            let paged = template.paginate(&doc);
            for title in ["Profile", "Certifications", "Certificates", "Projects", "Languages"] {
                assert!(!screen.contains_text(title), "{} screen shows blank {title}", template.as_str());
                assert!(
                    !paged.contains_text(&title.to_uppercase()),
                    "{} document shows blank {title}",
                    template.as_str()
                );
            }
        }
    }

    #[test]
    fn test_empty_document_renders_without_panicking() {
        let doc = ResumeDocument::default();
        for template in TemplateId::ALL {
            let paged = template.paginate(&doc);
            assert_eq!(paged.page_count(), 1);
            let _ = template.illustrate(&doc).to_html();
        }
    }

    #[test]
    fn test_paginate_is_deterministic() {
        for template in TemplateId::ALL {
            for doc in [template.sample(), overflowing_document()] {
                assert_eq!(template.paginate(&doc), template.paginate(&doc));
            }
        }
    }

    #[test]
    fn test_long_experience_overflows_onto_more_pages() {
        let doc = overflowing_document();
        for template in TemplateId::ALL {
            let paged = template.paginate(&doc);
            assert!(
                paged.page_count() >= 2,
                "{} kept everything on one page",
                template.as_str()
            );
            let bottom = paged.geometry.printable_bottom();
            for page in &paged.pages {
                for run in page.text_runs().filter(|r| r.text.starts_with('•')) {
                    assert!(
                        run.y <= bottom,
                        "{} wrote a bullet at {} below {bottom}",
                        template.as_str(),
                        run.y
                    );
                }
            }
        }
    }

    #[test]
    fn test_every_sample_renders_on_one_page() {
        for template in TemplateId::ALL {
            let sample = template.sample();
            assert_eq!(template.paginate(&sample).page_count(), 1, "{}", template.as_str());
            assert!(template.illustrate(&sample).contains_text(&sample.contact.name));
        }
    }

    #[test]
    fn test_render_target_parses_lowercase() {
        let target: RenderTarget = serde_json::from_str("\"document\"").unwrap();
        assert_eq!(target, RenderTarget::Document);
    }

    #[test]
    fn test_date_range_skips_blank_ends() {
        assert_eq!(date_range("2020", "Present"), "2020 – Present");
        assert_eq!(date_range("", "2019"), "2019");
    }
}
