//! The normalised resume document every template renders.
//!
//! Backend output is untrusted: `ResumeDocument::from_value` coerces any JSON
//! object into a document, defaulting missing or mistyped fields instead of
//! rejecting them. String values are kept exactly as sent, so serializing a
//! document and coercing it back yields the same document. Blank placeholders
//! are dropped separately by `ResumeDocument::tidied` before rendering.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ────────────────────────────────────────────────────────────────────────────
// Document types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub name: String,
    pub headline: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub links: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceItem {
    pub role: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start: String,
    pub end: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationItem {
    pub institution: String,
    pub degree: String,
    pub start: String,
    pub end: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub core: Vec<String>,
    pub soft: Vec<String>,
}

impl Skills {
    pub fn is_empty(&self) -> bool {
        self.core.is_empty() && self.soft.is_empty()
    }

    /// Core skills followed by soft skills.
    pub fn combined(&self) -> Vec<&str> {
        self.core
            .iter()
            .chain(self.soft.iter())
            .map(String::as_str)
            .collect()
    }
}

/// A complete resume. Immutable once built; replaced wholesale by the next parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeDocument {
    pub contact: Contact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub experience: Vec<ExperienceItem>,
    pub education: Vec<EducationItem>,
    pub skills: Skills,
    pub certifications: Vec<String>,
    pub projects: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient coercion from backend JSON
// ────────────────────────────────────────────────────────────────────────────

impl ResumeDocument {
    /// Coerces a parsed JSON object into a document.
    ///
    /// Missing or non-array sequences become empty, missing or non-string
    /// scalars become empty strings (numbers and booleans keep their text),
    /// and missing optional fields become `None`. Never fails.
    pub fn from_value(root: &Map<String, Value>) -> Self {
        let contact = root.get("contact").and_then(Value::as_object);
        let skills = root.get("skills").and_then(Value::as_object);

        ResumeDocument {
            contact: Contact {
                name: text_field(contact, "name"),
                headline: text_field(contact, "headline"),
                email: text_field(contact, "email"),
                phone: text_field(contact, "phone"),
                location: text_field(contact, "location"),
                links: list_field(contact, "links"),
            },
            summary: optional_text(Some(root), "summary"),
            experience: objects(root.get("experience"))
                .map(|item| ExperienceItem {
                    role: text_field(Some(item), "role"),
                    company: text_field(Some(item), "company"),
                    location: optional_text(Some(item), "location"),
                    start: text_field(Some(item), "start"),
                    end: text_field(Some(item), "end"),
                    bullets: list_field(Some(item), "bullets"),
                })
                .collect(),
            education: objects(root.get("education"))
                .map(|item| EducationItem {
                    institution: text_field(Some(item), "institution"),
                    degree: text_field(Some(item), "degree"),
                    start: text_field(Some(item), "start"),
                    end: text_field(Some(item), "end"),
                    details: optional_text(Some(item), "details"),
                })
                .collect(),
            skills: Skills {
                core: list_field(skills, "core"),
                soft: list_field(skills, "soft"),
            },
            certifications: list_field(Some(root), "certifications"),
            projects: list_field(Some(root), "projects"),
            languages: list_field(Some(root), "languages"),
        }
    }

    /// Copy with blank placeholders removed: whitespace-only optional fields
    /// become `None` and whitespace-only list items are dropped. Text that
    /// has content is left untouched.
    pub fn tidied(&self) -> ResumeDocument {
        ResumeDocument {
            contact: Contact {
                links: non_blank(&self.contact.links),
                ..self.contact.clone()
            },
            summary: present(&self.summary),
            experience: self
                .experience
                .iter()
                .map(|item| ExperienceItem {
                    location: present(&item.location),
                    bullets: non_blank(&item.bullets),
                    ..item.clone()
                })
                .collect(),
            education: self
                .education
                .iter()
                .map(|item| EducationItem {
                    details: present(&item.details),
                    ..item.clone()
                })
                .collect(),
            skills: Skills {
                core: non_blank(&self.skills.core),
                soft: non_blank(&self.skills.soft),
            },
            certifications: non_blank(&self.certifications),
            projects: non_blank(&self.projects),
            languages: non_blank(&self.languages),
        }
    }

    /// Plain-text rendering used for copy-to-clipboard.
    pub fn to_plain_text(&self) -> String {
        let doc = self.tidied();
        let c = &doc.contact;
        let mut sections: Vec<String> = vec![
            format!("{} — {}", c.name, c.headline),
            format!("{} · {} · {}", c.location, c.email, c.phone),
            join_meta(c.links.iter().map(String::as_str), " · "),
        ];

        if let Some(summary) = &doc.summary {
            sections.push("\nPROFILE".to_string());
            sections.push(summary.clone());
        }

        if !doc.experience.is_empty() {
            let blocks: Vec<String> = self
                .experience
                .iter()
                .map(|item| {
                    let header = format!(
                        "{} · {} ({} – {})",
                        item.role, item.company, item.start, item.end
                    );
                    let bullets: Vec<String> =
                        item.bullets.iter().map(|b| format!("• {b}")).collect();
                    format!("{header}\n{}", bullets.join("\n"))
                })
                .collect();
            sections.push("\nEXPERIENCE".to_string());
            sections.push(blocks.join("\n\n"));
        }

        if !doc.education.is_empty() {
            let blocks: Vec<String> = self
                .education
                .iter()
                .map(|item| {
                    let header = format!(
                        "{} · {} ({} – {})",
                        item.degree, item.institution, item.start, item.end
                    );
                    match &item.details {
                        Some(details) => format!("{header}\n{details}"),
                        None => header,
                    }
                })
                .collect();
            sections.push("\nEDUCATION".to_string());
            sections.push(blocks.join("\n\n"));
        }

        let mut skill_lines = Vec::new();
        if !doc.skills.core.is_empty() {
            skill_lines.push(format!("Core: {}", doc.skills.core.join(", ")));
        }
        if !doc.skills.soft.is_empty() {
            skill_lines.push(format!("Soft: {}", doc.skills.soft.join(", ")));
        }
        if !skill_lines.is_empty() {
            sections.push("\nSKILLS".to_string());
            sections.push(skill_lines.join("\n"));
        }

        if !doc.certifications.is_empty() {
            sections.push("\nCERTIFICATIONS".to_string());
            sections.push(doc.certifications.join("\n"));
        }
        if !doc.projects.is_empty() {
            sections.push("\nPROJECTS".to_string());
            sections.push(doc.projects.join("\n"));
        }

        sections
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Joins the non-empty items with `separator`.
pub fn join_meta<'a>(items: impl IntoIterator<Item = &'a str>, separator: &str) -> String {
    items
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text_field(obj: Option<&Map<String, Value>>, key: &str) -> String {
    optional_text(obj, key).unwrap_or_default()
}

fn optional_text(obj: Option<&Map<String, Value>>, key: &str) -> Option<String> {
    obj.and_then(|o| o.get(key)).and_then(scalar_text)
}

/// Scalar items of an array field; nulls and nested structures are dropped.
fn list_field(obj: Option<&Map<String, Value>>, key: &str) -> Vec<String> {
    obj.and_then(|o| o.get(key))
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(scalar_text).collect())
        .unwrap_or_default()
}

fn present(value: &Option<String>) -> Option<String> {
    value.clone().filter(|s| !s.trim().is_empty())
}

fn non_blank(items: &[String]) -> Vec<String> {
    items
        .iter()
        .filter(|s| !s.trim().is_empty())
        .cloned()
        .collect()
}

fn objects(value: Option<&Value>) -> impl Iterator<Item = &Map<String, Value>> {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
