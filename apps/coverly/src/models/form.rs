use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which document the user is generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DocumentKind {
    #[default]
    Resume,
    #[serde(rename = "Cover Letter", alias = "CoverLetter")]
    CoverLetter,
}

impl DocumentKind {
    /// Human-readable label, also the source of prose export file names.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Resume => "Resume",
            DocumentKind::CoverLetter => "Cover Letter",
        }
    }
}

/// Which repeatable list of the form a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormSection {
    Experience,
    Education,
}

/// One row of the experience list in the form. `id` only tracks the row in the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub id: Uuid,
    pub role: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub highlights: String,
}

impl Default for ExperienceEntry {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            role: String::new(),
            company: String::new(),
            location: String::new(),
            start_date: String::new(),
            end_date: "Present".to_string(),
            highlights: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    pub start_date: String,
    pub end_date: String,
    pub details: String,
}

impl Default for EducationEntry {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            institution: String::new(),
            degree: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            details: String::new(),
        }
    }
}

/// Everything the form collects, in the shape the browser posts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormRecord {
    pub name: String,
    pub headline: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub portfolio: String,
    pub linkedin: String,
    pub github: String,
    pub target_role: String,
    pub experience_years: String,
    pub skills: String,
    pub soft_skills: String,
    pub certifications: String,
    pub projects: String,
    pub details: String,
    pub experiences: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
}

impl Default for FormRecord {
    /// A blank form starts with one empty row in each list.
    fn default() -> Self {
        Self {
            name: String::new(),
            headline: String::new(),
            email: String::new(),
            phone: String::new(),
            location: String::new(),
            portfolio: String::new(),
            linkedin: String::new(),
            github: String::new(),
            target_role: String::new(),
            experience_years: String::new(),
            skills: String::new(),
            soft_skills: String::new(),
            certifications: String::new(),
            projects: String::new(),
            details: String::new(),
            experiences: vec![ExperienceEntry::default()],
            education: vec![EducationEntry::default()],
        }
    }
}

impl FormRecord {
    /// Appends a blank row to `section` and returns its id.
    pub fn add_row(&mut self, section: FormSection) -> Uuid {
        match section {
            FormSection::Experience => self.add_experience(),
            FormSection::Education => self.add_education(),
        }
    }

    pub fn remove_row(&mut self, section: FormSection, id: Uuid) -> bool {
        match section {
            FormSection::Experience => self.remove_experience(id),
            FormSection::Education => self.remove_education(id),
        }
    }

    pub fn add_experience(&mut self) -> Uuid {
        let entry = ExperienceEntry::default();
        let id = entry.id;
        self.experiences.push(entry);
        id
    }

    /// Removes the row with `id`. The last remaining row is never removed.
    pub fn remove_experience(&mut self, id: Uuid) -> bool {
        if self.experiences.len() <= 1 {
            return false;
        }
        let before = self.experiences.len();
        self.experiences.retain(|e| e.id != id);
        self.experiences.len() != before
    }

    pub fn add_education(&mut self) -> Uuid {
        let entry = EducationEntry::default();
        let id = entry.id;
        self.education.push(entry);
        id
    }

    /// Removes the row with `id`. The last remaining row is never removed.
    pub fn remove_education(&mut self, id: Uuid) -> bool {
        if self.education.len() <= 1 {
            return false;
        }
        let before = self.education.len();
        self.education.retain(|e| e.id != id);
        self.education.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_has_one_row_each() {
        let form = FormRecord::default();
        assert_eq!(form.experiences.len(), 1);
        assert_eq!(form.education.len(), 1);
        assert_eq!(form.experiences[0].end_date, "Present");
    }

    #[test]
    fn test_last_row_is_never_removed() {
        let mut form = FormRecord::default();
        let only = form.experiences[0].id;
        assert!(!form.remove_experience(only));
        assert_eq!(form.experiences.len(), 1);

        let second = form.add_experience();
        assert!(form.remove_experience(second));
        assert_eq!(form.experiences[0].id, only);
    }

    #[test]
    fn test_remove_unknown_education_is_noop() {
        let mut form = FormRecord::default();
        form.add_education();
        assert!(!form.remove_education(Uuid::new_v4()));
        assert_eq!(form.education.len(), 2);
    }

    #[test]
    fn test_partial_json_form_deserializes_with_defaults() {
        let form: FormRecord = serde_json::from_value(serde_json::json!({
            "target_role": "Backend Engineer",
            "experiences": [{"role": "Dev", "company": "Acme"}]
        }))
        .unwrap();
        assert_eq!(form.target_role, "Backend Engineer");
        assert_eq!(form.experiences[0].end_date, "Present");
        assert_eq!(form.education.len(), 1);
    }

    #[test]
    fn test_rows_by_section() {
        let mut form = FormRecord::default();
        let id = form.add_row(FormSection::Education);
        assert_eq!(form.education.len(), 2);
        assert_eq!(form.experiences.len(), 1);
        assert!(!form.remove_row(FormSection::Experience, id));
        assert!(form.remove_row(FormSection::Education, id));
        assert_eq!(form.education.len(), 1);

        let section: FormSection = serde_json::from_str("\"experience\"").unwrap();
        assert_eq!(section, FormSection::Experience);
    }

    #[test]
    fn test_document_kind_labels_round_trip() {
        let kind: DocumentKind = serde_json::from_str("\"Cover Letter\"").unwrap();
        assert_eq!(kind, DocumentKind::CoverLetter);
        assert_eq!(kind.label(), "Cover Letter");
        let legacy: DocumentKind = serde_json::from_str("\"CoverLetter\"").unwrap();
        assert_eq!(legacy, DocumentKind::CoverLetter);
    }
}
