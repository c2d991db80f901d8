// Prompt composition for both document kinds.
// The resume schema below is the wire contract with the interpreter: keys and
// nesting must match `ResumeDocument::from_value`.

use crate::models::form::{DocumentKind, EducationEntry, ExperienceEntry, FormRecord};

/// Fixed resume instructions: persona, JSON schema and writing guidelines.
pub const RESUME_INSTRUCTIONS: &str = r#"You are Coverly, an award-winning resume writer. Use the candidate data below to craft a polished, modern resume.

Respond with **only** valid JSON. The JSON must match this schema:
{
  "contact": {
    "name": "",
    "headline": "",
    "email": "",
    "phone": "",
    "location": "",
    "links": ["", ""]
  },
  "summary": "",
  "experience": [
    {
      "role": "",
      "company": "",
      "location": "",
      "start": "",
      "end": "",
      "bullets": ["", ""]
    }
  ],
  "education": [
    {
      "institution": "",
      "degree": "",
      "start": "",
      "end": "",
      "details": ""
    }
  ],
  "skills": {
    "core": [],
    "soft": []
  },
  "certifications": [],
  "projects": []
}

Guidelines:
- Preserve factual data exactly as provided.
- Enhance bullets with strong verbs and measurable impact.
- Keep bullet points concise (max 24 words each).
- Mention notable achievements, technologies, and leadership."#;

const DEFAULT_YEARS: &str = "several";
const DEFAULT_ENTHUSIASM_TARGET: &str = "the opportunity";

/// Builds the exact text prompt sent to the backend. Pure.
pub fn compose_prompt(form: &FormRecord, kind: DocumentKind) -> String {
    match kind {
        DocumentKind::Resume => resume_prompt(form),
        DocumentKind::CoverLetter => cover_letter_prompt(form),
    }
}

fn resume_prompt(form: &FormRecord) -> String {
    let headline = if form.headline.is_empty() {
        &form.target_role
    } else {
        &form.headline
    };

    let candidate = format!(
        "Candidate Information:\n\
         Name: {}\n\
         Headline: {}\n\
         Email: {}\n\
         Phone: {}\n\
         Location: {}\n\
         Portfolio: {}\n\
         LinkedIn: {}\n\
         GitHub: {}\n\
         Target Role: {}\n\
         Experience Years: {}\n\
         Core Skills: {}\n\
         Soft Skills: {}\n\
         Certifications: {}\n\
         Projects: {}\n\
         Additional Notes: {}",
        form.name,
        headline,
        form.email,
        form.phone,
        form.location,
        form.portfolio,
        form.linkedin,
        form.github,
        form.target_role,
        form.experience_years,
        form.skills,
        form.soft_skills,
        form.certifications,
        form.projects,
        form.details,
    );

    let experience_block = form
        .experiences
        .iter()
        .enumerate()
        .map(|(i, entry)| experience_section(i + 1, entry))
        .collect::<Vec<_>>()
        .join("\n");
    let education_block = form
        .education
        .iter()
        .enumerate()
        .map(|(i, entry)| education_section(i + 1, entry))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{RESUME_INSTRUCTIONS}\n\n{candidate}\n\n{experience_block}\n\n{education_block}")
        .trim()
        .to_string()
}

fn experience_section(number: usize, entry: &ExperienceEntry) -> String {
    format!(
        "\nExperience {number}:\n  Role: {}\n  Company: {}\n  Location: {}\n  Start: {}\n  End: {}\n  Highlights: {}\n",
        entry.role, entry.company, entry.location, entry.start_date, entry.end_date, entry.highlights,
    )
}

fn education_section(number: usize, entry: &EducationEntry) -> String {
    format!(
        "\nEducation {number}:\n  Institution: {}\n  Degree: {}\n  Start: {}\n  End: {}\n  Details: {}\n",
        entry.institution, entry.degree, entry.start_date, entry.end_date, entry.details,
    )
}

fn cover_letter_prompt(form: &FormRecord) -> String {
    let years = match form.experience_years.trim() {
        "" => DEFAULT_YEARS,
        years => years,
    };
    let details = form.details.trim();
    let target = if details.is_empty() {
        DEFAULT_ENTHUSIASM_TARGET
    } else {
        details
    };

    let mut prompt = String::new();
    if !form.name.trim().is_empty() {
        prompt.push_str(&format!("The candidate's name is {}. ", form.name.trim()));
    }
    prompt.push_str(&format!(
        "Write a professional cover letter for a {} with {years} years of experience. \
         Include enthusiasm for {target} and highlight skills like {}. \
         Keep it polite, confident, and job-relevant.",
        form.target_role, form.skills,
    ));
    // Details already appear as the enthusiasm target, so this only fires if
    // the two ever diverge.
    if !details.is_empty() && details != target {
        prompt.push_str(&format!(" Additional context: {details}."));
    }
    prompt.trim().to_string()
}
