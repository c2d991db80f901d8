//! Creative Spotlight: a dark sidebar panel beside a paginated main column.
//!
//! The sidebar (contact, skill groups, languages) only exists on the first page
//! and is placed without pagination; a very long sidebar runs off the page. The
//! panel itself is repainted on every page so continuation pages match.

use crate::layout::{
    fill_rect, place_block, BlockStyle, Color, ColumnFlow, Page, PageGeometry, PageSheet,
    PaginatedDocument,
};
use crate::models::resume::{join_meta, ResumeDocument};
use crate::templates::screen::{el, list, maybe_text_el, text_el, ScreenNode};
use crate::templates::{bulleted, date_range, section};

const PANEL_WIDTH: f32 = 180.0;
const SIDEBAR_X: f32 = 40.0;
const SIDEBAR_WIDTH: f32 = PANEL_WIDTH - SIDEBAR_X;
const MAIN_X: f32 = 200.0;
const MAIN_RIGHT_GUTTER: f32 = 40.0;

const HARD_SKILL_LIMIT: usize = 8;
const SOFT_SKILL_LIMIT: usize = 6;
const LANGUAGE_LIMIT: usize = 4;

const PANEL: Color = Color::from_rgb(15, 60, 122);
const PANEL_LABEL: Color = Color::from_rgb(183, 197, 222);
const ACCENT: Color = Color::from_rgb(15, 60, 122);
const NAME: Color = Color::from_rgb(11, 36, 88);
const SUMMARY: Color = Color::from_rgb(60, 75, 105);
const INK: Color = Color::from_rgb(30, 40, 60);

fn capped(items: &[String], limit: usize) -> Vec<&str> {
    items.iter().take(limit).map(String::as_str).collect()
}

/// Sidebar groups in display order, each capped; empty groups are dropped.
fn sidebar_groups(doc: &ResumeDocument) -> Vec<(&'static str, Vec<&str>)> {
    let c = &doc.contact;
    let contact: Vec<&str> = [c.email.as_str(), c.phone.as_str(), c.location.as_str()]
        .into_iter()
        .chain(c.links.iter().map(String::as_str))
        .filter(|s| !s.trim().is_empty())
        .collect();
    [
        ("Contact", contact),
        ("Hard Skills", capped(&doc.skills.core, HARD_SKILL_LIMIT)),
        ("Soft Skills", capped(&doc.skills.soft, SOFT_SKILL_LIMIT)),
        ("Languages", capped(&doc.languages, LANGUAGE_LIMIT)),
    ]
    .into_iter()
    .filter(|(_, items)| !items.is_empty())
    .collect()
}

pub fn illustrate(doc: &ResumeDocument) -> ScreenNode {
    let sidebar = sidebar_groups(doc)
        .into_iter()
        .filter_map(|(label, items)| {
            let items = list("sidebar-list", "", &items)?;
            Some(el("div", "sidebar-group", vec![text_el("span", "label", label), items]))
        })
        .collect();

    let c = &doc.contact;
    let mut header = Vec::new();
    header.extend(maybe_text_el("p", "headline", &c.headline));
    header.extend(maybe_text_el("h1", "name", &c.name));
    if let Some(summary) = &doc.summary {
        header.push(text_el("p", "summary", summary));
    }
    let mut main = vec![el("header", "header", header)];

    if !doc.experience.is_empty() {
        let roles = doc
            .experience
            .iter()
            .map(|role| {
                let mut parts = Vec::new();
                parts.extend(maybe_text_el("h3", "role", &role.role));
                parts.extend(maybe_text_el(
                    "p",
                    "meta",
                    &join_meta([role.company.as_str(), date_range(&role.start, &role.end).as_str()], " · "),
                ));
                let bullets: Vec<&str> = role.bullets.iter().map(String::as_str).collect();
                parts.extend(list("bullets", "", &bullets));
                el("article", "entry", parts)
            })
            .collect();
        main.push(section("experience", "Work Experience", roles));
    }

    if !doc.education.is_empty() {
        let schools = doc
            .education
            .iter()
            .map(|item| {
                let mut parts = Vec::new();
                parts.extend(maybe_text_el("h3", "degree", &item.degree));
                parts.extend(maybe_text_el(
                    "p",
                    "meta",
                    &join_meta([item.institution.as_str(), date_range(&item.start, &item.end).as_str()], " · "),
                ));
                el("div", "entry", parts)
            })
            .collect();
        main.push(section("education", "Education", schools));
    }

    let certifications: Vec<&str> = doc.certifications.iter().map(String::as_str).collect();
    if let Some(node) = list("bullets", "", &certifications) {
        main.push(section("certificates", "Certificates", vec![node]));
    }

    el(
        "div",
        "sheet creative",
        vec![el("aside", "sidebar", sidebar), el("main", "main", main)],
    )
}

fn sidebar_panel(page: &mut Page, geometry: &PageGeometry) {
    fill_rect(page, 0.0, 0.0, PANEL_WIDTH, geometry.height, PANEL);
}

pub fn paginate(doc: &ResumeDocument) -> PaginatedDocument {
    let geometry = PageGeometry::A4;
    let mut sheet = PageSheet::new(geometry, Some(sidebar_panel));

    let label = BlockStyle::new(9.0).bold().color(PANEL_LABEL).space_after(6.0);
    let item = BlockStyle::new(10.0).color(Color::WHITE).space_after(3.0);
    let mut y = 60.0;
    for (title, items) in sidebar_groups(doc) {
        let page = sheet.page_mut(0);
        y = place_block(page, SIDEBAR_X, y, SIDEBAR_WIDTH, &title.to_uppercase(), &label);
        for entry in items {
            y = place_block(page, SIDEBAR_X, y, SIDEBAR_WIDTH, entry, &item);
        }
        y += 18.0;
    }

    let main_width = geometry.width - MAIN_X - MAIN_RIGHT_GUTTER;
    let mut flow = ColumnFlow::new(&geometry, MAIN_X, main_width, 70.0);
    let heading = BlockStyle::new(12.0).bold().color(ACCENT).space_after(4.0);
    let entry_title = BlockStyle::new(11.0).bold().color(INK);
    let meta = BlockStyle::new(10.0).color(INK);
    let bullet = BlockStyle::new(10.0).color(INK);

    let c = &doc.contact;
    flow.emit_block(&mut sheet, &c.headline, &BlockStyle::new(18.0).bold().color(ACCENT).space_after(18.0));
    flow.advance_to(110.0);
    flow.emit_block(&mut sheet, &c.name, &BlockStyle::new(30.0).bold().color(NAME));
    if let Some(summary) = &doc.summary {
        flow.emit_block(&mut sheet, summary, &BlockStyle::new(11.0).color(SUMMARY).space_after(16.0));
    }
    flow.advance_to(200.0);

    if !doc.experience.is_empty() {
        flow.emit_block(&mut sheet, "WORK EXPERIENCE", &heading);
        for role in &doc.experience {
            flow.emit_block(&mut sheet, &role.role, &entry_title);
            flow.emit_block(
                &mut sheet,
                &join_meta([role.company.as_str(), date_range(&role.start, &role.end).as_str()], " · "),
                &meta,
            );
            for text in &role.bullets {
                flow.emit_block(&mut sheet, &bulleted(text), &bullet);
            }
            flow.advance(10.0);
        }
    }

    if !doc.education.is_empty() {
        flow.emit_block(&mut sheet, "EDUCATION", &heading);
        for school in &doc.education {
            flow.emit_block(&mut sheet, &school.degree, &BlockStyle::new(11.0).color(INK));
            flow.emit_block(
                &mut sheet,
                &join_meta([school.institution.as_str(), date_range(&school.start, &school.end).as_str()], " · "),
                &meta.space_after(4.0),
            );
        }
        flow.advance(6.0);
    }

    if !doc.certifications.is_empty() {
        flow.emit_block(&mut sheet, "CERTIFICATES", &heading);
        for cert in &doc.certifications {
            flow.emit_block(&mut sheet, &bulleted(cert), &bullet);
        }
    }

    sheet.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::DrawOp;
    use crate::templates::samples;

    #[test]
    fn test_every_page_carries_the_panel() {
        let mut doc = samples::creative();
        doc.experience[0].bullets = vec!["Animated another sequence for the campaign.".to_string(); 120];
        let paged = paginate(&doc);
        assert!(paged.page_count() > 1);
        for page in &paged.pages {
            assert!(matches!(
                page.ops.first(),
                Some(DrawOp::Rect { x, width, .. }) if *x == 0.0 && *width == PANEL_WIDTH
            ));
        }
    }

    #[test]
    fn test_sidebar_caps_skill_lists() {
        let mut doc = samples::creative();
        doc.skills.core = (0..20).map(|i| format!("Skill {i}")).collect();
        let groups = sidebar_groups(&doc);
        let hard = groups.iter().find(|(t, _)| *t == "Hard Skills").unwrap();
        assert_eq!(hard.1.len(), HARD_SKILL_LIMIT);
        let paged = paginate(&doc);
        assert!(paged.contains_text("Skill 7"));
        assert!(!paged.contains_text("Skill 8"));
    }

    #[test]
    fn test_sidebar_text_stays_inside_panel() {
        let paged = paginate(&samples::creative());
        let sidebar_runs = paged.pages[0].text_runs().filter(|r| r.x < MAIN_X);
        for run in sidebar_runs {
            assert_eq!(run.x, SIDEBAR_X);
        }
        assert!(paged.contains_text("CONTACT"));
        assert!(paged.contains_text("LANGUAGES"));
    }

    #[test]
    fn test_main_column_starts_work_experience_below_header() {
        let paged = paginate(&samples::creative());
        let heading = paged.pages[0]
            .text_runs()
            .find(|r| r.text == "WORK EXPERIENCE")
            .unwrap();
        assert!(heading.y >= 200.0);
        assert_eq!(heading.x, MAIN_X);
    }

    #[test]
    fn test_screen_matches_document_sections() {
        let doc = samples::creative();
        let screen = illustrate(&doc);
        for title in ["Work Experience", "Education", "Certificates", "Languages", "Soft Skills"] {
            assert!(screen.contains_text(title));
        }
        let paged = paginate(&doc);
        for title in ["WORK EXPERIENCE", "EDUCATION", "CERTIFICATES", "LANGUAGES", "SOFT SKILLS"] {
            assert!(paged.contains_text(title));
        }
    }
}
