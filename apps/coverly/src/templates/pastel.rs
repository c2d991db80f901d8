//! Pastel Breeze: centred header on a stepped gradient, then two columns.
//!
//! The left column holds work history; the right column holds skills,
//! languages and education. Both columns paginate independently.

use crate::layout::{
    fill_vertical_gradient, place_centered, BlockStyle, Color, ColumnFlow, Page, PageGeometry,
    PageSheet, PaginatedDocument,
};
use crate::models::resume::{join_meta, ResumeDocument};
use crate::templates::screen::{el, list, maybe_text_el, text_el, ScreenNode};
use crate::templates::{bulleted, date_range, section};

const MARGIN_X: f32 = 60.0;
const COLUMN_GAP: f32 = 40.0;
const BULLET_INDENT: f32 = 12.0;

const GRADIENT_TOP: Color = Color::from_rgb(235, 248, 242);
const GRADIENT_BOTTOM: Color = Color::from_rgb(220, 240, 229);
const ACCENT: Color = Color::from_rgb(70, 158, 129);
const NAME: Color = Color::from_rgb(40, 60, 55);
const CONTACT: Color = Color::from_rgb(90, 110, 100);
const SUMMARY: Color = Color::from_rgb(80, 100, 90);
const TITLE: Color = Color::from_rgb(42, 60, 52);
const SOFT: Color = Color::from_rgb(90, 120, 105);
const BODY: Color = Color::from_rgb(60, 80, 70);

fn contact_line(doc: &ResumeDocument, separator: &str) -> String {
    let c = &doc.contact;
    join_meta(
        [
            c.email.as_str(),
            c.phone.as_str(),
            c.location.as_str(),
            c.links.first().map(String::as_str).unwrap_or_default(),
        ],
        separator,
    )
}

pub fn illustrate(doc: &ResumeDocument) -> ScreenNode {
    let c = &doc.contact;
    let mut header = Vec::new();
    header.extend(maybe_text_el("p", "headline", &c.headline));
    header.extend(maybe_text_el("h1", "name", &c.name));
    header.extend(maybe_text_el("p", "meta", &contact_line(doc, "  •  ")));
    if let Some(summary) = &doc.summary {
        header.push(text_el("p", "summary", summary));
    }

    let mut left = Vec::new();
    if !doc.experience.is_empty() {
        let roles = doc
            .experience
            .iter()
            .map(|role| {
                let mut parts = Vec::new();
                parts.extend(maybe_text_el("h3", "role", &role.role));
                parts.extend(maybe_text_el("p", "company", &role.company));
                parts.extend(maybe_text_el("p", "meta", &date_range(&role.start, &role.end)));
                let bullets: Vec<&str> = role.bullets.iter().map(String::as_str).collect();
                parts.extend(list("bullets", "", &bullets));
                el("article", "entry", parts)
            })
            .collect();
        left.push(section("card", "Work History", roles));
    }

    let mut right = Vec::new();
    let skills: Vec<&str> = doc.skills.core.iter().map(String::as_str).collect();
    if let Some(node) = list("chips", "chip", &skills) {
        right.push(section("card", "Skills", vec![node]));
    }
    let languages: Vec<&str> = doc.languages.iter().map(String::as_str).collect();
    if let Some(node) = list("chips", "chip", &languages) {
        right.push(section("card", "Languages", vec![node]));
    }
    if !doc.education.is_empty() {
        let schools = doc
            .education
            .iter()
            .map(|item| {
                let mut parts = Vec::new();
                parts.extend(maybe_text_el("p", "degree", &item.degree));
                parts.extend(maybe_text_el("p", "company", &item.institution));
                parts.extend(maybe_text_el("p", "meta", &date_range(&item.start, &item.end)));
                el("div", "entry", parts)
            })
            .collect();
        right.push(section("card", "Education", schools));
    }

    el(
        "div",
        "sheet pastel",
        vec![
            el("header", "header", header),
            el(
                "div",
                "columns",
                vec![el("section", "left", left), el("aside", "right", right)],
            ),
        ],
    )
}

fn gradient_background(page: &mut Page, geometry: &PageGeometry) {
    fill_vertical_gradient(
        page,
        0.0,
        0.0,
        geometry.width,
        geometry.height,
        GRADIENT_TOP,
        GRADIENT_BOTTOM,
    );
}

pub fn paginate(doc: &ResumeDocument) -> PaginatedDocument {
    let geometry = PageGeometry::A4;
    let mut sheet = PageSheet::new(geometry, Some(gradient_background));
    let center = geometry.width / 2.0;

    let c = &doc.contact;
    {
        let page = sheet.page_mut(0);
        place_centered(page, center, 60.0, &c.headline, &BlockStyle::new(12.0).bold().color(ACCENT));
        place_centered(page, center, 95.0, &c.name, &BlockStyle::new(28.0).bold().color(NAME));
        place_centered(
            page,
            center,
            120.0,
            &contact_line(doc, "  •  "),
            &BlockStyle::new(11.0).color(CONTACT),
        );
    }

    let mut flow = ColumnFlow::new(&geometry, MARGIN_X, geometry.width - MARGIN_X * 2.0, 150.0);
    if let Some(summary) = &doc.summary {
        flow.emit_block(&mut sheet, summary, &BlockStyle::new(11.0).color(SUMMARY).space_after(20.0));
    }

    let left_width = center - MARGIN_X - COLUMN_GAP / 2.0;
    let right_x = center + COLUMN_GAP;
    let right_width = geometry.width - right_x - MARGIN_X;
    let mut left = flow.fork(MARGIN_X, left_width);
    let mut right = flow.fork(right_x, right_width);

    let heading = BlockStyle::new(11.0).bold().color(ACCENT).space_after(4.0);
    let body = BlockStyle::new(11.0).color(BODY);

    if !doc.experience.is_empty() {
        left.emit_block(&mut sheet, "WORK HISTORY", &heading);
        for role in &doc.experience {
            left.emit_block(&mut sheet, &role.role, &BlockStyle::new(12.0).bold().color(TITLE));
            left.emit_block(&mut sheet, &role.company, &BlockStyle::new(11.0).color(TITLE));
            left.emit_block(
                &mut sheet,
                &date_range(&role.start, &role.end),
                &BlockStyle::new(11.0).color(SOFT).space_after(2.0),
            );
            for text in &role.bullets {
                left.emit_block(&mut sheet, &bulleted(text), &body.indent(BULLET_INDENT));
            }
            left.advance(14.0);
        }
    }

    for (title, items) in [("SKILLS", &doc.skills.core), ("LANGUAGES", &doc.languages)] {
        if items.is_empty() {
            continue;
        }
        right.emit_block(&mut sheet, title, &heading);
        for text in items {
            right.emit_block(&mut sheet, &bulleted(text), &body);
        }
        right.advance(20.0);
    }

    if !doc.education.is_empty() {
        right.emit_block(&mut sheet, "EDUCATION", &heading);
        for school in &doc.education {
            right.emit_block(&mut sheet, &school.degree, &body);
            right.emit_block(&mut sheet, &school.institution, &BlockStyle::new(11.0).color(SOFT));
            right.emit_block(
                &mut sheet,
                &date_range(&school.start, &school.end),
                &body.space_after(6.0),
            );
        }
    }

    sheet.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::fill::GRADIENT_STEPS;
    use crate::layout::font_metrics::get_metrics;
    use crate::layout::DrawOp;
    use crate::templates::samples;

    #[test]
    fn test_pages_start_with_gradient_bands() {
        let paged = paginate(&samples::pastel());
        let bands = paged.pages[0]
            .ops
            .iter()
            .take_while(|op| matches!(op, DrawOp::Rect { .. }))
            .count();
        assert_eq!(bands, GRADIENT_STEPS);
    }

    #[test]
    fn test_header_is_centred() {
        let doc = samples::pastel();
        let paged = paginate(&doc);
        let name = paged.pages[0]
            .text_runs()
            .find(|r| r.text == doc.contact.name)
            .unwrap();
        let width = get_metrics(name.weight).measure_pt(&name.text, name.size);
        let mid = name.x + width / 2.0;
        assert!((mid - PageGeometry::A4.width / 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_columns_split_content() {
        let paged = paginate(&samples::pastel());
        let runs: Vec<_> = paged.pages[0].text_runs().collect();
        let x_of = |text: &str| runs.iter().find(|r| r.text == text).unwrap().x;
        assert_eq!(x_of("WORK HISTORY"), MARGIN_X);
        assert!(x_of("SKILLS") > PageGeometry::A4.width / 2.0);
        assert!(x_of("EDUCATION") > PageGeometry::A4.width / 2.0);
        assert!(x_of("LANGUAGES") > PageGeometry::A4.width / 2.0);
    }

    #[test]
    fn test_contact_line_uses_first_link_only() {
        let mut doc = samples::pastel();
        doc.contact.links.push("example.com/second".to_string());
        let line = contact_line(&doc, "  •  ");
        assert!(line.ends_with("linkedin.com/in/panattonichris"));
        assert!(!line.contains("second"));
    }

    #[test]
    fn test_missing_languages_drop_the_section() {
        let mut doc = samples::pastel();
        doc.languages.clear();
        assert!(!paginate(&doc).contains_text("LANGUAGES"));
        assert!(!illustrate(&doc).contains_text("Languages"));
    }
}
