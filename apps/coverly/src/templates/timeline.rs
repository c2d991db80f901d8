//! Timeline Pro: identity sidebar on the left, a grey rail with disc markers
//! for experience and education on the right.

use crate::layout::{
    place_block, BlockStyle, Color, ColumnFlow, DrawOp, Page, PageGeometry, PageSheet,
    PaginatedDocument,
};
use crate::models::resume::{join_meta, ExperienceItem, ResumeDocument};
use crate::templates::screen::{el, list, maybe_text_el, text_el, ScreenNode};
use crate::templates::{bulleted, date_range, section};

const MARGIN_X: f32 = 64.0;
const SIDEBAR_WIDTH: f32 = 220.0;
const RAIL_X: f32 = MARGIN_X + SIDEBAR_WIDTH + 30.0;
const RAIL_TOP: f32 = 120.0;
const RAIL_BOTTOM_INSET: f32 = 80.0;
const ENTRY_INDENT: f32 = 14.0;
const DISC_RADIUS: f32 = 3.0;
const SKILL_LIMIT: usize = 10;

const RAIL: Color = Color::from_rgb(200, 200, 200);
const NAME: Color = Color::from_rgb(30, 30, 30);
const HEADLINE: Color = Color::from_rgb(100, 100, 100);
const LABEL: Color = Color::from_rgb(80, 80, 80);
const TEXT: Color = Color::from_rgb(50, 50, 50);
const COMPANY: Color = Color::from_rgb(70, 70, 70);
const DATES: Color = Color::from_rgb(120, 120, 120);

fn contact_items(doc: &ResumeDocument) -> Vec<&str> {
    let c = &doc.contact;
    [c.email.as_str(), c.phone.as_str(), c.location.as_str()]
        .into_iter()
        .chain(c.links.iter().map(String::as_str))
        .filter(|s| !s.trim().is_empty())
        .collect()
}

/// Core then soft skills, capped.
fn skill_tokens(doc: &ResumeDocument) -> Vec<&str> {
    doc.skills.combined().into_iter().take(SKILL_LIMIT).collect()
}

pub fn illustrate(doc: &ResumeDocument) -> ScreenNode {
    let c = &doc.contact;
    let mut aside = Vec::new();
    aside.extend(maybe_text_el("h1", "name", &c.name));
    aside.extend(maybe_text_el("p", "headline", &c.headline));
    aside.extend(list("contact", "", &contact_items(doc)));
    if let Some(summary) = &doc.summary {
        aside.push(section("profile", "Profile", vec![text_el("p", "", summary)]));
    }
    if let Some(node) = list("chips", "chip", &skill_tokens(doc)) {
        aside.push(section("skills", "Skills", vec![node]));
    }

    let mut main = Vec::new();
    if !doc.experience.is_empty() {
        let roles = doc
            .experience
            .iter()
            .map(|role| {
                let mut parts = vec![el("span", "marker", Vec::new())];
                parts.extend(maybe_text_el("h3", "role", &role.role));
                parts.extend(maybe_text_el("p", "company", &role.company));
                parts.extend(maybe_text_el("p", "meta", &experience_meta(role)));
                let bullets: Vec<&str> = role.bullets.iter().map(String::as_str).collect();
                parts.extend(list("bullets", "", &bullets));
                el("article", "entry", parts)
            })
            .collect();
        main.push(section("experience", "Experience", roles));
    }
    if !doc.education.is_empty() {
        let schools = doc
            .education
            .iter()
            .map(|item| {
                let mut parts = vec![el("span", "marker", Vec::new())];
                parts.extend(maybe_text_el("h3", "degree", &item.degree));
                parts.extend(maybe_text_el("p", "company", &item.institution));
                parts.extend(maybe_text_el("p", "meta", &date_range(&item.start, &item.end)));
                el("div", "entry", parts)
            })
            .collect();
        main.push(section("education", "Education", schools));
    }

    el(
        "div",
        "sheet timeline",
        vec![el("aside", "sidebar", aside), el("main", "main", main)],
    )
}

fn experience_meta(role: &ExperienceItem) -> String {
    join_meta(
        [
            date_range(&role.start, &role.end).as_str(),
            role.location.as_deref().unwrap_or_default(),
        ],
        " · ",
    )
}

fn rail(page: &mut Page, geometry: &PageGeometry) {
    page.push(DrawOp::Line {
        x1: RAIL_X,
        y1: RAIL_TOP,
        x2: RAIL_X,
        y2: geometry.height - RAIL_BOTTOM_INSET,
        width: 2.0,
        color: RAIL,
    });
}

fn disc_at(y: f32) -> DrawOp {
    DrawOp::Disc {
        cx: RAIL_X,
        cy: y - 4.0,
        radius: DISC_RADIUS,
        color: Color::BLACK,
    }
}

pub fn paginate(doc: &ResumeDocument) -> PaginatedDocument {
    let geometry = PageGeometry::A4;
    let mut sheet = PageSheet::new(geometry, Some(rail));

    // Sidebar: first page only, never paginated.
    {
        let c = &doc.contact;
        let page = sheet.page_mut(0);
        let label = BlockStyle::new(10.0).bold().color(LABEL);
        let mut y = 80.0;
        y = place_block(page, MARGIN_X, y, SIDEBAR_WIDTH, &c.name, &BlockStyle::new(26.0).bold().color(NAME));
        y = place_block(page, MARGIN_X, y, SIDEBAR_WIDTH, &c.headline, &BlockStyle::new(12.0).bold().color(HEADLINE));
        y = y.max(RAIL_TOP) + 4.0;
        for item in contact_items(doc) {
            y = place_block(page, MARGIN_X, y, SIDEBAR_WIDTH, item, &BlockStyle::new(10.0).color(TEXT).space_after(2.0));
        }
        if let Some(summary) = &doc.summary {
            y += 20.0;
            y = place_block(page, MARGIN_X, y, SIDEBAR_WIDTH, "PROFILE", &label);
            y = place_block(page, MARGIN_X, y, SIDEBAR_WIDTH, summary, &BlockStyle::new(10.0).color(TEXT).space_after(14.0));
        }
        let skills = skill_tokens(doc);
        if !skills.is_empty() {
            y += 6.0;
            y = place_block(page, MARGIN_X, y, SIDEBAR_WIDTH, "SKILLS", &label);
            for skill in skills {
                y = place_block(page, MARGIN_X, y, SIDEBAR_WIDTH, &bulleted(skill), &BlockStyle::new(10.0).color(TEXT));
            }
        }
    }

    let column_width = geometry.width - RAIL_X - MARGIN_X + ENTRY_INDENT;
    let mut flow = ColumnFlow::new(&geometry, RAIL_X, column_width, RAIL_TOP).resume_at(RAIL_TOP);
    let heading = BlockStyle::new(10.0).bold().color(LABEL).space_after(6.0);
    let title = BlockStyle::new(11.0).bold().color(NAME).indent(ENTRY_INDENT);
    let company = BlockStyle::new(10.0).color(COMPANY).indent(ENTRY_INDENT);
    let dates = BlockStyle::new(10.0).color(DATES).indent(ENTRY_INDENT);
    let bullet = BlockStyle::new(10.0).color(TEXT).indent(ENTRY_INDENT);

    if !doc.experience.is_empty() {
        flow.emit_block(&mut sheet, "EXPERIENCE", &heading);
        for role in &doc.experience {
            flow.mark(&mut sheet, disc_at);
            flow.emit_block(&mut sheet, &role.role, &title);
            flow.emit_block(&mut sheet, &role.company, &company);
            flow.emit_block(&mut sheet, &experience_meta(role), &dates.space_after(4.0));
            for text in &role.bullets {
                flow.emit_block(&mut sheet, &bulleted(text), &bullet);
            }
            flow.advance(16.0);
        }
    }

    if !doc.education.is_empty() {
        flow.advance(20.0);
        flow.emit_block(&mut sheet, "EDUCATION", &heading);
        for school in &doc.education {
            flow.mark(&mut sheet, disc_at);
            flow.emit_block(&mut sheet, &school.degree, &title);
            flow.emit_block(&mut sheet, &school.institution, &company);
            flow.emit_block(&mut sheet, &date_range(&school.start, &school.end), &dates.space_after(12.0));
        }
    }

    sheet.finish()
}
