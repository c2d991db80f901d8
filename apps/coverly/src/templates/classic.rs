//! Modern Classic: a single full-width column with uppercase section headings.

use crate::layout::{BlockStyle, Color, ColumnFlow, PageGeometry, PageSheet, PaginatedDocument};
use crate::models::resume::{join_meta, ResumeDocument};
use crate::templates::screen::{el, list, maybe_text_el, text_el, ScreenNode};
use crate::templates::{bulleted, date_range, section};

const START_Y: f32 = 60.0;
const MUTED: Color = Color::from_rgb(107, 114, 128);

pub fn illustrate(doc: &ResumeDocument) -> ScreenNode {
    let c = &doc.contact;
    let mut header: Vec<ScreenNode> = Vec::new();
    header.extend(maybe_text_el("h1", "name", &c.name));
    header.extend(maybe_text_el("p", "headline", &c.headline));
    header.extend(maybe_text_el(
        "p",
        "meta",
        &join_meta([c.location.as_str(), c.email.as_str(), c.phone.as_str()], " · "),
    ));
    header.extend(maybe_text_el(
        "p",
        "meta",
        &join_meta(c.links.iter().map(String::as_str), " · "),
    ));

    let mut sections = vec![el("header", "header", header)];

    if let Some(summary) = &doc.summary {
        sections.push(section("profile", "Profile", vec![text_el("p", "", summary)]));
    }

    if !doc.experience.is_empty() {
        let roles = doc
            .experience
            .iter()
            .map(|role| {
                let mut parts = vec![text_el("h3", "role", join_meta([role.role.as_str(), role.company.as_str()], " · "))];
                parts.extend(maybe_text_el(
                    "p",
                    "meta",
                    &join_meta(
                        [
                            role.location.as_deref().unwrap_or_default(),
                            date_range(&role.start, &role.end).as_str(),
                        ],
                        " · ",
                    ),
                ));
                let bullets: Vec<&str> = role.bullets.iter().map(String::as_str).collect();
                parts.extend(list("bullets", "", &bullets));
                el("article", "entry", parts)
            })
            .collect();
        sections.push(section("experience", "Experience", roles));
    }

    if !doc.education.is_empty() {
        let schools = doc
            .education
            .iter()
            .map(|item| {
                let mut parts = vec![text_el(
                    "h3",
                    "degree",
                    join_meta([item.degree.as_str(), item.institution.as_str()], " · "),
                )];
                parts.extend(maybe_text_el("p", "meta", &date_range(&item.start, &item.end)));
                if let Some(details) = &item.details {
                    parts.push(text_el("p", "", details));
                }
                el("div", "entry", parts)
            })
            .collect();
        sections.push(section("education", "Education", schools));
    }

    if !doc.skills.is_empty() {
        let mut groups = Vec::new();
        if !doc.skills.core.is_empty() {
            groups.push(text_el("p", "", format!("Core: {}", doc.skills.core.join(", "))));
        }
        if !doc.skills.soft.is_empty() {
            groups.push(text_el("p", "", format!("Soft: {}", doc.skills.soft.join(", "))));
        }
        sections.push(section("skills", "Skills", groups));
    }

    for (class, title, items) in [
        ("certifications", "Certifications", &doc.certifications),
        ("projects", "Projects", &doc.projects),
    ] {
        let items: Vec<&str> = items.iter().map(String::as_str).collect();
        if let Some(node) = list("bullets", "", &items) {
            sections.push(section(class, title, vec![node]));
        }
    }

    el("div", "sheet classic", sections)
}

pub fn paginate(doc: &ResumeDocument) -> PaginatedDocument {
    let geometry = PageGeometry::A4;
    let mut sheet = PageSheet::new(geometry, None);
    let mut flow = ColumnFlow::new(&geometry, geometry.margin, geometry.printable_width(), START_Y);

    let heading = BlockStyle::new(12.0).bold().space_after(8.0);
    let entry_title = BlockStyle::new(11.0).bold().space_after(4.0);
    let meta = BlockStyle::new(10.0).color(MUTED).space_after(2.0);
    let bullet = BlockStyle::new(10.0);
    let body = BlockStyle::new(11.0).space_after(4.0);

    let c = &doc.contact;
    flow.emit_block(&mut sheet, &c.name, &BlockStyle::new(22.0).bold().space_after(6.0));
    flow.emit_block(&mut sheet, &c.headline, &BlockStyle::new(12.0));
    flow.emit_block(
        &mut sheet,
        &join_meta([c.location.as_str(), c.email.as_str(), c.phone.as_str()], " · "),
        &BlockStyle::new(10.0).space_after(2.0),
    );
    flow.emit_block(
        &mut sheet,
        &join_meta(c.links.iter().map(String::as_str), " · "),
        &BlockStyle::new(10.0).space_after(14.0),
    );

    if let Some(summary) = &doc.summary {
        flow.emit_block(&mut sheet, "PROFILE", &heading);
        flow.emit_block(&mut sheet, summary, &body);
    }

    if !doc.experience.is_empty() {
        flow.emit_block(&mut sheet, "EXPERIENCE", &heading);
        for role in &doc.experience {
            flow.emit_block(
                &mut sheet,
                &join_meta([role.role.as_str(), role.company.as_str()], " · "),
                &entry_title,
            );
            flow.emit_block(
                &mut sheet,
                &join_meta(
                    [
                        role.location.as_deref().unwrap_or_default(),
                        date_range(&role.start, &role.end).as_str(),
                    ],
                    " · ",
                ),
                &meta,
            );
            for item in &role.bullets {
                flow.emit_block(&mut sheet, &bulleted(item), &bullet);
            }
        }
    }

    if !doc.education.is_empty() {
        flow.emit_block(&mut sheet, "EDUCATION", &heading);
        for item in &doc.education {
            flow.emit_block(
                &mut sheet,
                &join_meta([item.degree.as_str(), item.institution.as_str()], " · "),
                &entry_title,
            );
            flow.emit_block(&mut sheet, &date_range(&item.start, &item.end), &meta);
            if let Some(details) = &item.details {
                flow.emit_block(&mut sheet, details, &BlockStyle::new(10.0).space_after(2.0));
            }
        }
    }

    if !doc.skills.is_empty() {
        flow.emit_block(&mut sheet, "SKILLS", &heading);
        if !doc.skills.core.is_empty() {
            flow.emit_block(&mut sheet, &format!("Core: {}", doc.skills.core.join(", ")), &body);
        }
        if !doc.skills.soft.is_empty() {
            flow.emit_block(&mut sheet, &format!("Soft: {}", doc.skills.soft.join(", ")), &body);
        }
    }

    for (title, items) in [("CERTIFICATIONS", &doc.certifications), ("PROJECTS", &doc.projects)] {
        if items.is_empty() {
            continue;
        }
        flow.emit_block(&mut sheet, title, &heading);
        for item in items {
            flow.emit_block(&mut sheet, &bulleted(item), &body);
        }
    }

    sheet.finish()
}
