//! The on-screen illustration tree.
//!
//! Templates build a small element tree instead of markup so the same output
//! can be serialised to JSON for a client or rendered to HTML for a preview.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum ScreenNode {
    Element {
        tag: &'static str,
        class: String,
        children: Vec<ScreenNode>,
    },
    Text {
        text: String,
    },
}

pub fn el(tag: &'static str, class: &str, children: Vec<ScreenNode>) -> ScreenNode {
    ScreenNode::Element {
        tag,
        class: class.to_string(),
        children,
    }
}

pub fn text(value: impl Into<String>) -> ScreenNode {
    ScreenNode::Text { text: value.into() }
}

/// Element holding a single text child.
pub fn text_el(tag: &'static str, class: &str, value: impl Into<String>) -> ScreenNode {
    el(tag, class, vec![text(value)])
}

/// Like `text_el`, but nothing at all for blank text.
pub fn maybe_text_el(tag: &'static str, class: &str, value: &str) -> Option<ScreenNode> {
    if value.trim().is_empty() {
        None
    } else {
        Some(text_el(tag, class, value))
    }
}

/// `<ul>` of plain items; `None` when there are no items.
pub fn list(class: &str, item_class: &str, items: &[&str]) -> Option<ScreenNode> {
    if items.is_empty() {
        return None;
    }
    Some(el(
        "ul",
        class,
        items.iter().map(|item| text_el("li", item_class, *item)).collect(),
    ))
}

impl ScreenNode {
    /// Renders the tree as an HTML fragment. Text is escaped.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            ScreenNode::Text { text } => escape_into(text, out),
            ScreenNode::Element {
                tag,
                class,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                if !class.is_empty() {
                    out.push_str(" class=\"");
                    escape_into(class, out);
                    out.push('"');
                }
                out.push('>');
                for child in children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }

    /// All text in document order, one entry per text node.
    #[cfg(test)]
    pub fn texts(&self) -> Vec<&str> {
        let mut acc = Vec::new();
        self.collect_texts(&mut acc);
        acc
    }

    #[cfg(test)]
    fn collect_texts<'a>(&'a self, acc: &mut Vec<&'a str>) {
        match self {
            ScreenNode::Text { text } => acc.push(text),
            ScreenNode::Element { children, .. } => {
                for child in children {
                    child.collect_texts(acc);
                }
            }
        }
    }

    #[cfg(test)]
    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }
}

fn escape_into(raw: &str, out: &mut String) {
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

const PREVIEW_CSS: &str = "\
body{margin:0;padding:24px;background:#f3f4f6;font-family:Helvetica,Arial,sans-serif;color:#111827}\
.sheet{width:620px;min-height:880px;margin:0 auto;background:#fff;box-shadow:0 8px 24px rgba(0,0,0,.08)}\
h1,h2,h3,p,ul{margin:0}ul{padding-left:1.1em}\
.section-title{font-size:11px;font-weight:700;letter-spacing:.3em;text-transform:uppercase;margin:18px 0 6px}\
.meta{font-size:12px;color:#6b7280}\
.classic{padding:32px}\
.creative{display:grid;grid-template-columns:200px 1fr}\
.creative .sidebar{background:#0f3c7a;color:#fff;padding:24px}\
.creative .main{background:#edf3ff;padding:32px}\
.pastel{padding:40px;background:linear-gradient(#ebf8f2,#dcf0e5)}\
.pastel .header{text-align:center}.pastel .columns{display:grid;grid-template-columns:1.3fr .7fr;gap:24px}\
.timeline{display:grid;grid-template-columns:240px 1fr;padding:40px}\
.timeline .main{border-left:2px solid #c8c8c8;padding-left:28px}";

/// Wraps a rendered tree in a standalone HTML page.
pub fn html_page(title: &str, body: &ScreenNode) -> String {
    let mut escaped_title = String::new();
    escape_into(title, &mut escaped_title);
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{escaped_title}</title>\
         <style>{PREVIEW_CSS}</style></head><body>{}</body></html>",
        body.to_html()
    )
}
