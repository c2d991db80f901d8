//! Fixed-size pages and the positioned draw operations placed on them.
//!
//! Coordinates are top-down points: `y` grows towards the bottom of the page
//! and a text run's `y` is its baseline. The exporter flips to PDF space.

use serde::Serialize;

use crate::layout::font_metrics::FontWeight;

pub const A4_WIDTH_PT: f32 = 595.28;
pub const A4_HEIGHT_PT: f32 = 841.89;
pub const PAGE_MARGIN_PT: f32 = 48.0;

// ────────────────────────────────────────────────────────────────────────────
// Geometry and colour
// ────────────────────────────────────────────────────────────────────────────

/// One printable geometry shared by every page of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    pub const A4: PageGeometry = PageGeometry {
        width: A4_WIDTH_PT,
        height: A4_HEIGHT_PT,
        margin: PAGE_MARGIN_PT,
    };

    /// Lowest baseline a line may be written at before a page break.
    pub fn printable_bottom(&self) -> f32 {
        self.height - self.margin
    }

    pub fn printable_width(&self) -> f32 {
        self.width - self.margin * 2.0
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

/// RGB colour with components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Create color from RGB values (0-255)
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Linear interpolation towards `to`; `t` is clamped to 0.0 - 1.0.
    pub fn lerp(&self, to: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: self.r + t * (to.r - self.r),
            g: self.g + t * (to.g - self.g),
            b: self.b + t * (to.b - self.b),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Draw operations
// ────────────────────────────────────────────────────────────────────────────

/// A single line of text at a resolved position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub size: f32,
    pub weight: FontWeight,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Text(TextRun),
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Color,
    },
    Disc {
        cx: f32,
        cy: f32,
        radius: f32,
        color: Color,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    #[cfg(test)]
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            _ => None,
        })
    }
}

/// The finished output of a paginated renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedDocument {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

impl PaginatedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Text of every run on `page`, in draw order.
    #[cfg(test)]
    pub fn page_text(&self, page: usize) -> Vec<&str> {
        self.pages
            .get(page)
            .map(|p| p.text_runs().map(|r| r.text.as_str()).collect())
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub fn contains_text(&self, needle: &str) -> bool {
        self.pages
            .iter()
            .flat_map(|p| p.text_runs())
            .any(|r| r.text.contains(needle))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page sheet
// ────────────────────────────────────────────────────────────────────────────

/// Paints the chrome every page of a template shares (backgrounds, rails).
pub type PageDecorator = fn(&mut Page, &PageGeometry);

/// Growable list of pages that column flows write into.
///
/// Pages are created on demand and decorated once, when created, so a column
/// that breaks onto a fresh page finds the template's background already drawn.
pub struct PageSheet {
    geometry: PageGeometry,
    pages: Vec<Page>,
    decorate: Option<PageDecorator>,
}

impl PageSheet {
    /// Starts a sheet with its first page already created.
    pub fn new(geometry: PageGeometry, decorate: Option<PageDecorator>) -> Self {
        let mut sheet = Self {
            geometry,
            pages: Vec::new(),
            decorate,
        };
        sheet.ensure_page(0);
        sheet
    }

    /// Makes sure pages `0..=index` exist.
    pub fn ensure_page(&mut self, index: usize) {
        while self.pages.len() <= index {
            let mut page = Page::default();
            if let Some(decorate) = self.decorate {
                decorate(&mut page, &self.geometry);
            }
            self.pages.push(page);
        }
    }

    pub fn page_mut(&mut self, index: usize) -> &mut Page {
        self.ensure_page(index);
        &mut self.pages[index]
    }

    pub fn push(&mut self, page: usize, op: DrawOp) {
        self.page_mut(page).push(op);
    }

    pub fn finish(self) -> PaginatedDocument {
        PaginatedDocument {
            geometry: self.geometry,
            pages: self.pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stripe(page: &mut Page, geometry: &PageGeometry) {
        page.push(DrawOp::Rect {
            x: 0.0,
            y: 0.0,
            width: geometry.width,
            height: 10.0,
            color: Color::BLACK,
        });
    }

    #[test]
    fn test_a4_printable_area() {
        let g = PageGeometry::A4;
        assert!((g.printable_bottom() - 793.89).abs() < 1e-3);
        assert!((g.printable_width() - 499.28).abs() < 1e-3);
    }

    #[test]
    fn test_sheet_starts_with_one_decorated_page() {
        let sheet = PageSheet::new(PageGeometry::A4, Some(stripe));
        let doc = sheet.finish();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.pages[0].ops.len(), 1);
    }

    #[test]
    fn test_ensure_page_decorates_every_new_page() {
        let mut sheet = PageSheet::new(PageGeometry::A4, Some(stripe));
        sheet.ensure_page(2);
        let doc = sheet.finish();
        assert_eq!(doc.page_count(), 3);
        assert!(doc.pages.iter().all(|p| p.ops.len() == 1));
    }

    #[test]
    fn test_color_lerp_endpoints() {
        let a = Color::from_rgb(0, 0, 0);
        let b = Color::from_rgb(255, 255, 255);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert!((a.lerp(b, 0.5).g - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_page_text_of_missing_page_is_empty() {
        let doc = PageSheet::new(PageGeometry::A4, None).finish();
        assert!(doc.page_text(5).is_empty());
    }
}
