//! Text flow: word wrapping and the column cursor every template writes through.
//!
//! `ColumnFlow::emit_block` is the only way paginated text reaches a page. It
//! checks the cursor against the printable bottom *before* writing each line,
//! so a line is never placed past the bottom margin: it moves to the next page.

use crate::layout::font_metrics::{get_metrics, FontWeight};
use crate::layout::page::{Color, DrawOp, Page, PageGeometry, PageSheet, TextRun};

/// Extra vertical space between consecutive lines, on top of the font size.
pub const LINE_LEADING_PT: f32 = 4.0;

// ────────────────────────────────────────────────────────────────────────────
// Block style
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockStyle {
    pub size: f32,
    pub weight: FontWeight,
    pub color: Color,
    /// Gap added below the block once all of its lines are written.
    pub space_after: f32,
    /// Horizontal offset from the column origin; narrows the wrap width.
    pub indent: f32,
}

impl BlockStyle {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Regular,
            color: Color::BLACK,
            space_after: 0.0,
            indent: 0.0,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn space_after(mut self, gap: f32) -> Self {
        self.space_after = gap;
        self
    }

    pub fn indent(mut self, indent: f32) -> Self {
        self.indent = indent;
        self
    }

    /// Vertical advance per written line.
    pub fn line_advance(&self) -> f32 {
        self.size + LINE_LEADING_PT
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wrapping
// ────────────────────────────────────────────────────────────────────────────

/// Greedy word-wrap of `text` to `width` points.
///
/// `\n` starts a new paragraph and blank paragraphs become empty lines. A word
/// wider than the column is broken between characters. Blank input yields no
/// lines at all.
pub fn wrap_text(text: &str, width: f32, size: f32, weight: FontWeight) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let metrics = get_metrics(weight);
    let space_w = metrics.space_width * size;
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_w = 0.0_f32;

        for word in paragraph.split_whitespace() {
            let word_w = metrics.measure_pt(word, size);

            if word_w > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let (chunks, tail_w) = break_word(word, width, size, weight);
                let mut chunks = chunks.into_iter().peekable();
                while let Some(chunk) = chunks.next() {
                    if chunks.peek().is_some() {
                        lines.push(chunk);
                    } else {
                        current = chunk;
                    }
                }
                current_w = tail_w;
            } else if current.is_empty() {
                current.push_str(word);
                current_w = word_w;
            } else if current_w + space_w + word_w <= width {
                current.push(' ');
                current.push_str(word);
                current_w += space_w + word_w;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
                current_w = word_w;
            }
        }

        lines.push(current);
    }

    lines
}

/// Splits an over-long word into chunks that each fit `width`.
/// Returns the chunks and the width of the last one.
fn break_word(word: &str, width: f32, size: f32, weight: FontWeight) -> (Vec<String>, f32) {
    let metrics = get_metrics(weight);
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    let mut chunk_w = 0.0_f32;

    for c in word.chars() {
        let w = metrics.char_width(c) * size;
        if !chunk.is_empty() && chunk_w + w > width {
            chunks.push(std::mem::take(&mut chunk));
            chunk_w = 0.0;
        }
        chunk.push(c);
        chunk_w += w;
    }
    chunks.push(chunk);
    (chunks, chunk_w)
}

// ────────────────────────────────────────────────────────────────────────────
// Column flow
// ────────────────────────────────────────────────────────────────────────────

/// A vertical cursor over one column of a `PageSheet`.
///
/// Columns of the same template share the sheet but keep their own cursor and
/// page index, so each column paginates independently under the same rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnFlow {
    x: f32,
    width: f32,
    /// Cursor position after a page break.
    top: f32,
    /// Printable bottom; the cursor passing it forces a break.
    bottom: f32,
    cursor: f32,
    page: usize,
}

impl ColumnFlow {
    pub fn new(geometry: &PageGeometry, x: f32, width: f32, start_y: f32) -> Self {
        Self {
            x,
            width,
            top: geometry.margin,
            bottom: geometry.printable_bottom(),
            cursor: start_y,
            page: 0,
        }
    }

    /// A new column at `x` starting where this one currently is (page and cursor).
    pub fn fork(&self, x: f32, width: f32) -> Self {
        Self {
            x,
            width,
            ..self.clone()
        }
    }

    /// Overrides where the cursor resumes on continuation pages.
    pub fn resume_at(mut self, top: f32) -> Self {
        self.top = top;
        self
    }

    #[cfg(test)]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[cfg(test)]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[cfg(test)]
    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    #[cfg(test)]
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn advance(&mut self, dy: f32) {
        self.cursor += dy;
    }

    /// Moves the cursor down to `y` if it is above it; never moves up.
    pub fn advance_to(&mut self, y: f32) {
        self.cursor = self.cursor.max(y);
    }

    /// Moves to the next page if the cursor is past the printable bottom.
    pub fn break_if_needed(&mut self, sheet: &mut PageSheet) -> bool {
        if self.cursor <= self.bottom {
            return false;
        }
        self.page += 1;
        self.cursor = self.top;
        sheet.ensure_page(self.page);
        true
    }

    /// Wraps `text` to the column and writes it line by line, breaking pages
    /// as needed. Returns the number of lines written.
    pub fn emit_block(&mut self, sheet: &mut PageSheet, text: &str, style: &BlockStyle) -> usize {
        let x = self.x + style.indent;
        let width = (self.width - style.indent).max(1.0);
        let lines = wrap_text(text, width, style.size, style.weight);
        if lines.is_empty() {
            return 0;
        }

        for line in &lines {
            self.break_if_needed(sheet);
            if !line.is_empty() {
                sheet.push(self.page, text_op(x, self.cursor, line, style));
            }
            self.cursor += style.line_advance();
        }
        self.cursor += style.space_after;
        lines.len()
    }

    /// Places a shape at the current cursor, breaking first if needed.
    pub fn mark(&mut self, sheet: &mut PageSheet, draw: impl FnOnce(f32) -> DrawOp) {
        self.break_if_needed(sheet);
        let op = draw(self.cursor);
        sheet.push(self.page, op);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fixed placement (sidebars and headers)
// ────────────────────────────────────────────────────────────────────────────

/// Wraps and writes `text` starting at `y` without ever breaking the page.
///
/// Used for sidebars: content that runs past the bottom margin is clipped by
/// the page edge rather than continued. Returns the y below the last line.
pub fn place_block(page: &mut Page, x: f32, y: f32, width: f32, text: &str, style: &BlockStyle) -> f32 {
    let lines = wrap_text(text, (width - style.indent).max(1.0), style.size, style.weight);
    if lines.is_empty() {
        return y;
    }
    let mut y = y;
    for line in &lines {
        if !line.is_empty() {
            page.push(text_op(x + style.indent, y, line, style));
        }
        y += style.line_advance();
    }
    y + style.space_after
}

/// Writes a single unwrapped line centred on `center_x`.
pub fn place_centered(page: &mut Page, center_x: f32, y: f32, text: &str, style: &BlockStyle) {
    if text.trim().is_empty() {
        return;
    }
    let width = get_metrics(style.weight).measure_pt(text, style.size);
    page.push(text_op(center_x - width / 2.0, y, text, style));
}

fn text_op(x: f32, y: f32, text: &str, style: &BlockStyle) -> DrawOp {
    DrawOp::Text(TextRun {
        x,
        y,
        text: text.to_string(),
        size: style.size,
        weight: style.weight,
        color: style.color,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> PageSheet {
        PageSheet::new(PageGeometry::A4, None)
    }

    #[test]
    fn test_wrap_blank_text_yields_no_lines() {
        assert!(wrap_text("", 100.0, 11.0, FontWeight::Regular).is_empty());
        assert!(wrap_text("  \n ", 100.0, 11.0, FontWeight::Regular).is_empty());
    }

    #[test]
    fn test_wrap_short_text_is_single_line() {
        let lines = wrap_text("Hello world", 400.0, 11.0, FontWeight::Regular);
        assert_eq!(lines, vec!["Hello world"]);
    }

    #[test]
    fn test_wrap_never_exceeds_width() {
        let text = "Scaled product discovery practice resulting in three times more validated concepts per quarter across every squad";
        let width = 150.0;
        let lines = wrap_text(text, width, 11.0, FontWeight::Regular);
        assert!(lines.len() > 1);
        let metrics = get_metrics(FontWeight::Regular);
        for line in &lines {
            assert!(metrics.measure_pt(line, 11.0) <= width + 1e-3, "{line:?} too wide");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_breaks_oversized_word() {
        let word = "a".repeat(200);
        let lines = wrap_text(&word, 50.0, 10.0, FontWeight::Regular);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_wrap_continues_after_oversized_word() {
        let text = format!("{} tail", "x".repeat(60));
        let lines = wrap_text(&text, 100.0, 10.0, FontWeight::Regular);
        assert!(lines.len() > 1);
        assert!(lines.last().unwrap().ends_with("tail"));
    }

    #[test]
    fn test_wrap_keeps_paragraph_breaks() {
        let lines = wrap_text("First\n\nSecond", 400.0, 12.0, FontWeight::Regular);
        assert_eq!(lines, vec!["First", "", "Second"]);
    }

    #[test]
    fn test_emit_block_advances_cursor_per_line() {
        let mut sheet = sheet();
        let mut flow = ColumnFlow::new(&PageGeometry::A4, 48.0, 400.0, 60.0);
        let style = BlockStyle::new(11.0).space_after(6.0);
        let written = flow.emit_block(&mut sheet, "One line", &style);
        assert_eq!(written, 1);
        assert!((flow.cursor() - (60.0 + 15.0 + 6.0)).abs() < 1e-4);
    }

    #[test]
    fn test_emit_block_blank_text_is_noop() {
        let mut sheet = sheet();
        let mut flow = ColumnFlow::new(&PageGeometry::A4, 48.0, 400.0, 60.0);
        let style = BlockStyle::new(11.0).space_after(6.0);
        assert_eq!(flow.emit_block(&mut sheet, "   ", &style), 0);
        assert_eq!(flow.cursor(), 60.0);
    }

    #[test]
    fn test_emit_block_breaks_before_writing_past_bottom() {
        let geometry = PageGeometry::A4;
        let mut sheet = sheet();
        let mut flow = ColumnFlow::new(&geometry, 48.0, 400.0, geometry.printable_bottom() - 5.0);
        let style = BlockStyle::new(10.0);
        flow.emit_block(&mut sheet, "first\nsecond", &style);

        let doc = sheet.finish();
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.page_text(0), vec!["first"]);
        assert_eq!(doc.page_text(1), vec!["second"]);
        let second = doc.pages[1].text_runs().next().unwrap();
        assert_eq!(second.y, geometry.margin);
    }

    #[test]
    fn test_no_line_is_written_below_printable_bottom() {
        let geometry = PageGeometry::A4;
        let mut sheet = sheet();
        let mut flow = ColumnFlow::new(&geometry, 48.0, 300.0, 60.0);
        let style = BlockStyle::new(11.0).space_after(2.0);
        for i in 0..200 {
            flow.emit_block(&mut sheet, &format!("• bullet number {i} with some words"), &style);
        }
        let doc = sheet.finish();
        assert!(doc.page_count() >= 2);
        for page in &doc.pages {
            for run in page.text_runs() {
                assert!(run.y <= geometry.printable_bottom());
            }
        }
    }

    #[test]
    fn test_resume_at_sets_continuation_top() {
        let geometry = PageGeometry::A4;
        let mut sheet = sheet();
        let mut flow =
            ColumnFlow::new(&geometry, 48.0, 300.0, geometry.height).resume_at(100.0);
        flow.emit_block(&mut sheet, "after break", &BlockStyle::new(10.0));
        let doc = sheet.finish();
        assert_eq!(doc.pages[1].text_runs().next().unwrap().y, 100.0);
    }

    #[test]
    fn test_fork_keeps_page_and_cursor() {
        let geometry = PageGeometry::A4;
        let mut sheet = sheet();
        let mut flow = ColumnFlow::new(&geometry, 48.0, 400.0, geometry.height);
        flow.emit_block(&mut sheet, "spill", &BlockStyle::new(10.0));
        let right = flow.fork(320.0, 200.0);
        assert_eq!(right.page(), 1);
        assert_eq!(right.cursor(), flow.cursor());
        assert_eq!(right.x(), 320.0);
    }

    #[test]
    fn test_advance_to_never_moves_up() {
        let mut flow = ColumnFlow::new(&PageGeometry::A4, 48.0, 400.0, 150.0);
        flow.advance_to(100.0);
        assert_eq!(flow.cursor(), 150.0);
        flow.advance_to(200.0);
        assert_eq!(flow.cursor(), 200.0);
    }

    #[test]
    fn test_place_block_never_adds_pages() {
        let mut page = Page::default();
        let y = place_block(&mut page, 40.0, 800.0, 140.0, &"word ".repeat(100), &BlockStyle::new(10.0));
        assert!(y > PageGeometry::A4.height);
        assert!(page.text_runs().count() > 3);
    }

    #[test]
    fn test_place_centered_positions_run_around_center() {
        let mut page = Page::default();
        let style = BlockStyle::new(12.0);
        place_centered(&mut page, 300.0, 50.0, "Center", &style);
        let run = page.text_runs().next().unwrap();
        let width = get_metrics(FontWeight::Regular).measure_pt("Center", 12.0);
        assert!((run.x + width / 2.0 - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_indent_shifts_x_and_narrows_width() {
        let mut sheet = sheet();
        let mut flow = ColumnFlow::new(&PageGeometry::A4, 48.0, 200.0, 60.0);
        flow.emit_block(&mut sheet, "indented", &BlockStyle::new(10.0).indent(12.0));
        let doc = sheet.finish();
        assert_eq!(doc.pages[0].text_runs().next().unwrap().x, 60.0);
    }
}
