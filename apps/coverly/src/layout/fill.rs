//! Filled shapes used for page chrome.

use crate::layout::page::{Color, DrawOp, Page};

/// Number of horizontal bands a vertical gradient is drawn with.
pub const GRADIENT_STEPS: usize = 20;

/// Paints a solid rectangle.
pub fn fill_rect(page: &mut Page, x: f32, y: f32, width: f32, height: f32, color: Color) {
    page.push(DrawOp::Rect {
        x,
        y,
        width,
        height,
        color,
    });
}

/// Approximates a top-to-bottom gradient with `GRADIENT_STEPS` bands.
///
/// Band `i` is coloured `from + (i / steps) * (to - from)` and overlaps the
/// next band by one point so no seam shows between them.
pub fn fill_vertical_gradient(
    page: &mut Page,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    from: Color,
    to: Color,
) {
    let band = height / GRADIENT_STEPS as f32;
    for i in 0..GRADIENT_STEPS {
        let t = i as f32 / GRADIENT_STEPS as f32;
        fill_rect(page, x, y + band * i as f32, width, band + 1.0, from.lerp(to, t));
    }
}
