// Pagination engine shared by every template.
// Text is measured with static Helvetica metrics, wrapped per column, and
// written through ColumnFlow, which owns the page-break rule.

pub mod fill;
pub mod flow;
pub mod font_metrics;
pub mod page;

pub use fill::{fill_rect, fill_vertical_gradient};
pub use flow::{place_block, place_centered, BlockStyle, ColumnFlow};
pub use font_metrics::FontWeight;
pub use page::{Color, DrawOp, Page, PageGeometry, PageSheet, PaginatedDocument, TextRun};
