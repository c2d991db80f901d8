//! Encodes a `PaginatedDocument` as PDF with lopdf.
//!
//! Text uses the two standard Helvetica faces with WinAnsiEncoding, so nothing
//! is embedded and the widths the layout engine measured are the widths that
//! print. Output contains no timestamps or ids: equal input gives equal bytes.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::export::ExportError;
use crate::layout::{Color, DrawOp, FontWeight, Page, PaginatedDocument, TextRun};

/// Control-point offset for approximating a quarter circle with one Bézier.
const KAPPA: f32 = 0.552_284_8;

pub fn encode(paginated: &PaginatedDocument) -> Result<Vec<u8>, ExportError> {
    let geometry = paginated.geometry;
    let mut doc = Document::with_version("1.5");

    let mut fonts = Dictionary::new();
    for weight in [FontWeight::Regular, FontWeight::Bold] {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => weight.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(weight.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let pages_id = doc.new_object_id();
    let mut kids: Vec<Object> = Vec::with_capacity(paginated.pages.len());
    for page in &paginated.pages {
        let content = Content {
            operations: page_operations(page, geometry.height),
        };
        let bytes = content
            .encode()
            .map_err(|e| ExportError::Encode(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), bytes));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), geometry.width.into(), geometry.height.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id: ObjectId = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    Ok(buffer)
}

/// Content-stream operators for one page. `page_height` flips the top-down
/// layout coordinates into PDF space.
fn page_operations(page: &Page, page_height: f32) -> Vec<Operation> {
    let flip = |y: f32| page_height - y;
    let mut ops = Vec::new();

    for op in &page.ops {
        match op {
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                color,
            } => {
                ops.push(fill_color(*color));
                ops.push(Operation::new(
                    "re",
                    vec![
                        (*x).into(),
                        flip(y + height).into(),
                        (*width).into(),
                        (*height).into(),
                    ],
                ));
                ops.push(Operation::new("f", vec![]));
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => {
                ops.push(Operation::new(
                    "RG",
                    vec![color.r.into(), color.g.into(), color.b.into()],
                ));
                ops.push(Operation::new("w", vec![(*width).into()]));
                ops.push(Operation::new("m", vec![(*x1).into(), flip(*y1).into()]));
                ops.push(Operation::new("l", vec![(*x2).into(), flip(*y2).into()]));
                ops.push(Operation::new("S", vec![]));
            }
            DrawOp::Disc {
                cx,
                cy,
                radius,
                color,
            } => {
                ops.push(fill_color(*color));
                ops.extend(circle_path(*cx, flip(*cy), *radius));
                ops.push(Operation::new("f", vec![]));
            }
            DrawOp::Text(run) => ops.extend(text_operations(run, flip(run.y))),
        }
    }
    ops
}

fn fill_color(color: Color) -> Operation {
    Operation::new("rg", vec![color.r.into(), color.g.into(), color.b.into()])
}

fn text_operations(run: &TextRun, baseline: f32) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        fill_color(run.color),
        Operation::new(
            "Tf",
            vec![run.weight.resource_name().into(), run.size.into()],
        ),
        Operation::new("Td", vec![run.x.into(), baseline.into()]),
        Operation::new(
            "Tj",
            vec![Object::String(win_ansi(&run.text), StringFormat::Literal)],
        ),
        Operation::new("ET", vec![]),
    ]
}

/// Closed circle path from four cubic Béziers, in PDF coordinates.
fn circle_path(cx: f32, cy: f32, r: f32) -> Vec<Operation> {
    let k = r * KAPPA;
    let curve = |pts: [f32; 6]| Operation::new("c", pts.iter().map(|v| (*v).into()).collect());
    vec![
        Operation::new("m", vec![(cx + r).into(), cy.into()]),
        curve([cx + r, cy + k, cx + k, cy + r, cx, cy + r]),
        curve([cx - k, cy + r, cx - r, cy + k, cx - r, cy]),
        curve([cx - r, cy - k, cx - k, cy - r, cx, cy - r]),
        curve([cx + k, cy - r, cx + r, cy - k, cx + r, cy]),
        Operation::new("h", vec![]),
    ]
}

/// Maps text to WinAnsi (CP1252) bytes. Unmappable characters become `?`.
pub fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{BlockStyle, ColumnFlow, PageGeometry, PageSheet};

    fn two_page_document() -> PaginatedDocument {
        let geometry = PageGeometry::A4;
        let mut sheet = PageSheet::new(geometry, None);
        let mut flow = ColumnFlow::new(&geometry, 48.0, 400.0, geometry.printable_bottom());
        flow.emit_block(&mut sheet, "• first\n• second", &BlockStyle::new(10.0));
        sheet.finish()
    }

    fn page_strings(bytes: &[u8]) -> Vec<Vec<Vec<u8>>> {
        let doc = Document::load_mem(bytes).unwrap();
        doc.get_pages()
            .values()
            .map(|id| {
                let content = Content::decode(&doc.get_page_content(*id).unwrap()).unwrap();
                content
                    .operations
                    .iter()
                    .filter(|op| op.operator == "Tj")
                    .filter_map(|op| match op.operands.first() {
                        Some(Object::String(bytes, _)) => Some(bytes.clone()),
                        _ => None,
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_encodes_one_pdf_page_per_layout_page() {
        let bytes = encode(&two_page_document()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_text_is_written_as_win_ansi() {
        let bytes = encode(&two_page_document()).unwrap();
        let strings = page_strings(&bytes);
        assert_eq!(strings[0], vec![b"\x95 first".to_vec()]);
        assert_eq!(strings[1], vec![b"\x95 second".to_vec()]);
    }

    #[test]
    fn test_encoding_is_byte_for_byte_stable() {
        let doc = two_page_document();
        assert_eq!(encode(&doc).unwrap(), encode(&doc).unwrap());
    }

    #[test]
    fn test_win_ansi_maps_template_punctuation() {
        assert_eq!(win_ansi("a · b – c"), b"a \xb7 b \x96 c".to_vec());
        assert_eq!(win_ansi("café"), b"caf\xe9".to_vec());
        assert_eq!(win_ansi("漢字"), b"??".to_vec());
    }

    #[test]
    fn test_text_baseline_is_flipped_into_pdf_space() {
        let run = TextRun {
            x: 10.0,
            y: 100.0,
            text: "x".to_string(),
            size: 12.0,
            weight: FontWeight::Bold,
            color: Color::BLACK,
        };
        let ops = text_operations(&run, 841.89 - 100.0);
        let td = ops.iter().find(|op| op.operator == "Td").unwrap();
        match td.operands[1] {
            Object::Real(v) => assert!((v - 741.89).abs() < 1e-3),
            ref other => panic!("unexpected operand {other:?}"),
        }
        let tf = ops.iter().find(|op| op.operator == "Tf").unwrap();
        assert_eq!(tf.operands[0], Object::Name(b"F2".to_vec()));
    }

    #[test]
    fn test_shapes_produce_fill_and_stroke_operators() {
        let mut page = Page::default();
        page.push(DrawOp::Disc {
            cx: 50.0,
            cy: 50.0,
            radius: 3.0,
            color: Color::BLACK,
        });
        page.push(DrawOp::Line {
            x1: 0.0,
            y1: 0.0,
            x2: 0.0,
            y2: 10.0,
            width: 2.0,
            color: Color::BLACK,
        });
        let operators: Vec<String> = page_operations(&page, 100.0)
            .into_iter()
            .map(|op| op.operator)
            .collect();
        assert_eq!(operators.iter().filter(|o| *o == "c").count(), 4);
        assert!(operators.contains(&"S".to_string()));
        assert!(operators.contains(&"f".to_string()));
    }
}
