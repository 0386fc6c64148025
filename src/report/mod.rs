//! PDF report: title, then claim, analysis and sources, each under a bold
//! label. Output is a plain byte buffer; nothing touches the filesystem.
//!
//! The document carries no dates or random identifiers, so identical input
//! always produces identical bytes.

pub mod encoding;
pub mod layout;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, StringFormat, Stream};
use thiserror::Error;

use self::encoding::to_latin1;
use self::layout::{text_width, wrap_lines, Font};

pub const REPORT_FILENAME: &str = "fact_check_report.pdf";
pub const REPORT_MIME: &str = "application/pdf";

const MM: f32 = 72.0 / 25.4;
const PAGE_W: f32 = 595.28;
const PAGE_H: f32 = 841.89;
const MARGIN: f32 = 10.0 * MM;
const CELL_PAD: f32 = 1.0 * MM;
const PAGE_BREAK_Y: f32 = PAGE_H - 20.0 * MM;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("pdf encoding failed: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("pdf write failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Center,
}

/// Top-down writing position; y grows downwards from the top edge.
struct Cursor {
    done: Vec<Vec<Operation>>,
    page: Vec<Operation>,
    y: f32,
}

impl Cursor {
    fn new() -> Self {
        Self { done: Vec::new(), page: Vec::new(), y: MARGIN }
    }

    fn content_width() -> f32 {
        PAGE_W - 2.0 * MARGIN
    }

    fn ensure_room(&mut self, h: f32) {
        if self.y + h > PAGE_BREAK_Y {
            self.done.push(std::mem::take(&mut self.page));
            self.y = MARGIN;
        }
    }

    fn cell(&mut self, text: &[u8], font: Font, size: f32, h: f32, align: Align) {
        self.ensure_room(h);
        if !text.is_empty() {
            let x = match align {
                Align::Left => MARGIN + CELL_PAD,
                Align::Center => MARGIN + (Self::content_width() - text_width(font, text, size)) / 2.0,
            };
            let baseline = self.y + h / 2.0 + 0.3 * size;
            self.page.extend([
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![font.resource_name().into(), size.into()]),
                Operation::new("Td", vec![x.into(), (PAGE_H - baseline).into()]),
                Operation::new("Tj", vec![Object::String(text.to_vec(), StringFormat::Literal)]),
                Operation::new("ET", vec![]),
            ]);
        }
        self.y += h;
    }

    fn multi_cell(&mut self, text: &[u8], font: Font, size: f32, line_height: f32) {
        let max = Self::content_width() - 2.0 * CELL_PAD;
        for line in wrap_lines(text, font, size, max) {
            self.cell(&line, font, size, line_height, Align::Left);
        }
    }

    fn ln(&mut self, h: f32) {
        self.y += h;
    }

    fn section(&mut self, label: &[u8], body: &str, size: f32, line_height: f32) {
        self.cell(label, Font::Bold, 12.0, 10.0 * MM, Align::Left);
        self.multi_cell(&to_latin1(body), Font::Regular, size, line_height);
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        self.done.push(self.page);
        self.done
    }
}

/// Lays out and serialises the report. Every section goes through the
/// Latin-1 fallback first, so arbitrary text cannot break encoding.
pub fn create_report(claim: &str, analysis: &str, sources: &str) -> Result<Vec<u8>, ReportError> {
    let mut cur = Cursor::new();
    cur.cell(b"Fact Check Report", Font::Bold, 16.0, 10.0 * MM, Align::Center);
    cur.ln(10.0 * MM);

    cur.section(b"Claim Verified:", claim, 12.0, 10.0 * MM);
    cur.ln(5.0 * MM);

    cur.section(b"AI Analysis:", analysis, 11.0, 8.0 * MM);
    cur.ln(5.0 * MM);

    cur.section(b"Sources Found:", sources, 10.0, 8.0 * MM);

    render(cur.finish())
}

fn font_object(font: Font) -> Object {
    Object::Dictionary(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    })
}

fn render(pages: Vec<Vec<Operation>>) -> Result<Vec<u8>, ReportError> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font_object(Font::Regular));
    let bold_id = doc.add_object(font_object(Font::Bold));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            Font::Regular.resource_name() => regular_id,
            Font::Bold.resource_name() => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
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
        "MediaBox" => vec![0.into(), 0.into(), Object::Real(PAGE_W), Object::Real(PAGE_H)],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal("Fact Check Report"),
        "Producer" => Object::string_literal("factcheck-rs"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    Ok(out)
}
