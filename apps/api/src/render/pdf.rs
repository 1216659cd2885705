//! Paginated PDF rendering.
//!
//! # Architecture
//! - `layout_resume` is the pure layout pass. It decides wrapping and page
//!   breaks and produces a `DocumentLayout` of positioned lines.
//! - `encode_pdf` turns a layout into PDF 1.5 bytes with `lopdf`, using the
//!   standard Helvetica fonts (nothing embedded).
//!
//! Coordinates in the layout are measured from the top of the page, the
//! encoder flips them into PDF user space.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::debug;

use crate::models::Resume;
use crate::render::metrics::{wrap_text, PdfFont};
use crate::render::RenderError;

// ────────────────────────────────────────────────────────────────────────────
// Page geometry (points, A4)
// ────────────────────────────────────────────────────────────────────────────

pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;
pub const MARGIN_X: f32 = 40.0;
/// Usable text width: page width minus both margins, rounded down.
pub const TEXT_WIDTH: f32 = 515.0;
/// Baseline of the first line on every page.
pub const TOP_Y: f32 = 60.0;
/// A line whose baseline would fall below this starts a new page.
pub const PAGE_BREAK_Y: f32 = 780.0;
/// Extra indent applied to experience descriptions.
pub const DESCRIPTION_INDENT: f32 = 12.0;

const TITLE_SIZE: f32 = 18.0;
const BODY_SIZE: f32 = 11.0;
const TITLE_ADVANCE: f32 = 24.0;
const CONTACT_ADVANCE: f32 = 16.0;
const LINE_ADVANCE: f32 = 14.0;
const SECTION_GAP: f32 = 12.0;
const SUMMARY_GAP: f32 = 8.0;
const ENTRY_GAP: f32 = 8.0;
const CONTACT_SEPARATOR: &str = "  \u{2022}  ";

// ────────────────────────────────────────────────────────────────────────────
// Layout types
// ────────────────────────────────────────────────────────────────────────────

/// A single line of text at a fixed position on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    /// Baseline, in points from the top edge.
    pub y: f32,
    pub font: PdfFont,
    pub size: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub lines: Vec<PlacedLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub title: String,
    pub pages: Vec<PageLayout>,
}

/// Write head for the layout pass. Every line goes through `emit`, which is
/// the only place page breaks are decided.
struct Cursor {
    finished: Vec<PageLayout>,
    current: PageLayout,
    y: f32,
    font: PdfFont,
    size: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            finished: Vec::new(),
            current: PageLayout::default(),
            y: TOP_Y,
            font: PdfFont::Helvetica,
            size: BODY_SIZE,
        }
    }

    fn set_font(&mut self, font: PdfFont, size: f32) {
        self.font = font;
        self.size = size;
    }

    fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    fn emit(&mut self, text: String, x: f32) {
        if self.y > PAGE_BREAK_Y {
            self.finished.push(std::mem::take(&mut self.current));
            self.y = TOP_Y;
        }
        self.current.lines.push(PlacedLine {
            text,
            x,
            y: self.y,
            font: self.font,
            size: self.size,
        });
    }

    /// Wraps `text` to `width` and emits each line, advancing by `line_advance`.
    fn emit_wrapped(&mut self, text: &str, x: f32, width: f32, line_advance: f32) {
        for line in wrap_text(text, self.font, self.size, width) {
            self.emit(line, x);
            self.advance(line_advance);
        }
    }

    fn heading(&mut self, gap: f32, label: &str) {
        self.advance(gap);
        self.set_font(PdfFont::HelveticaBold, BODY_SIZE);
        self.emit(label.to_string(), MARGIN_X);
        self.advance(LINE_ADVANCE);
        self.set_font(PdfFont::Helvetica, BODY_SIZE);
    }

    fn finish(mut self) -> Vec<PageLayout> {
        self.finished.push(self.current);
        self.finished
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout pass
// ────────────────────────────────────────────────────────────────────────────

/// Lays out a resume onto A4 pages. Pure and deterministic.
///
/// Sections without data are skipped together with their headings.
pub fn layout_resume(resume: &Resume) -> DocumentLayout {
    let mut cursor = Cursor::new();
    let title = resume.display_title().to_string();

    cursor.set_font(PdfFont::HelveticaBold, TITLE_SIZE);
    cursor.emit_wrapped(&title, MARGIN_X, TEXT_WIDTH, TITLE_ADVANCE);

    cursor.set_font(PdfFont::Helvetica, BODY_SIZE);
    let pi = &resume.personal_info;
    if !pi.name.is_empty() {
        cursor.emit_wrapped(&pi.name, MARGIN_X, TEXT_WIDTH, CONTACT_ADVANCE);
    }
    let contact = [&pi.email, &pi.phone, &pi.location]
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(CONTACT_SEPARATOR);
    if !contact.is_empty() {
        cursor.emit_wrapped(&contact, MARGIN_X, TEXT_WIDTH, CONTACT_ADVANCE);
    }

    if !pi.summary.is_empty() {
        cursor.heading(SUMMARY_GAP, "Summary");
        cursor.emit_wrapped(&pi.summary, MARGIN_X, TEXT_WIDTH, LINE_ADVANCE);
    }

    if !resume.experience.is_empty() {
        cursor.heading(SECTION_GAP, "Experience");
        for exp in &resume.experience {
            let title = join_parts(&exp.position, " @ ", &exp.company, &exp.duration);
            cursor.emit_wrapped(&title, MARGIN_X, TEXT_WIDTH, LINE_ADVANCE);
            if !exp.description.is_empty() {
                cursor.emit_wrapped(
                    &exp.description,
                    MARGIN_X + DESCRIPTION_INDENT,
                    TEXT_WIDTH - DESCRIPTION_INDENT,
                    LINE_ADVANCE,
                );
            }
            cursor.advance(ENTRY_GAP);
        }
    }

    if !resume.education.is_empty() {
        cursor.heading(SECTION_GAP, "Education");
        for ed in &resume.education {
            let line = join_parts(&ed.degree, " - ", &ed.school, &ed.year);
            cursor.emit_wrapped(&line, MARGIN_X, TEXT_WIDTH, LINE_ADVANCE);
        }
    }

    if !resume.skills.is_empty() {
        cursor.heading(SECTION_GAP, "Skills");
        cursor.emit_wrapped(&resume.skills.join(", "), MARGIN_X, TEXT_WIDTH, LINE_ADVANCE);
    }

    DocumentLayout {
        title,
        pages: cursor.finish(),
    }
}

/// `lead[<sep>middle][ (tail)]`, trimmed; empty parts drop their punctuation.
fn join_parts(lead: &str, sep: &str, middle: &str, tail: &str) -> String {
    let mut out = lead.to_string();
    if !middle.is_empty() {
        out.push_str(sep);
        out.push_str(middle);
    }
    if !tail.is_empty() {
        out.push_str(" (");
        out.push_str(tail);
        out.push(')');
    }
    out.trim().to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Encoding
// ────────────────────────────────────────────────────────────────────────────

/// Renders a resume to PDF bytes.
pub fn render_pdf(resume: &Resume) -> Result<Vec<u8>, RenderError> {
    let layout = layout_resume(resume);
    debug!(pages = layout.pages.len(), "PDF layout complete");
    encode_pdf(&layout)
}

/// Serializes a layout as a PDF document.
///
/// No creation/modification dates are written, so equal layouts give
/// byte-identical output.
pub fn encode_pdf(layout: &DocumentLayout) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for font in [PdfFont::Helvetica, PdfFont::HelveticaBold] {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! { "Font" => fonts });

    let mut kids: Vec<Object> = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let page_id = encode_page(&mut doc, pages_id, page)?;
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(text_string(&layout.title), StringFormat::Literal),
        "Producer" => Object::string_literal(concat!("resume-api ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

fn encode_page(
    doc: &mut Document,
    pages_id: ObjectId,
    page: &PageLayout,
) -> Result<ObjectId, RenderError> {
    let mut operations = Vec::with_capacity(page.lines.len() * 5);
    for line in &page.lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![line.font.resource_name().into(), line.size.into()],
        ));
        operations.push(Operation::new(
            "Td",
            vec![line.x.into(), (PAGE_HEIGHT - line.y).into()],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(&line.text), StringFormat::Literal)],
        ));
        operations.push(Operation::new("ET", vec![]));
    }

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    }))
}

/// Encodes text for the WinAnsiEncoding used by the standard fonts.
/// Characters outside the code page become `?`.
fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\t' => b' ',
            ' '..='~' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8A,
            '‹' => 0x8B,
            'Œ' => 0x8C,
            'Ž' => 0x8E,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9A,
            '›' => 0x9B,
            'œ' => 0x9C,
            'ž' => 0x9E,
            'Ÿ' => 0x9F,
            _ => b'?',
        })
        .collect()
}

/// PDF text string: plain bytes for ASCII, UTF-16BE with BOM otherwise.
fn text_string(text: &str) -> Vec<u8> {
    if text.is_ascii() {
        return text.as_bytes().to_vec();
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    bytes
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
