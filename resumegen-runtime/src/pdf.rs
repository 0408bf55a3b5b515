//! PDF rendering with `printpdf`.
//!
//! Layout happens in points with a top-left origin and is kept separate from the
//! drawing pass, so pagination can be checked without parsing PDF output.

use anyhow::Context;
use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, Point};
use resumegen_core::document::{DocumentElement, DocumentStyle, ResumeDocument};
use resumegen_engine::traits::PdfRenderer;

const LAYER_NAME: &str = "Layer 1";

#[derive(Debug, Clone, PartialEq)]
pub enum Placed {
    Text {
        text: String,
        x: f32,
        /// Distance from the top of the page to the text baseline.
        baseline: f32,
        size: f32,
        bold: bool,
    },
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        thickness: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub items: Vec<Placed>,
}

struct Cursor<'a> {
    style: &'a DocumentStyle,
    pages: Vec<PageLayout>,
    y: f32,
}

impl<'a> Cursor<'a> {
    fn new(style: &'a DocumentStyle) -> Self {
        Self {
            style,
            pages: vec![PageLayout::default()],
            y: style.padding,
        }
    }

    fn bottom(&self) -> f32 {
        self.style.page_height - self.style.padding
    }

    // Start a new page unless `height` still fits on this one.
    fn reserve(&mut self, height: f32) {
        if self.y + height > self.bottom() && self.y > self.style.padding {
            self.pages.push(PageLayout::default());
            self.y = self.style.padding;
        }
    }

    fn push(&mut self, item: Placed) {
        if let Some(page) = self.pages.last_mut() {
            page.items.push(item);
        }
    }

    fn text_line(&mut self, text: String, size: f32, bold: bool, centered: bool) {
        let height = size * self.style.line_height;
        self.reserve(height);
        let x = if centered {
            self.style.centered_x(&text, size)
        } else {
            self.style.padding
        };
        if !text.is_empty() {
            self.push(Placed::Text {
                text,
                x,
                baseline: self.y + size,
                size,
                bold,
            });
        }
        self.y += height;
    }

    // A paragraph always takes at least one line, even when empty.
    fn paragraph(&mut self, text: &str, size: f32, bold: bool, centered: bool) {
        let lines = self.style.wrap(text, size);
        if lines.is_empty() {
            self.text_line(String::new(), size, bold, centered);
        }
        for line in lines {
            self.text_line(line, size, bold, centered);
        }
    }

    fn divider(&mut self) {
        let s = self.style;
        self.reserve(s.divider_margin * 2.0 + s.divider_thickness);
        self.y += s.divider_margin;
        self.push(Placed::Rule {
            x1: s.padding,
            x2: s.page_width - s.padding,
            y: self.y + s.divider_thickness / 2.0,
            thickness: s.divider_thickness,
        });
        self.y += s.divider_thickness + s.divider_margin;
    }
}

/// Position every element of `doc` on as many pages as it needs.
pub fn layout_document(doc: &ResumeDocument, style: &DocumentStyle) -> Vec<PageLayout> {
    let mut cur = Cursor::new(style);
    let mut in_section = false;

    for element in &doc.elements {
        match element {
            DocumentElement::Title(name) => {
                cur.paragraph(name, style.title_size, true, true);
                cur.y += style.title_gap;
            }
            DocumentElement::Contact(line) => {
                cur.paragraph(line, style.contact_size, false, true);
                cur.y += style.contact_gap;
            }
            DocumentElement::SectionLabel(label) => {
                if in_section {
                    cur.y += style.section_gap;
                }
                in_section = true;
                cur.paragraph(label, style.label_size, true, false);
                cur.y += style.label_gap;
            }
            DocumentElement::Divider => cur.divider(),
            DocumentElement::Body(text) => cur.paragraph(text, style.body_size, false, false),
        }
    }

    cur.pages
}

/// Whether the builtin Times fonts can draw `c`.
///
/// Builtin fonts are written with WinAnsiEncoding; anything outside it never reaches
/// the page. U+00A0 and U+00AD share codes with space and hyphen, so they are lost too.
pub fn is_drawable(c: char) -> bool {
    const WIN_ANSI_EXTRAS: &[char] = &[
        '\u{20AC}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
        '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{017D}', '\u{2018}',
        '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}', '\u{02DC}',
        '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{017E}', '\u{0178}',
    ];
    match c {
        ' '..='~' => true,
        '\u{A1}'..='\u{FF}' => c != '\u{AD}',
        _ => WIN_ANSI_EXTRAS.contains(&c),
    }
}

/// Printable characters of `doc` that the builtin fonts cannot draw, in first-seen order.
pub fn undrawable_chars(doc: &ResumeDocument) -> Vec<char> {
    let mut seen = Vec::new();
    let texts = std::iter::once(doc.title.as_str()).chain(doc.elements.iter().filter_map(|e| {
        match e {
            DocumentElement::Title(t) | DocumentElement::Contact(t) | DocumentElement::Body(t) => {
                Some(t.as_str())
            }
            DocumentElement::SectionLabel(l) => Some(*l),
            DocumentElement::Divider => None,
        }
    }));
    for c in texts.flat_map(str::chars) {
        // Whitespace controls are consumed by wrapping; other controls never print.
        if c.is_control() || is_drawable(c) || seen.contains(&c) {
            continue;
        }
        seen.push(c);
    }
    seen
}

fn mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

#[derive(Debug, Clone, Default)]
pub struct PrintPdfRenderer {
    style: DocumentStyle,
}

impl PrintPdfRenderer {
    pub fn new(style: DocumentStyle) -> Self {
        Self { style }
    }

    fn draw_page(
        &self,
        doc: &PdfDocumentReference,
        page: printpdf::PdfPageIndex,
        layer: printpdf::PdfLayerIndex,
        layout: &PageLayout,
        fonts: &(IndirectFontRef, IndirectFontRef),
    ) {
        let (regular, bold) = fonts;
        let layer = doc.get_page(page).get_layer(layer);
        let height = self.style.page_height;

        for item in &layout.items {
            match item {
                Placed::Text {
                    text,
                    x,
                    baseline,
                    size,
                    bold: is_bold,
                } => {
                    let font = if *is_bold { bold } else { regular };
                    layer.use_text(text.as_str(), *size, mm(*x), mm(height - baseline), font);
                }
                Placed::Rule {
                    x1,
                    x2,
                    y,
                    thickness,
                } => {
                    layer.set_outline_thickness(*thickness);
                    layer.add_line(Line {
                        points: vec![
                            (Point::new(mm(*x1), mm(height - y)), false),
                            (Point::new(mm(*x2), mm(height - y)), false),
                        ],
                        is_closed: false,
                    });
                }
            }
        }
    }
}

impl PdfRenderer for PrintPdfRenderer {
    fn render(&self, resume: &ResumeDocument) -> anyhow::Result<Vec<u8>> {
        let pages = layout_document(resume, &self.style);
        let width = mm(self.style.page_width);
        let height = mm(self.style.page_height);

        let (doc, first_page, first_layer) =
            PdfDocument::new(resume.title.as_str(), width, height, LAYER_NAME);
        let regular = doc
            .add_builtin_font(BuiltinFont::TimesRoman)
            .context("load Times-Roman")?;
        let bold = doc
            .add_builtin_font(BuiltinFont::TimesBold)
            .context("load Times-Bold")?;
        let fonts = (regular, bold);

        for (i, layout) in pages.iter().enumerate() {
            let (page, layer) = if i == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(width, height, LAYER_NAME)
            };
            self.draw_page(&doc, page, layer, layout, &fonts);
        }

        log::debug!("laid out {:?} on {} page(s)", resume.title, pages.len());
        doc.save_to_bytes().context("serialize PDF")
    }

    fn unsupported_chars(&self, resume: &ResumeDocument) -> Vec<char> {
        undrawable_chars(resume)
    }
}
