//! Printable resume template.
//!
//! The template is a flat list of elements in reading order; drawing them onto pages is the
//! renderer's job. Keeping layout decisions here (order, contact line, wrapping, style
//! constants) lets them be tested without producing a PDF.

use crate::fields::{
    FIELD_CERTIFICATIONS, FIELD_EDUCATION, FIELD_EMAIL, FIELD_EXPERIENCE, FIELD_LINKEDIN,
    FIELD_PHONE, FIELD_PROJECTS, FIELD_SKILLS, FIELD_SUMMARY, FIELD_WEBSITE,
};
use crate::types::ResumeResult;

pub const CONTACT_SEPARATOR: &str = " | ";

/// Sections of the printed resume, in print order.
pub const DOCUMENT_SECTIONS: [(&str, &str); 6] = [
    (FIELD_SUMMARY, "Summary"),
    (FIELD_EXPERIENCE, "Experience"),
    (FIELD_SKILLS, "Skills"),
    (FIELD_PROJECTS, "Projects"),
    (FIELD_CERTIFICATIONS, "Certifications"),
    (FIELD_EDUCATION, "Education"),
];

const CONTACT_FIELDS: [&str; 4] = [FIELD_PHONE, FIELD_EMAIL, FIELD_LINKEDIN, FIELD_WEBSITE];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentElement {
    /// Centered bold name.
    Title(String),
    /// Centered contact line.
    Contact(String),
    SectionLabel(&'static str),
    Divider,
    Body(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeDocument {
    /// Document metadata title.
    pub title: String,
    pub elements: Vec<DocumentElement>,
}

impl ResumeDocument {
    pub fn from_resume(resume: &ResumeResult) -> Self {
        let name = resume.name().to_string();
        let title = if name.trim().is_empty() {
            "Resume".to_string()
        } else {
            name.clone()
        };

        let mut elements = Vec::with_capacity(2 + DOCUMENT_SECTIONS.len() * 3);
        elements.push(DocumentElement::Title(name));
        elements.push(DocumentElement::Contact(contact_line(resume)));

        for (field, label) in DOCUMENT_SECTIONS {
            elements.push(DocumentElement::SectionLabel(label));
            elements.push(DocumentElement::Divider);
            elements.push(DocumentElement::Body(resume.field(field).to_string()));
        }

        Self { title, elements }
    }

    /// Body text of a section, if the section exists.
    pub fn section_body(&self, label: &str) -> Option<&str> {
        let idx = self
            .elements
            .iter()
            .position(|e| matches!(e, DocumentElement::SectionLabel(l) if *l == label))?;
        self.elements[idx..].iter().find_map(|e| match e {
            DocumentElement::Body(text) => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Phone, email, LinkedIn and website joined by [`CONTACT_SEPARATOR`]; empty entries are skipped.
pub fn contact_line(resume: &ResumeResult) -> String {
    CONTACT_FIELDS
        .iter()
        .map(|f| resume.field(f).trim())
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(CONTACT_SEPARATOR)
}

/// Page geometry and type sizes, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentStyle {
    pub page_width: f32,
    pub page_height: f32,
    pub padding: f32,
    pub body_size: f32,
    pub title_size: f32,
    pub title_gap: f32,
    pub contact_size: f32,
    pub contact_gap: f32,
    pub label_size: f32,
    pub label_gap: f32,
    pub divider_thickness: f32,
    pub divider_margin: f32,
    pub section_gap: f32,
    pub line_height: f32,
}

impl Default for DocumentStyle {
    fn default() -> Self {
        // A4
        Self {
            page_width: 595.28,
            page_height: 841.89,
            padding: 40.0,
            body_size: 11.0,
            title_size: 20.0,
            title_gap: 10.0,
            contact_size: 11.0,
            contact_gap: 20.0,
            label_size: 12.0,
            label_gap: 3.0,
            divider_thickness: 1.0,
            divider_margin: 5.0,
            section_gap: 10.0,
            line_height: 1.2,
        }
    }
}

impl DocumentStyle {
    pub fn usable_width(&self) -> f32 {
        self.page_width - 2.0 * self.padding
    }

    /// Width of `text` set at `font_size`, never less than the Times face draws it.
    pub fn estimate_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().map(glyph_em).sum::<f32>() * font_size
    }

    /// Wrap `text` so no line is wider than the usable width at `font_size`.
    pub fn wrap(&self, text: &str, font_size: f32) -> Vec<String> {
        wrap_by(text, self.usable_width(), |c| glyph_em(c) * font_size)
    }

    /// Left edge that centers `text` on the page, clamped to the padding.
    pub fn centered_x(&self, text: &str, font_size: f32) -> f32 {
        let width = self.estimate_width(text, font_size);
        ((self.page_width - width) / 2.0).max(self.padding)
    }
}

/// Advance of `c` in em, rounded up over Times-Roman and Times-Bold.
pub fn glyph_em(c: char) -> f32 {
    match c {
        ' ' => 0.25,
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' => 0.34,
        'f' | 'r' | 't' | 'I' | 'J' | '-' | '(' | ')' | '[' | ']' | '/' | '`' => 0.45,
        'm' | 'w' => 0.84,
        'M' | 'W' | '@' | '%' => 1.0,
        c if c.is_ascii_digit() => 0.5,
        c if c.is_lowercase() => 0.56,
        c if c.is_uppercase() => 0.78,
        _ => 0.6,
    }
}

/// Word-wrap `text` to at most `max_chars` characters per line.
///
/// Explicit line breaks are kept (blank lines stay blank). Words longer than a line are split.
/// Empty input yields no lines.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    wrap_by(text, max_chars.max(1) as f32, |_| 1.0)
}

/// Word-wrap `text` so the summed `advance` of each line stays within `max_width`.
///
/// Same rules as [`wrap_text`]. A single glyph wider than the line still gets a line of its own.
pub fn wrap_by<F>(text: &str, max_width: f32, advance: F) -> Vec<String>
where
    F: Fn(char) -> f32,
{
    let space = advance(' ');
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut width = 0.0f32;

        for word in paragraph.split_whitespace() {
            for (piece, piece_width) in split_word(word, max_width, &advance) {
                if !current.is_empty() && width + space + piece_width > max_width {
                    lines.push(std::mem::take(&mut current));
                    width = 0.0;
                }
                if !current.is_empty() {
                    current.push(' ');
                    width += space;
                }
                current.push_str(&piece);
                width += piece_width;
            }
        }

        lines.push(current);
    }

    lines
}

// Chunks of `word` that each fit on a line, with their widths.
fn split_word<F>(word: &str, max_width: f32, advance: &F) -> Vec<(String, f32)>
where
    F: Fn(char) -> f32,
{
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0f32;

    for c in word.chars() {
        let w = advance(c);
        if !piece.is_empty() && width + w > max_width {
            pieces.push((std::mem::take(&mut piece), width));
            width = 0.0;
        }
        piece.push(c);
        width += w;
    }
    if !piece.is_empty() {
        pieces.push((piece, width));
    }

    pieces
}
