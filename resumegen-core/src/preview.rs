use crate::fields::{
    FIELD_CERTIFICATIONS, FIELD_EDUCATION, FIELD_EXPERIENCE, FIELD_NAME, FIELD_PROJECTS,
    FIELD_SKILLS, FIELD_SUMMARY,
};
use crate::types::ResumeResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Heading,
    Labeled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewBlock {
    pub kind: BlockKind,
    pub label: &'static str,
    pub text: String,
}

const LABELED_FIELDS: [(&str, &str); 6] = [
    (FIELD_SUMMARY, "Summary"),
    (FIELD_EXPERIENCE, "Experience"),
    (FIELD_SKILLS, "Skills"),
    (FIELD_EDUCATION, "Education"),
    (FIELD_PROJECTS, "Projects"),
    (FIELD_CERTIFICATIONS, "Certifications"),
];

/// Read-only view of a generated resume, in display order.
///
/// Missing fields render as empty blocks; the cover letter block only appears when present.
pub fn render_preview(resume: &ResumeResult) -> Vec<PreviewBlock> {
    let mut blocks = Vec::with_capacity(LABELED_FIELDS.len() + 2);

    blocks.push(PreviewBlock {
        kind: BlockKind::Heading,
        label: "Name",
        text: resume.field(FIELD_NAME).to_string(),
    });

    for (field, label) in LABELED_FIELDS {
        blocks.push(PreviewBlock {
            kind: BlockKind::Labeled,
            label,
            text: resume.field(field).to_string(),
        });
    }

    if let Some(letter) = resume.cover_letter() {
        blocks.push(PreviewBlock {
            kind: BlockKind::Labeled,
            label: "Cover Letter",
            text: letter.to_string(),
        });
    }

    blocks
}

/// Plain-text rendering used by terminal front ends.
pub fn format_preview(blocks: &[PreviewBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block.kind {
            BlockKind::Heading => {
                out.push_str(&block.text);
                out.push('\n');
                out.push_str(&"=".repeat(block.text.chars().count().max(1)));
                out.push('\n');
            }
            BlockKind::Labeled => {
                out.push('\n');
                out.push_str(block.label);
                out.push_str(":\n");
                out.push_str(&block.text);
                out.push('\n');
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResumeResult {
        [
            ("name", "A. Lee"),
            ("summary", "Engineer"),
            ("experience", "5 yrs"),
            ("skills", "Go"),
            ("education", "BS CS"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn renders_fixed_order_without_cover_letter() {
        let blocks = render_preview(&sample());
        let labels: Vec<&str> = blocks.iter().map(|b| b.label).collect();
        assert_eq!(
            labels,
            [
                "Name",
                "Summary",
                "Experience",
                "Skills",
                "Education",
                "Projects",
                "Certifications"
            ]
        );
        assert_eq!(blocks[0].kind, BlockKind::Heading);
        assert_eq!(blocks[0].text, "A. Lee");
        // Missing fields render as empty, not omitted.
        assert_eq!(blocks[5].text, "");
    }

    #[test]
    fn includes_cover_letter_verbatim_when_present() {
        let mut fields: Vec<(String, String)> = sample()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        fields.push(("cover_letter".into(), "Dear team,\n\nI am applying.".into()));
        let resume: ResumeResult = fields.into_iter().collect();

        let blocks = render_preview(&resume);
        let last = blocks.last().unwrap();
        assert_eq!(last.label, "Cover Letter");
        assert_eq!(last.text, "Dear team,\n\nI am applying.");
    }

    #[test]
    fn omits_empty_cover_letter() {
        let resume: ResumeResult = [("name", "A"), ("cover_letter", "")].into_iter().collect();
        assert!(render_preview(&resume).iter().all(|b| b.label != "Cover Letter"));
    }

    #[test]
    fn formats_heading_and_sections() {
        let text = format_preview(&render_preview(&sample()));
        assert!(text.starts_with("A. Lee\n======\n"));
        assert!(text.contains("\nSkills:\nGo\n"));
        assert!(text.find("Summary:").unwrap() < text.find("Certifications:").unwrap());
    }
}
