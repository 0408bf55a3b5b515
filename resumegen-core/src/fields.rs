// Field names shared by the form, the generation payload and the generated resume.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

pub const FIELD_NAME: &str = "name";
pub const FIELD_PHONE: &str = "phone";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_LINKEDIN: &str = "linkedin";
pub const FIELD_WEBSITE: &str = "website";
pub const FIELD_SUMMARY: &str = "summary";
pub const FIELD_EXPERIENCE: &str = "experience";
pub const FIELD_SKILLS: &str = "skills";
pub const FIELD_EDUCATION: &str = "education";
pub const FIELD_CERTIFICATIONS: &str = "certifications";
pub const FIELD_PROJECTS: &str = "projects";
pub const FIELD_JOB_DESCRIPTION: &str = "job_description";

// Only ever produced by the generation service.
pub const FIELD_COVER_LETTER: &str = "cover_letter";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    /// Suggested input height; 1 means a single-line input.
    pub rows: u8,
}

impl FormField {
    pub fn is_multiline(&self) -> bool {
        self.rows > 1
    }
}

/// Input form fields in display order.
pub const FORM_FIELDS: [FormField; 12] = [
    FormField { name: FIELD_NAME, label: "Full Name", rows: 1 },
    FormField { name: FIELD_PHONE, label: "Phone", rows: 1 },
    FormField { name: FIELD_EMAIL, label: "Email", rows: 1 },
    FormField { name: FIELD_LINKEDIN, label: "LinkedIn", rows: 1 },
    FormField { name: FIELD_WEBSITE, label: "Portfolio/Website", rows: 1 },
    FormField { name: FIELD_SUMMARY, label: "Profile Summary", rows: 3 },
    FormField { name: FIELD_EXPERIENCE, label: "Work Experience", rows: 4 },
    FormField { name: FIELD_SKILLS, label: "Skills", rows: 2 },
    FormField { name: FIELD_EDUCATION, label: "Education", rows: 2 },
    FormField { name: FIELD_CERTIFICATIONS, label: "Certifications", rows: 2 },
    FormField { name: FIELD_PROJECTS, label: "Projects", rows: 2 },
    FormField { name: FIELD_JOB_DESCRIPTION, label: "Job Description", rows: 3 },
];

pub fn find_field(name: &str) -> Option<&'static FormField> {
    FORM_FIELDS.iter().find(|f| f.name == name)
}

/// Decode a JSON object into text fields.
///
/// Services are not strict about value types: strings are kept verbatim, `null` means
/// absent, scalars are stringified and nested values are dropped.
pub(crate) fn deserialize_text_map<'de, D>(d: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, Value> = BTreeMap::deserialize(d)?;
    Ok(raw
        .into_iter()
        .filter_map(|(k, v)| match v {
            Value::String(s) => Some((k, s)),
            Value::Bool(b) => Some((k, b.to_string())),
            Value::Number(n) => Some((k, n.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        })
        .collect())
}
