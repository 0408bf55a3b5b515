use crate::fields::{FIELD_COVER_LETTER, FIELD_NAME, deserialize_text_map};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// User-entered field values, keyed by field name.
///
/// Values are opaque text; absent fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormData {
    fields: BTreeMap<String, String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.fields.remove(field)
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'de> Deserialize<'de> for FormData {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Ok(Self {
            fields: deserialize_text_map(d)?,
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A generated resume as returned by the generation service.
///
/// Same shape as [`FormData`] plus an optional cover letter. Never edited locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResumeResult {
    fields: BTreeMap<String, String>,
}

impl ResumeResult {
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn name(&self) -> &str {
        self.field(FIELD_NAME)
    }

    /// The cover letter, if the service produced a non-blank one.
    pub fn cover_letter(&self) -> Option<&str> {
        self.fields
            .get(FIELD_COVER_LETTER)
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<'de> Deserialize<'de> for ResumeResult {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Ok(Self {
            fields: deserialize_text_map(d)?,
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResumeResult {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Extensions offered by the upload picker. Advisory only.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let content_type = content_type_for(&filename).to_string();
        Self {
            filename,
            content_type,
            bytes,
        }
    }

    pub fn extension(&self) -> Option<String> {
        self.filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }

    pub fn has_accepted_extension(&self) -> bool {
        self.extension()
            .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
    }
}

fn content_type_for(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        _ => "application/octet-stream",
    }
}
