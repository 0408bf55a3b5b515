use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const STAGE_UPLOADING: &str = "uploading";
pub const STAGE_GENERATING: &str = "generating";
pub const STAGE_RENDERING: &str = "rendering";
pub const STAGE_DONE: &str = "done";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadOutcome {
    /// No file was chosen; nothing was sent and the form is untouched.
    Skipped,
    /// The form now holds exactly the parsed fields.
    Applied { fields: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfExport {
    /// Suggested name for the saved file.
    pub filename: String,
    pub bytes: Vec<u8>,
    /// The form changed after the exported result was generated.
    pub stale: bool,
    /// Characters missing from the PDF because its fonts cannot draw them.
    pub unsupported: Vec<char>,
}

pub fn ms(d: Duration) -> u64 {
    d.as_millis().try_into().unwrap_or(u64::MAX)
}
