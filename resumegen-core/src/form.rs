use crate::types::FormData;

/// Current values of the resume form.
///
/// Two mutations exist: [`FormState::set`] for a single field (user edits) and
/// [`FormState::replace_all`] for a whole mapping (after a resume is parsed).
#[derive(Debug, Clone, Default)]
pub struct FormState {
    data: FormData,
    revision: u64,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> &str {
        self.data.get(field)
    }

    /// Replace exactly one field; all others are left untouched.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.data.set(field, value);
        self.revision += 1;
    }

    /// Discard the whole mapping and take `data` as the new content.
    pub fn replace_all(&mut self, data: FormData) {
        self.data = data;
        self.revision += 1;
    }

    pub fn snapshot(&self) -> &FormData {
        &self.data
    }

    /// Bumped by every mutation, starting at 0 for a fresh form.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
