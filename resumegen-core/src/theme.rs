use serde::{Deserialize, Serialize};

/// Key under which the dark-mode flag is stored.
pub const DARK_MODE_KEY: &str = "darkMode";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_mode(dark: bool) -> Self {
        if dark { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Self {
        Self::from_dark_mode(!self.is_dark())
    }

    /// Canonical stored form: `"true"` for dark, `"false"` for light.
    pub fn to_stored(self) -> &'static str {
        if self.is_dark() { "true" } else { "false" }
    }

    /// Parse a stored value. Anything but a boolean literal is rejected.
    pub fn from_stored(raw: &str) -> Option<Self> {
        match raw.trim() {
            "true" => Some(Theme::Dark),
            "false" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}
