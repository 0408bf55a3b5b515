use anyhow::Context;
use resumegen_core::theme::{DARK_MODE_KEY, Theme};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Small durable string-to-string store backed by one JSON object file.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_all(&self) -> anyhow::Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("read preferences: {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parse preferences: {}", self.path.display()))
    }

    pub fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.load_all()?.remove(key))
    }

    /// Read-modify-write of a single key; other keys are preserved.
    pub fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        // A corrupt file is replaced rather than blocking every future write.
        let mut all = self.load_all().unwrap_or_else(|e| {
            log::warn!("discarding unreadable preferences: {e:#}");
            BTreeMap::new()
        });
        all.insert(key.to_string(), value.to_string());

        let json = serde_json::to_vec_pretty(&all).context("encode preferences JSON")?;
        crate::fs::write_atomic(&self.path, &json)
            .with_context(|| format!("write preferences: {}", self.path.display()))
    }
}

/// Dark/light flag persisted under [`DARK_MODE_KEY`].
///
/// Never fails: storage problems are logged and the preference is simply not kept.
#[derive(Debug, Clone)]
pub struct ThemePreferenceStore {
    store: PreferenceStore,
}

impl ThemePreferenceStore {
    pub fn new(store: PreferenceStore) -> Self {
        Self { store }
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self::new(PreferenceStore::at_path(path))
    }

    pub fn load(&self) -> Theme {
        match self.store.get(DARK_MODE_KEY) {
            Ok(Some(raw)) => Theme::from_stored(&raw).unwrap_or_else(|| {
                log::debug!("ignoring unparseable {DARK_MODE_KEY} value {raw:?}");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                log::warn!("theme preference unavailable: {e:#}");
                Theme::default()
            }
        }
    }

    pub fn save(&self, theme: Theme) {
        if let Err(e) = self.store.set(DARK_MODE_KEY, theme.to_stored()) {
            log::warn!("failed to persist theme preference: {e:#}");
        }
    }
}
