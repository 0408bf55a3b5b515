use anyhow::Context;
use resumegen_core::config::AppConfig;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> anyhow::Result<AppConfig> {
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("read config: {}", self.path.display()))?;
        let cfg: AppConfig = serde_json::from_slice(&bytes)
            .with_context(|| format!("decode config JSON: {}", self.path.display()))?;
        Ok(cfg)
    }

    /// Defaults when no config file exists yet; a corrupt file is still an error.
    pub fn load_or_default(&self) -> anyhow::Result<AppConfig> {
        if !self.path.exists() {
            log::debug!("no config at {}; using defaults", self.path.display());
            return Ok(AppConfig::default());
        }
        self.load()
    }

    pub fn save(&self, cfg: &AppConfig) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(cfg).context("encode config JSON")?;
        crate::fs::write_atomic(&self.path, &json)
            .with_context(|| format!("write config: {}", self.path.display()))?;
        Ok(())
    }
}
