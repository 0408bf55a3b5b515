use std::future::Future;
use std::path::{Path, PathBuf};

use anyhow::Context;
use resumegen_core::config::AppConfig;
use resumegen_core::preview::format_preview;
use resumegen_core::theme::Theme;
use resumegen_core::types::{FormData, ResumeFile, ResumeResult};
use resumegen_engine::engine::ResumeEngine;
use resumegen_engine::session::UploadOutcome;
use resumegen_runtime::config_store::ConfigStore;
use resumegen_runtime::defaults::{config_path, preferences_path};
use resumegen_runtime::preferences::ThemePreferenceStore;
use resumegen_runtime::runtime_engine::build_engine_from_config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub bytes: usize,
    /// The form was edited after this resume was generated.
    pub stale: bool,
    /// Characters left out of the PDF because its fonts cannot draw them.
    pub unsupported: Vec<char>,
}

/// Everything a front end needs for one session: the engine, its config and the
/// persisted theme. The form itself is never persisted.
pub struct AppService {
    config_store: ConfigStore,
    theme_store: ThemePreferenceStore,
    config: AppConfig,
    theme: Theme,
    engine: ResumeEngine,
}

impl AppService {
    /// Load config and theme from `config_dir` and mount an empty session.
    ///
    /// `base_url` overrides the stored service URL for this session only.
    pub fn open(config_dir: &Path, base_url: Option<String>) -> anyhow::Result<Self> {
        let config_store = ConfigStore::at_path(config_path(config_dir));
        let mut config = config_store.load_or_default()?;
        if let Some(url) = base_url {
            config.base_url = url;
        }

        let theme_store = ThemePreferenceStore::at_path(preferences_path(config_dir));
        let theme = theme_store.load();
        let engine = build_engine_from_config(&config)?;

        Ok(Self {
            config_store,
            theme_store,
            config,
            theme,
            engine,
        })
    }

    /// Effective config, including any session override.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        self.config_store.path()
    }

    /// Persist a new service URL. Applies from the next session on.
    pub fn save_base_url(&self, url: &str) -> anyhow::Result<AppConfig> {
        let mut stored = self.config_store.load_or_default()?;
        stored.base_url = url.trim().to_string();
        self.config_store.save(&stored)?;
        log::info!("stored base URL {}", stored.base_url);
        Ok(stored)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Apply and persist `theme`. Persistence problems are logged, never returned.
    pub fn set_theme(&mut self, theme: Theme) -> Theme {
        self.theme = theme;
        self.theme_store.save(theme);
        theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.theme.toggled())
    }

    pub fn engine(&self) -> &ResumeEngine {
        &self.engine
    }

    pub fn form(&self) -> &FormData {
        self.engine.form().snapshot()
    }

    pub fn set_field(&mut self, field: &str, value: &str) {
        self.engine.set_field(field, value);
    }

    /// Replace the whole form with the JSON object stored at `path`.
    pub fn load_form(&mut self, path: &Path) -> anyhow::Result<usize> {
        let raw = std::fs::read(path)
            .with_context(|| format!("read form file: {}", path.display()))?;
        let data: FormData = serde_json::from_slice(&raw)
            .with_context(|| format!("parse form file: {}", path.display()))?;
        let fields = data.len();
        self.engine.replace_form(data);
        Ok(fields)
    }

    /// Upload the resume at `path`; `None` is a no-op with no request made.
    pub async fn upload_resume<F, Fut>(
        &mut self,
        path: Option<&Path>,
        on_stage: F,
    ) -> anyhow::Result<UploadOutcome>
    where
        F: Fn(&'static str) -> Fut,
        Fut: Future<Output = ()>,
    {
        let file = path.map(read_resume_file).transpose()?;
        Ok(self.engine.upload_resume_with_hook(file, on_stage).await?)
    }

    pub async fn generate<F, Fut>(&mut self, on_stage: F) -> anyhow::Result<&ResumeResult>
    where
        F: Fn(&'static str) -> Fut,
        Fut: Future<Output = ()>,
    {
        Ok(self.engine.generate_with_hook(on_stage).await?)
    }

    /// Plain-text preview of the displayed resume, if any.
    pub fn preview_text(&self) -> Option<String> {
        self.engine.preview().map(|blocks| format_preview(&blocks))
    }

    /// Render the displayed resume and save it.
    ///
    /// `dest` may be a directory (the configured file name is used inside it) or a
    /// file path; `None` means the current directory. A path ending in a separator
    /// names a directory and is created if missing.
    pub async fn export_pdf<F, Fut>(
        &self,
        dest: Option<&Path>,
        on_stage: F,
    ) -> anyhow::Result<ExportReport>
    where
        F: Fn(&'static str) -> Fut,
        Fut: Future<Output = ()>,
    {
        let export = self.engine.export_pdf_with_hook(on_stage).await?;
        let path = export_target(dest, &export.filename);

        resumegen_runtime::fs::write_atomic(&path, &export.bytes)
            .with_context(|| format!("save PDF: {}", path.display()))?;
        log::info!("saved {} bytes to {}", export.bytes.len(), path.display());

        Ok(ExportReport {
            path,
            bytes: export.bytes.len(),
            stale: export.stale,
            unsupported: export.unsupported,
        })
    }

    /// Back to an empty form with nothing generated.
    pub fn reset(&mut self) {
        self.engine.reset();
    }
}

fn read_resume_file(path: &Path) -> anyhow::Result<ResumeFile> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read resume file: {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume".to_string());
    Ok(ResumeFile::new(filename, bytes))
}

fn export_target(dest: Option<&Path>, filename: &str) -> PathBuf {
    match dest {
        None => PathBuf::from(filename),
        Some(p) if p.is_dir() || names_directory(p) => p.join(filename),
        Some(p) => p.to_path_buf(),
    }
}

fn names_directory(p: &Path) -> bool {
    p.as_os_str()
        .to_string_lossy()
        .ends_with(std::path::is_separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_service() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/parse_resume/"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"parsed_resume":{"name":"A. Lee","phone":"555-1212","email":"a@x.com","experience":"5 yrs"}}"#,
                "application/json",
            ))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/generate_resume/"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"resume":{"name":"A. Lee","phone":"555-1212","email":"a@x.com","summary":"Engineer","experience":"5 yrs","skills":"Go","education":"BS CS","projects":"","certifications":""}}"#,
                "application/json",
            ))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn upload_generate_and_export_to_directory() {
        let server = mock_service().await;
        let cfg_dir = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        let cv = cfg_dir.path().join("cv.pdf");
        std::fs::write(&cv, b"%PDF-1.4 resume").unwrap();

        let mut app = AppService::open(cfg_dir.path(), Some(server.uri())).unwrap();

        let outcome = app.upload_resume(Some(&cv), |_| async {}).await.unwrap();
        assert_eq!(outcome, UploadOutcome::Applied { fields: 4 });
        assert_eq!(app.form().get("phone"), "555-1212");

        app.set_field("job_description", "Go backend role");
        app.generate(|_| async {}).await.unwrap();

        let preview = app.preview_text().unwrap();
        assert!(preview.starts_with("A. Lee\n"));
        assert!(!preview.contains("Cover Letter"));

        let report = app
            .export_pdf(Some(out_dir.path()), |_| async {})
            .await
            .unwrap();
        assert_eq!(report.path, out_dir.path().join("resume.pdf"));
        assert!(!report.stale);
        assert!(report.unsupported.is_empty());
        let saved = std::fs::read(&report.path).unwrap();
        assert!(saved.starts_with(b"%PDF"));
        assert_eq!(saved.len(), report.bytes);
    }

    #[tokio::test]
    async fn upload_without_path_sends_nothing() {
        let server = MockServer::start().await;
        let cfg_dir = tempfile::tempdir().unwrap();
        let mut app = AppService::open(cfg_dir.path(), Some(server.uri())).unwrap();
        app.set_field("name", "Typed");

        let outcome = app.upload_resume(None, |_| async {}).await.unwrap();

        assert_eq!(outcome, UploadOutcome::Skipped);
        assert_eq!(app.form().get("name"), "Typed");
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn export_before_generation_fails_without_writing() {
        let cfg_dir = tempfile::tempdir().unwrap();
        let out = cfg_dir.path().join("out.pdf");
        let app = AppService::open(cfg_dir.path(), Some("http://127.0.0.1:9".into())).unwrap();

        assert!(app.preview_text().is_none());
        assert!(app.export_pdf(Some(&out), |_| async {}).await.is_err());
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn export_flags_edits_made_after_generation() {
        let server = mock_service().await;
        let cfg_dir = tempfile::tempdir().unwrap();
        let mut app = AppService::open(cfg_dir.path(), Some(server.uri())).unwrap();

        app.generate(|_| async {}).await.unwrap();
        app.set_field("skills", "Go, Rust");

        let out = cfg_dir.path().join("named.pdf");
        let report = app.export_pdf(Some(&out), |_| async {}).await.unwrap();
        assert_eq!(report.path, out);
        assert!(report.stale);
    }

    #[tokio::test]
    async fn export_creates_a_directory_named_with_a_trailing_separator() {
        let server = mock_service().await;
        let cfg_dir = tempfile::tempdir().unwrap();
        let mut app = AppService::open(cfg_dir.path(), Some(server.uri())).unwrap();
        app.generate(|_| async {}).await.unwrap();

        let out = cfg_dir.path().join("out");
        let dest = format!("{}{}", out.display(), std::path::MAIN_SEPARATOR);
        let report = app
            .export_pdf(Some(Path::new(&dest)), |_| async {})
            .await
            .unwrap();

        assert_eq!(report.path, out.join("resume.pdf"));
        assert!(std::fs::read(&report.path).unwrap().starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn export_keeps_unrelated_files_next_to_the_pdf() {
        let server = mock_service().await;
        let cfg_dir = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        let backup = out_dir.path().join("resume.pdf.bak");
        std::fs::write(&backup, b"user data").unwrap();

        let mut app = AppService::open(cfg_dir.path(), Some(server.uri())).unwrap();
        app.generate(|_| async {}).await.unwrap();
        app.export_pdf(Some(out_dir.path()), |_| async {})
            .await
            .unwrap();
        app.export_pdf(Some(out_dir.path()), |_| async {})
            .await
            .unwrap();

        assert_eq!(std::fs::read(&backup).unwrap(), b"user data");
        assert!(out_dir.path().join("resume.pdf").exists());
    }

    #[tokio::test]
    async fn export_lists_characters_missing_from_the_pdf() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate_resume/"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"resume":{"name":"Łukasz Wróbel","skills":"Rust → Go"}}"#,
                "application/json",
            ))
            .mount(&server)
            .await;
        let cfg_dir = tempfile::tempdir().unwrap();
        let mut app = AppService::open(cfg_dir.path(), Some(server.uri())).unwrap();
        app.generate(|_| async {}).await.unwrap();

        let out = cfg_dir.path().join("cv.pdf");
        let report = app.export_pdf(Some(&out), |_| async {}).await.unwrap();
        assert_eq!(report.unsupported, ['Ł', '→']);
        assert!(out.exists());
    }

    #[test]
    fn theme_persists_across_sessions() {
        let cfg_dir = tempfile::tempdir().unwrap();

        let mut app = AppService::open(cfg_dir.path(), None).unwrap();
        assert_eq!(app.theme(), Theme::Light);
        assert_eq!(app.toggle_theme(), Theme::Dark);
        drop(app);

        let app = AppService::open(cfg_dir.path(), None).unwrap();
        assert_eq!(app.theme(), Theme::Dark);
    }

    #[test]
    fn base_url_override_is_not_persisted() {
        let cfg_dir = tempfile::tempdir().unwrap();

        let app = AppService::open(cfg_dir.path(), Some("http://override:1".into())).unwrap();
        assert_eq!(app.config().base_url, "http://override:1");
        app.save_base_url("http://stored:2/ ").unwrap();

        let app = AppService::open(cfg_dir.path(), None).unwrap();
        assert_eq!(app.config().base_url, "http://stored:2/");
    }

    #[test]
    fn load_form_replaces_everything() {
        let cfg_dir = tempfile::tempdir().unwrap();
        let form = cfg_dir.path().join("form.json");
        std::fs::write(&form, r#"{"name":"A. Lee","skills":"Go","extra":null}"#).unwrap();

        let mut app = AppService::open(cfg_dir.path(), None).unwrap();
        app.set_field("phone", "555-0000");

        assert_eq!(app.load_form(&form).unwrap(), 2);
        assert_eq!(app.form().get("phone"), "");
        assert_eq!(app.form().get("skills"), "Go");

        std::fs::write(&form, b"[1,2]").unwrap();
        assert!(app.load_form(&form).is_err());
        assert_eq!(app.form().get("skills"), "Go");
    }
}
