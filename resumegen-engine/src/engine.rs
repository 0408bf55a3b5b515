use crate::session::{
    PdfExport, STAGE_DONE, STAGE_GENERATING, STAGE_RENDERING, STAGE_UPLOADING, UploadOutcome, ms,
};
use crate::traits::{PdfRenderer, ResumeGenerator, ResumeParser};
use resumegen_core::config::DEFAULT_EXPORT_FILENAME;
use resumegen_core::document::ResumeDocument;
use resumegen_core::form::FormState;
use resumegen_core::preview::{PreviewBlock, render_preview};
use resumegen_core::types::{FormData, ResumeFile, ResumeResult};
use resumegen_providers::ClientError;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no generated resume to export")]
    NoResult,

    #[error("resume parsing failed")]
    Parse(#[source] ClientError),

    #[error("resume generation failed")]
    Generate(#[source] ClientError),

    #[error("PDF rendering failed")]
    Render(#[source] anyhow::Error),
}

/// Owns the form and the displayed result for one session.
///
/// Every flow takes `&mut self`, so requests never overlap and the last
/// completed call is always the one the user issued last.
pub struct ResumeEngine {
    form: FormState,
    result: Option<ResumeResult>,
    // Form revision the displayed result was generated from.
    result_revision: u64,
    export_filename: String,
    parser: Arc<dyn ResumeParser>,
    generator: Arc<dyn ResumeGenerator>,
    renderer: Arc<dyn PdfRenderer>,
}

impl ResumeEngine {
    pub fn new(
        parser: Arc<dyn ResumeParser>,
        generator: Arc<dyn ResumeGenerator>,
        renderer: Arc<dyn PdfRenderer>,
    ) -> Self {
        Self {
            form: FormState::new(),
            result: None,
            result_revision: 0,
            export_filename: DEFAULT_EXPORT_FILENAME.into(),
            parser,
            generator,
            renderer,
        }
    }

    pub fn with_export_filename(mut self, filename: impl Into<String>) -> Self {
        self.export_filename = filename.into();
        self
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn set_field(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.form.set(field, value);
    }

    pub fn replace_form(&mut self, data: FormData) {
        self.form.replace_all(data);
    }

    pub fn result(&self) -> Option<&ResumeResult> {
        self.result.as_ref()
    }

    /// True when the form was edited after the displayed result was generated.
    pub fn is_result_stale(&self) -> bool {
        self.result.is_some() && self.form.revision() != self.result_revision
    }

    /// Read-only preview of the displayed result; `None` while nothing has been generated.
    pub fn preview(&self) -> Option<Vec<PreviewBlock>> {
        self.result.as_ref().map(render_preview)
    }

    /// Empty form, no result.
    pub fn reset(&mut self) {
        self.form = FormState::new();
        self.result = None;
        self.result_revision = 0;
    }

    pub async fn upload_resume(
        &mut self,
        file: Option<ResumeFile>,
    ) -> Result<UploadOutcome, EngineError> {
        self.upload_resume_with_hook(file, |_stage| async {}).await
    }

    /// Parses `file` and replaces the whole form with the result.
    ///
    /// `None` is a no-op. On failure the form is left as it was.
    pub async fn upload_resume_with_hook<F, Fut>(
        &mut self,
        file: Option<ResumeFile>,
        on_stage: F,
    ) -> Result<UploadOutcome, EngineError>
    where
        F: Fn(&'static str) -> Fut,
        Fut: Future<Output = ()>,
    {
        let Some(file) = file else {
            log::debug!("upload skipped: no file selected");
            return Ok(UploadOutcome::Skipped);
        };

        if !file.has_accepted_extension() {
            log::warn!(
                "uploading {} with an unexpected extension; the service may reject it",
                file.filename
            );
        }

        on_stage(STAGE_UPLOADING).await;
        let t0 = Instant::now();
        let parsed = self
            .parser
            .parse(&file)
            .await
            .map_err(EngineError::Parse)?;
        log::info!(
            "parsed {} into {} fields in {}ms",
            file.filename,
            parsed.len(),
            ms(t0.elapsed())
        );

        let fields = parsed.len();
        self.form.replace_all(parsed);
        on_stage(STAGE_DONE).await;
        Ok(UploadOutcome::Applied { fields })
    }

    pub async fn generate(&mut self) -> Result<&ResumeResult, EngineError> {
        self.generate_with_hook(|_stage| async {}).await
    }

    /// Submits the current form and replaces the displayed result.
    ///
    /// On failure any previously displayed result is kept.
    pub async fn generate_with_hook<F, Fut>(
        &mut self,
        on_stage: F,
    ) -> Result<&ResumeResult, EngineError>
    where
        F: Fn(&'static str) -> Fut,
        Fut: Future<Output = ()>,
    {
        on_stage(STAGE_GENERATING).await;

        let revision = self.form.revision();
        let t0 = Instant::now();
        let resume = self
            .generator
            .generate(self.form.snapshot())
            .await
            .map_err(EngineError::Generate)?;
        log::info!("resume generated in {}ms", ms(t0.elapsed()));

        self.result_revision = revision;
        on_stage(STAGE_DONE).await;
        Ok(&*self.result.insert(resume))
    }

    pub async fn export_pdf(&self) -> Result<PdfExport, EngineError> {
        self.export_pdf_with_hook(|_stage| async {}).await
    }

    /// Lays out and renders the displayed result.
    ///
    /// Uses the result as shown, not the live form; `stale` reports whether they disagree.
    pub async fn export_pdf_with_hook<F, Fut>(&self, on_stage: F) -> Result<PdfExport, EngineError>
    where
        F: Fn(&'static str) -> Fut,
        Fut: Future<Output = ()>,
    {
        let resume = self.result.as_ref().ok_or(EngineError::NoResult)?;

        on_stage(STAGE_RENDERING).await;
        let t0 = Instant::now();
        let doc = ResumeDocument::from_resume(resume);
        let bytes = self.renderer.render(&doc).map_err(EngineError::Render)?;
        log::debug!("rendered {} PDF bytes in {}ms", bytes.len(), ms(t0.elapsed()));

        let unsupported = self.renderer.unsupported_chars(&doc);
        if !unsupported.is_empty() {
            log::warn!("PDF omits characters its fonts cannot draw: {unsupported:?}");
        }

        let stale = self.is_result_stale();
        if stale {
            log::warn!("exporting a resume generated before the latest form edits");
        }

        on_stage(STAGE_DONE).await;
        Ok(PdfExport {
            filename: self.export_filename.clone(),
            bytes,
            stale,
            unsupported,
        })
    }
}
