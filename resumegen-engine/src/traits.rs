use async_trait::async_trait;
use resumegen_core::document::ResumeDocument;
use resumegen_core::types::{FormData, ResumeFile, ResumeResult};
use resumegen_providers::ClientError;

/// Turns an uploaded resume into form fields.
#[async_trait]
pub trait ResumeParser: Send + Sync {
    async fn parse(&self, file: &ResumeFile) -> Result<FormData, ClientError>;
}

/// Produces a polished resume (and maybe a cover letter) from form fields.
#[async_trait]
pub trait ResumeGenerator: Send + Sync {
    async fn generate(&self, form: &FormData) -> Result<ResumeResult, ClientError>;
}

/// Draws a laid-out resume into PDF bytes.
///
/// Synchronous: rendering is CPU-bound and PDF builders are usually not `Send`.
pub trait PdfRenderer: Send + Sync {
    fn render(&self, doc: &ResumeDocument) -> anyhow::Result<Vec<u8>>;

    /// Characters in `doc` that `render` cannot put on the page.
    fn unsupported_chars(&self, _doc: &ResumeDocument) -> Vec<char> {
        Vec::new()
    }
}
