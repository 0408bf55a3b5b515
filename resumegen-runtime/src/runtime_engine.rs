use std::sync::Arc;

use resumegen_core::config::AppConfig;
use resumegen_engine::engine::ResumeEngine;
use resumegen_engine::traits::{PdfRenderer, ResumeGenerator, ResumeParser};
use resumegen_providers::runtime::HttpRuntime;

use crate::clients::{HttpResumeGenerator, HttpResumeParser, timeouts_from_config};
use crate::pdf::PrintPdfRenderer;

/// Build a runnable engine from config: HTTP clients for the service, `printpdf` for export.
///
/// This keeps front ends thin.
pub fn build_engine_from_config(cfg: &AppConfig) -> anyhow::Result<ResumeEngine> {
    // One client (and connection pool) shared by both endpoints.
    let http = HttpRuntime::new(timeouts_from_config(cfg))?;

    let parser: Arc<dyn ResumeParser> =
        Arc::new(HttpResumeParser::new(cfg.base_url.clone(), http.clone()));
    let generator: Arc<dyn ResumeGenerator> =
        Arc::new(HttpResumeGenerator::new(cfg.base_url.clone(), http));
    let renderer: Arc<dyn PdfRenderer> = Arc::new(PrintPdfRenderer::default());

    log::debug!("resume service at {}", cfg.base_url);
    Ok(ResumeEngine::new(parser, generator, renderer).with_export_filename(&cfg.export_filename))
}
