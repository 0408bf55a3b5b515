use resumegen_core::config::AppConfig;
use resumegen_core::types::{FormData, ResumeFile, ResumeResult};
use resumegen_engine::traits::{ResumeGenerator, ResumeParser};
use resumegen_providers::ClientError;
use resumegen_providers::decode::{decode_generate_resume, decode_parse_resume};
use resumegen_providers::generate_resume::build_generate_resume_request;
use resumegen_providers::parse_resume::build_parse_resume_request;
use resumegen_providers::runtime::{HttpRuntime, HttpTimeouts};
use std::time::Duration;

pub fn timeouts_from_config(cfg: &AppConfig) -> HttpTimeouts {
    HttpTimeouts {
        connect: Duration::from_secs(cfg.connect_timeout_secs),
        request: Duration::from_secs(cfg.request_timeout_secs),
    }
}

#[derive(Debug, Clone)]
pub struct HttpResumeParser {
    base_url: String,
    http: HttpRuntime,
}

impl HttpResumeParser {
    pub fn new(base_url: impl Into<String>, http: HttpRuntime) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }
}

#[async_trait::async_trait]
impl ResumeParser for HttpResumeParser {
    async fn parse(&self, file: &ResumeFile) -> Result<FormData, ClientError> {
        let req = build_parse_resume_request(&self.base_url, file);
        let resp = self.http.execute(&req).await?;
        decode_parse_resume(&resp)
            .inspect_err(|e| log::warn!("resume parsing failed: {e}"))
    }
}

#[derive(Debug, Clone)]
pub struct HttpResumeGenerator {
    base_url: String,
    http: HttpRuntime,
}

impl HttpResumeGenerator {
    pub fn new(base_url: impl Into<String>, http: HttpRuntime) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }
}

#[async_trait::async_trait]
impl ResumeGenerator for HttpResumeGenerator {
    async fn generate(&self, form: &FormData) -> Result<ResumeResult, ClientError> {
        let req = build_generate_resume_request(&self.base_url, form);
        let resp = self.http.execute(&req).await?;
        decode_generate_resume(&resp)
            .inspect_err(|e| log::warn!("resume generation failed: {e}"))
    }
}
