use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_EXPORT_FILENAME: &str = "resume.pdf";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the parsing/generation service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    // Generation runs a language model on the other side; keep this generous.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_export_filename")]
    pub export_filename: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            export_filename: default_export_filename(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_export_filename() -> String {
    DEFAULT_EXPORT_FILENAME.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg: AppConfig = serde_json::from_str(r#"{"base_url":"http://svc:9000"}"#).unwrap();
        assert_eq!(cfg.base_url, "http://svc:9000");
        assert_eq!(cfg.request_timeout_secs, 120);
        assert_eq!(cfg.export_filename, "resume.pdf");
    }
}
