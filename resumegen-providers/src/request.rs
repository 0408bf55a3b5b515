use serde::{Deserialize, Serialize};

pub const PARSE_RESUME_PATH: &str = "/parse_resume/";
pub const GENERATE_RESUME_PATH: &str = "/generate_resume/";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

// Uploaded resumes can be large and personal; never dump the bytes into logs.
impl std::fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &self.headers)
            .field("body", &self.body.summary())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Body {
    Empty,
    Json(String),
    MultipartFormData { boundary: String, bytes: Vec<u8> },
}

impl Body {
    pub fn summary(&self) -> String {
        match self {
            Body::Empty => "Empty".to_string(),
            Body::Json(s) => format!("Json(len={})", s.len()),
            Body::MultipartFormData { boundary, bytes } => {
                format!("MultipartFormData(boundary={}, bytes_len={})", boundary, bytes.len())
            }
        }
    }
}

impl HttpRequest {
    pub fn post(url: impl Into<String>, body: Body) -> Self {
        Self {
            method: "POST".into(),
            url: url.into(),
            headers: vec![],
            body,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Join a service base URL and an endpoint path with exactly one slash.
///
/// The endpoint's trailing slash is significant to the service and is kept.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}
