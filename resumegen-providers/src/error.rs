use thiserror::Error;

/// Failure of a single call to the resume service.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("could not build HTTP client")]
    Setup(#[source] reqwest::Error),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response body")]
    Decode(#[source] serde_json::Error),

    #[error("service reported an error: {0}")]
    Service(String),

    #[error("response has no `{0}` payload")]
    MissingPayload(&'static str),
}

impl ClientError {
    /// HTTP status of the failed response, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
