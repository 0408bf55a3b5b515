use crate::error::ClientError;
use crate::runtime::HttpResponse;
use resumegen_core::types::{FormData, ResumeResult};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

// Cap on how much of an error body ends up in messages and logs.
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Deserialize)]
struct ParseResumeEnvelope {
    #[serde(default)]
    parsed_resume: Option<FormData>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct GenerateResumeEnvelope {
    #[serde(default)]
    resume: Option<ResumeResult>,
    #[serde(default)]
    error: Option<Value>,
}

/// Decode `{ "parsed_resume": {...} }` from the parsing endpoint.
pub fn decode_parse_resume(resp: &HttpResponse) -> Result<FormData, ClientError> {
    let envelope: ParseResumeEnvelope = decode_json(resp)?;
    if let Some(err) = envelope.error {
        return Err(ClientError::Service(error_message(err)));
    }
    envelope
        .parsed_resume
        .ok_or(ClientError::MissingPayload("parsed_resume"))
}

/// Decode `{ "resume": {...} }` from the generation endpoint.
pub fn decode_generate_resume(resp: &HttpResponse) -> Result<ResumeResult, ClientError> {
    let envelope: GenerateResumeEnvelope = decode_json(resp)?;
    if let Some(err) = envelope.error {
        return Err(ClientError::Service(error_message(err)));
    }
    envelope.resume.ok_or(ClientError::MissingPayload("resume"))
}

fn decode_json<T: DeserializeOwned>(resp: &HttpResponse) -> Result<T, ClientError> {
    if !resp.is_success() {
        return Err(ClientError::Status {
            status: resp.status,
            body: truncate_body(&resp.body),
        });
    }
    serde_json::from_slice(&resp.body).map_err(ClientError::Decode)
}

fn error_message(err: Value) -> String {
    match err {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn truncate_body(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let mut out: String = text.chars().take(MAX_ERROR_BODY_CHARS).collect();
    if text.chars().count() > MAX_ERROR_BODY_CHARS {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn decodes_parsed_resume() {
        let form =
            decode_parse_resume(&ok(r#"{"parsed_resume":{"name":"A","experience":"5 yrs"}}"#))
                .unwrap();
        assert_eq!(form.get("name"), "A");
        assert_eq!(form.get("experience"), "5 yrs");
        assert_eq!(form.len(), 2);
    }

    #[test]
    fn decodes_generated_resume_with_cover_letter() {
        let resume = decode_generate_resume(&ok(
            r#"{"resume":{"name":"A","summary":"S","cover_letter":"Dear team"}}"#,
        ))
        .unwrap();
        assert_eq!(resume.name(), "A");
        assert_eq!(resume.cover_letter(), Some("Dear team"));
    }

    #[test]
    fn error_envelope_is_a_service_failure() {
        let err = decode_parse_resume(&ok(
            r#"{"error":"Unsupported file format. Please upload a PDF or DOCX."}"#,
        ))
        .unwrap_err();
        match err {
            ClientError::Service(msg) => assert!(msg.starts_with("Unsupported file format")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn missing_or_null_payload_is_reported() {
        assert!(matches!(
            decode_generate_resume(&ok("{}")),
            Err(ClientError::MissingPayload("resume"))
        ));
        assert!(matches!(
            decode_parse_resume(&ok(r#"{"parsed_resume":null}"#)),
            Err(ClientError::MissingPayload("parsed_resume"))
        ));
    }

    #[test]
    fn non_json_body_is_a_decode_failure() {
        assert!(matches!(
            decode_generate_resume(&ok("<html>oops</html>")),
            Err(ClientError::Decode(_))
        ));
        assert!(matches!(
            decode_generate_resume(&ok(r#"{"resume":"not an object"}"#)),
            Err(ClientError::Decode(_))
        ));
    }

    #[test]
    fn non_success_status_wins_over_body() {
        let resp = HttpResponse {
            status: 500,
            body: "x".repeat(2000).into_bytes(),
        };
        let err = decode_generate_resume(&resp).unwrap_err();
        assert_eq!(err.status(), Some(500));
        match err {
            ClientError::Status { body, .. } => {
                assert_eq!(body.chars().count(), MAX_ERROR_BODY_CHARS + 1)
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
