use crate::request::{Body, HttpRequest, PARSE_RESUME_PATH, join_url};
use resumegen_core::types::ResumeFile;

/// Multipart part name the parsing endpoint reads the upload from.
pub const RESUME_FILE_PART: &str = "resume_file";

pub fn build_parse_resume_request(base_url: &str, file: &ResumeFile) -> HttpRequest {
    let boundary = format!("Boundary-{}", uuid::Uuid::new_v4());

    let mut body: Vec<u8> = Vec::new();
    append_file(
        &mut body,
        &boundary,
        RESUME_FILE_PART,
        &file.filename,
        &file.content_type,
        &file.bytes,
    );
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

    HttpRequest::post(
        join_url(base_url, PARSE_RESUME_PATH),
        Body::MultipartFormData {
            boundary: boundary.clone(),
            bytes: body,
        },
    )
    .with_header(
        "Content-Type",
        format!("multipart/form-data; boundary={}", boundary),
    )
    .with_header("Accept", "application/json")
}

fn append_file(
    body: &mut Vec<u8>,
    boundary: &str,
    name: &str,
    filename: &str,
    content_type: &str,
    bytes: &[u8],
) {
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            name,
            escape_quoted(filename)
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(b"\r\n");
}

// Quoted-string in a header: strip line breaks, escape quotes and backslashes.
fn escape_quoted(value: &str) -> String {
    value
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .flat_map(|c| match c {
            '"' | '\\' => vec!['\\', c],
            other => vec![other],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_single_file_multipart() {
        let file = ResumeFile::new("cv.pdf", b"%PDF-1.4 body".to_vec());
        let req = build_parse_resume_request("http://127.0.0.1:8000", &file);

        assert_eq!(req.method, "POST");
        assert_eq!(req.url, "http://127.0.0.1:8000/parse_resume/");
        assert_eq!(req.header("accept"), Some("application/json"));

        let Body::MultipartFormData { boundary, bytes } = req.body else {
            panic!("expected multipart");
        };
        assert_eq!(
            req.headers
                .iter()
                .find(|(k, _)| k == "Content-Type")
                .map(|(_, v)| v.clone()),
            Some(format!("multipart/form-data; boundary={boundary}"))
        );

        let s = String::from_utf8_lossy(&bytes);
        assert!(s.starts_with(&format!("--{boundary}\r\n")));
        assert!(s.contains("name=\"resume_file\"; filename=\"cv.pdf\""));
        assert!(s.contains("Content-Type: application/pdf\r\n\r\n%PDF-1.4 body\r\n"));
        assert!(s.ends_with(&format!("--{boundary}--\r\n")));
        assert_eq!(s.matches("Content-Disposition").count(), 1);
    }

    #[test]
    fn filename_cannot_break_the_header() {
        assert_eq!(escape_quoted("my \"cv\".pdf"), "my \\\"cv\\\".pdf");
        assert_eq!(escape_quoted("a\r\nb.pdf"), "ab.pdf");
    }
}
