use crate::error::ClientError;
use crate::request::{Body, HttpRequest};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub connect: Duration,
    pub request: Duration,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            request: Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes [`HttpRequest`] values against the network.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpRuntime {
    client: reqwest::Client,
}

impl HttpRuntime {
    pub fn new(timeouts: HttpTimeouts) -> Result<Self, ClientError> {
        // Without an explicit timeout a stalled service would hang the session.
        let client = reqwest::Client::builder()
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.request)
            .build()
            .map_err(ClientError::Setup)?;
        Ok(Self { client })
    }

    pub async fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, ClientError> {
        let mut headers = HeaderMap::new();
        for (k, v) in &req.headers {
            let name = HeaderName::from_bytes(k.as_bytes())
                .map_err(|_| ClientError::InvalidRequest(format!("invalid header name: {k}")))?;
            let value = HeaderValue::from_str(v)
                .map_err(|_| ClientError::InvalidRequest(format!("invalid header value for {k}")))?;
            headers.insert(name, value);
        }

        let builder = match req.method.as_str() {
            "GET" => self.client.get(&req.url),
            "POST" => self.client.post(&req.url),
            other => {
                return Err(ClientError::InvalidRequest(format!(
                    "unsupported method: {other}"
                )));
            }
        }
        .headers(headers);

        let builder = match &req.body {
            Body::Empty => builder,
            Body::Json(s) => builder.body(s.clone()),
            Body::MultipartFormData { bytes, .. } => builder.body(bytes.clone()),
        };

        log::debug!("sending {} {} ({})", req.method, req.url, req.body.summary());
        let started = Instant::now();

        let transport = |source: reqwest::Error| {
            log::warn!("{} {} failed: {source}", req.method, req.url);
            ClientError::Transport {
                url: req.url.clone(),
                source,
            }
        };
        let resp = builder.send().await.map_err(transport)?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(transport)?.to_vec();

        let elapsed_ms = started.elapsed().as_millis();
        if (200..300).contains(&status) {
            log::debug!(
                "{} {} -> {} in {}ms ({} bytes)",
                req.method,
                req.url,
                status,
                elapsed_ms,
                body.len()
            );
        } else {
            log::warn!("{} {} -> {} in {}ms", req.method, req.url, status, elapsed_ms);
        }

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn sends_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate_resume/"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"ok":true}"#, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let rt = HttpRuntime::new(HttpTimeouts::default()).unwrap();
        let req = HttpRequest::post(
            format!("{}/generate_resume/", server.uri()),
            Body::Json("{}".into()),
        )
        .with_header("Content-Type", "application/json");

        let resp = rt.execute(&req).await.unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.body, br#"{"ok":true}"#);
    }

    #[tokio::test]
    async fn non_success_status_is_returned_not_raised() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
            .mount(&server)
            .await;

        let rt = HttpRuntime::new(HttpTimeouts::default()).unwrap();
        let req = HttpRequest::post(server.uri(), Body::Empty);
        let resp = rt.execute(&req).await.unwrap();

        assert_eq!(resp.status, 503);
        assert!(!resp.is_success());
    }

    #[tokio::test]
    async fn request_timeout_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let rt = HttpRuntime::new(HttpTimeouts {
            connect: Duration::from_secs(1),
            request: Duration::from_millis(50),
        })
        .unwrap();
        let err = rt
            .execute(&HttpRequest::post(server.uri(), Body::Empty))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Transport { .. }));
    }

    #[tokio::test]
    async fn rejects_unsupported_method() {
        let rt = HttpRuntime::new(HttpTimeouts::default()).unwrap();
        let mut req = HttpRequest::post("http://127.0.0.1:1/", Body::Empty);
        req.method = "PATCH".into();

        assert!(matches!(
            rt.execute(&req).await,
            Err(ClientError::InvalidRequest(_))
        ));
    }
}
