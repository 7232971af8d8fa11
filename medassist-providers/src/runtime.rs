use crate::request::{HttpRequest, Method};
use medassist_core::config::TimeoutConfig;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("http request failed: {0}")]
    Other(String),
}

impl TransportError {
    fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else if e.is_builder() {
            TransportError::InvalidRequest(e.to_string())
        } else {
            TransportError::Other(e.to_string())
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
        (200..=299).contains(&self.status)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Executes [`HttpRequest`]s with one shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpRuntime {
    client: reqwest::Client,
}

impl HttpRuntime {
    pub fn new(timeouts: TimeoutConfig) -> Result<Self, TransportError> {
        // Without an explicit timeout a stalled backend keeps the view pending forever.
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(timeouts.connect_ms))
            .timeout(Duration::from_millis(timeouts.request_ms))
            .build()
            .map_err(|e| TransportError::InvalidRequest(format!("build http client: {e}")))?;
        Ok(Self { client })
    }

    pub async fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut headers = HeaderMap::new();
        for (k, v) in &req.headers {
            let name = HeaderName::from_bytes(k.as_bytes())
                .map_err(|_| TransportError::InvalidRequest(format!("invalid header name: {k}")))?;
            let value = HeaderValue::from_str(v).map_err(|_| {
                TransportError::InvalidRequest(format!("invalid header value for {k}"))
            })?;
            headers.insert(name, value);
        }

        let builder = match req.method {
            Method::Get => self.client.get(&req.url),
            Method::Post => self.client.post(&req.url),
        }
        .headers(headers);

        let builder = match req.json_body() {
            Some(json) => builder.body(json.to_string()),
            None => builder,
        };

        log::debug!("dispatch {req:?}");

        let resp = builder.send().await.map_err(TransportError::from_reqwest)?;
        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(TransportError::from_reqwest)?
            .to_vec();

        Ok(HttpResponse { status, body })
    }
}
