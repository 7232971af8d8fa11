use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

// Query strings and bodies carry the user's question; keep both out of logs.
impl std::fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let url = match self.url.split_once('?') {
            Some((path, _)) => format!("{path}?[REDACTED]"),
            None => self.url.clone(),
        };

        let body_summary = match &self.body {
            Body::Empty => "Empty".to_string(),
            Body::Json(s) => format!("Json(len={})", s.len()),
        };

        f.debug_struct("HttpRequest")
            .field("method", &self.method.as_str())
            .field("url", &url)
            .field("headers", &self.headers)
            .field("body", &body_summary)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Body {
    Empty,
    Json(String),
}

impl HttpRequest {
    pub fn json_body(&self) -> Option<&str> {
        match &self.body {
            Body::Json(s) => Some(s),
            Body::Empty => None,
        }
    }
}
