use crate::request::{Body, HttpRequest, Method};
use medassist_core::config::{ClientConfig, EndpointPaths};
use serde_json::json;
use url::form_urlencoded;

/// Request builders for every backend route, resolved against one base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub base_url: String,
    pub paths: EndpointPaths,
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>, paths: EndpointPaths) -> Self {
        Self {
            base_url: base_url.into(),
            paths,
        }
    }

    pub fn from_config(cfg: &ClientConfig) -> Self {
        Self::new(cfg.base_url.trim(), cfg.endpoints.clone())
    }

    pub fn chat(&self, message: &str) -> HttpRequest {
        post_json(
            join_url(&self.base_url, &self.paths.chat),
            json!({ "message": message }),
        )
    }

    pub fn generate_image(&self, query: &str) -> HttpRequest {
        post_json(
            join_url(&self.base_url, &self.paths.generate_image),
            json!({ "query": query }),
        )
    }

    pub fn articles(&self, tag: Option<&str>) -> HttpRequest {
        let url = join_url(&self.base_url, &self.paths.articles);
        let tag = tag.map(str::trim).filter(|t| !t.is_empty());
        match tag {
            Some(tag) => get(with_query(&url, &[("tag", tag)])),
            None => get(url),
        }
    }

    pub fn instant_answer(&self, query: &str) -> HttpRequest {
        let url = join_url(&self.base_url, &self.paths.instant_answer);
        get(with_query(&url, &[("q", query)]))
    }

    pub fn health(&self) -> HttpRequest {
        get(join_url(&self.base_url, &self.paths.health))
    }
}

fn post_json(url: String, payload: serde_json::Value) -> HttpRequest {
    HttpRequest {
        method: Method::Post,
        url,
        headers: vec![
            ("Content-Type".into(), "application/json".into()),
            ("Accept".into(), "application/json".into()),
        ],
        body: Body::Json(payload.to_string()),
    }
}

fn get(url: String) -> HttpRequest {
    HttpRequest {
        method: Method::Get,
        url,
        headers: vec![("Accept".into(), "application/json".into())],
        body: Body::Empty,
    }
}

fn with_query(url: &str, pairs: &[(&str, &str)]) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    format!("{url}?{query}")
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}
