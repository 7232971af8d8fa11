use medassist_core::article::ArticleList;
use medassist_core::config::ClientConfig;
use medassist_core::responses::{HealthStatus, ImageGeneration, InstantAnswer};
use medassist_engine::error::ExchangeError;
use medassist_engine::traits::{
    AnswerBackend, ArticleSource, ChatBackend, HealthProbe, ImageBackend,
};
use medassist_providers::endpoints::Endpoints;
use medassist_providers::parse;
use medassist_providers::request::HttpRequest;
use medassist_providers::runtime::{HttpRuntime, TransportError};
use std::time::Duration;

// Error bodies end up in debug logs; cap them.
const MAX_ERROR_BODY: usize = 512;

/// Talks to the backend over HTTP for every route the client needs.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    endpoints: Endpoints,
    runtime: HttpRuntime,
    request_timeout: Duration,
}

impl HttpBackend {
    pub fn from_config(cfg: &ClientConfig) -> anyhow::Result<Self> {
        let runtime = HttpRuntime::new(cfg.timeouts)?;
        Ok(Self {
            endpoints: Endpoints::from_config(cfg),
            runtime,
            request_timeout: Duration::from_millis(cfg.timeouts.request_ms),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn fetch<T>(
        &self,
        req: HttpRequest,
        decode: fn(&[u8]) -> anyhow::Result<T>,
    ) -> Result<T, ExchangeError> {
        let resp = self
            .runtime
            .execute(&req)
            .await
            .map_err(|e| self.transport_error(e))?;

        if !resp.is_success() {
            let mut body = resp.body_text();
            truncate_chars(&mut body, MAX_ERROR_BODY);
            return Err(ExchangeError::Status {
                status: resp.status,
                body,
            });
        }

        decode(&resp.body).map_err(|e| ExchangeError::Decode(format!("{e:#}")))
    }

    fn transport_error(&self, e: TransportError) -> ExchangeError {
        match e {
            TransportError::Timeout => ExchangeError::Timeout(self.request_timeout),
            other => ExchangeError::Network(other.to_string()),
        }
    }
}

fn truncate_chars(s: &mut String, max: usize) {
    if let Some((idx, _)) = s.char_indices().nth(max) {
        s.truncate(idx);
    }
}

#[async_trait::async_trait]
impl ChatBackend for HttpBackend {
    async fn chat(&self, message: &str) -> Result<String, ExchangeError> {
        self.fetch(self.endpoints.chat(message), parse::parse_chat_reply).await
    }
}

#[async_trait::async_trait]
impl ImageBackend for HttpBackend {
    async fn generate_image(&self, query: &str) -> Result<ImageGeneration, ExchangeError> {
        self.fetch(
            self.endpoints.generate_image(query),
            parse::parse_image_generation,
        )
        .await
    }
}

#[async_trait::async_trait]
impl AnswerBackend for HttpBackend {
    async fn instant_answer(&self, query: &str) -> Result<InstantAnswer, ExchangeError> {
        self.fetch(
            self.endpoints.instant_answer(query),
            parse::parse_instant_answer,
        )
        .await
    }
}

#[async_trait::async_trait]
impl ArticleSource for HttpBackend {
    async fn list_articles(&self, tag: Option<&str>) -> Result<ArticleList, ExchangeError> {
        self.fetch(self.endpoints.articles(tag), parse::parse_articles).await
    }
}

#[async_trait::async_trait]
impl HealthProbe for HttpBackend {
    async fn health(&self) -> Result<HealthStatus, ExchangeError> {
        self.fetch(self.endpoints.health(), parse::parse_health).await
    }
}
