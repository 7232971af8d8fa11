use crate::error::ExchangeError;
use async_trait::async_trait;
use medassist_core::article::ArticleList;
use medassist_core::responses::{HealthStatus, ImageGeneration, InstantAnswer};
use medassist_core::transcript::TranscriptEntry;
use medassist_core::types::RequestState;

#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn chat(&self, message: &str) -> Result<String, ExchangeError>;
}

#[async_trait]
pub trait ImageBackend: Send + Sync {
    async fn generate_image(&self, query: &str) -> Result<ImageGeneration, ExchangeError>;
}

#[async_trait]
pub trait AnswerBackend: Send + Sync {
    async fn instant_answer(&self, query: &str) -> Result<InstantAnswer, ExchangeError>;
}

#[async_trait]
pub trait ArticleSource: Send + Sync {
    async fn list_articles(&self, tag: Option<&str>) -> Result<ArticleList, ExchangeError>;
}

#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn health(&self) -> Result<HealthStatus, ExchangeError>;
}

/// Presentation side of the client.
///
/// Callbacks run synchronously on the calling task and must be fast. The
/// client's transcript and state locks are released before a callback runs, so
/// a view may read `transcript()` and `state()` from inside one. Callbacks are
/// delivered in transcript order.
pub trait ConversationView: Send + Sync {
    fn entry_appended(&self, entry: &TranscriptEntry);
    fn state_changed(&self, state: RequestState);
}
