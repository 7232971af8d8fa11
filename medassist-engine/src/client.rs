use crate::error::{ExchangeError, FailureKind};
use crate::pending::PendingTracker;
use crate::traits::{
    AnswerBackend, ArticleSource, ChatBackend, ConversationView, HealthProbe, ImageBackend,
};
use medassist_core::article::ArticleList;
use medassist_core::config::{ClientConfig, FailureMessages};
use medassist_core::responses::HealthStatus;
use medassist_core::text::{format_image_explanation, image_query_or_fallback, normalize_input};
use medassist_core::transcript::{Transcript, TranscriptEntry};
use medassist_core::types::{ImageRef, RequestState};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

const FLOW_CHAT: &str = "chat";
const FLOW_IMAGE: &str = "image";
const FLOW_INSTANT: &str = "instant-answer";
const FLOW_ARTICLES: &str = "articles";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub fallback_image_query: String,
    pub image_alt_text: String,
    pub failure_messages: FailureMessages,
    pub request_timeout: Duration,
}

impl ClientSettings {
    pub fn from_config(cfg: &ClientConfig) -> Self {
        Self {
            fallback_image_query: cfg.fallback_image_query.clone(),
            image_alt_text: cfg.image_alt_text.clone(),
            failure_messages: cfg.failure_messages.clone(),
            request_timeout: Duration::from_millis(cfg.timeouts.request_ms),
        }
    }
}

#[derive(Clone)]
pub struct Backends {
    pub chat: Arc<dyn ChatBackend>,
    pub images: Arc<dyn ImageBackend>,
    pub answers: Arc<dyn AnswerBackend>,
    pub articles: Arc<dyn ArticleSource>,
    pub health: Arc<dyn HealthProbe>,
}

impl Backends {
    /// Uses one value for every route, the usual case for a single HTTP backend.
    pub fn shared<B>(backend: Arc<B>) -> Self
    where
        B: ChatBackend + ImageBackend + AnswerBackend + ArticleSource + HealthProbe + 'static,
    {
        Self {
            chat: backend.clone(),
            images: backend.clone(),
            answers: backend.clone(),
            articles: backend.clone(),
            health: backend,
        }
    }
}

/// What a user action ended with. Failures are already rendered into the
/// transcript by the time this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeOutcome {
    Skipped,
    Replied,
    Failed(FailureKind),
}

pub struct ConversationClient {
    settings: ClientSettings,
    backends: Backends,
    view: Arc<dyn ConversationView>,
    transcript: Mutex<Transcript>,
    notify_order: Mutex<()>,
    input: Mutex<String>,
    pending: PendingTracker,
}

impl ConversationClient {
    pub fn new(
        settings: ClientSettings,
        backends: Backends,
        view: Arc<dyn ConversationView>,
    ) -> Self {
        Self {
            settings,
            backends,
            view,
            transcript: Mutex::new(Transcript::new()),
            notify_order: Mutex::new(()),
            input: Mutex::new(String::new()),
            pending: PendingTracker::new(),
        }
    }

    /// Sends one chat message and renders the reply (or a failure notice).
    ///
    /// Blank input is a no-op. Otherwise the user entry is appended before the
    /// request goes out and exactly one reply or error entry follows it.
    pub async fn submit(&self, raw_input: &str) -> ExchangeOutcome {
        let Some(message) = normalize_input(raw_input) else {
            return ExchangeOutcome::Skipped;
        };

        self.append(TranscriptEntry::user(message.clone()));
        self.clear_input();

        let _pending = self.pending.begin(self.view.as_ref());
        log::debug!("sending chat message ({} chars)", message.chars().count());

        match self.bounded(self.backends.chat.chat(&message)).await {
            Ok(reply) => {
                self.append(TranscriptEntry::assistant(reply));
                ExchangeOutcome::Replied
            }
            Err(e) => self.fail(FLOW_CHAT, &self.settings.failure_messages.chat, e),
        }
    }

    /// Fills the input buffer with a canned phrase and submits it.
    ///
    /// The phrase goes in and comes back out under one lock, so a concurrent
    /// `set_input` or submit cannot swap it for other text.
    pub async fn submit_quick_phrase(&self, text: &str) -> ExchangeOutcome {
        let raw = {
            let mut input = lock(&self.input);
            *input = text.to_string();
            std::mem::take(&mut *input)
        };
        self.submit(&raw).await
    }

    /// Submits whatever is currently in the input buffer.
    pub async fn submit_input(&self) -> ExchangeOutcome {
        let raw = std::mem::take(&mut *lock(&self.input));
        self.submit(&raw).await
    }

    /// Asks the image endpoint for a diagram. Blank queries use the configured
    /// fallback. Only the response is rendered; the query gets no user entry.
    pub async fn request_image(&self, query: &str) -> ExchangeOutcome {
        let query = image_query_or_fallback(query, &self.settings.fallback_image_query);

        let _pending = self.pending.begin(self.view.as_ref());
        log::debug!("requesting image ({} chars)", query.chars().count());

        match self.bounded(self.backends.images.generate_image(&query)).await {
            Ok(generated) => {
                let mut entry = TranscriptEntry::assistant(format_image_explanation(
                    generated.explanation.as_deref(),
                ));
                if let Some(url) = generated.image_url {
                    let alt = format!("{}: {}", self.settings.image_alt_text, query);
                    entry = entry.with_attachment(ImageRef::new(url, alt));
                }
                self.append(entry);
                ExchangeOutcome::Replied
            }
            Err(e) => self.fail(FLOW_IMAGE, &self.settings.failure_messages.image, e),
        }
    }

    /// Search flow: same shape as [`submit`](Self::submit) against the
    /// instant-answer endpoint.
    pub async fn ask_instant(&self, raw_query: &str) -> ExchangeOutcome {
        let Some(query) = normalize_input(raw_query) else {
            return ExchangeOutcome::Skipped;
        };

        self.append(TranscriptEntry::user(query.clone()));
        self.clear_input();

        let _pending = self.pending.begin(self.view.as_ref());
        log::debug!("requesting instant answer ({} chars)", query.chars().count());

        match self.bounded(self.backends.answers.instant_answer(&query)).await {
            Ok(answer) => {
                self.append(TranscriptEntry::assistant(answer.display_text()));
                ExchangeOutcome::Replied
            }
            Err(e) => self.fail(
                FLOW_INSTANT,
                &self.settings.failure_messages.instant_answer,
                e,
            ),
        }
    }

    /// Lists articles, optionally filtered by tag. Leaves the transcript and
    /// request state alone.
    pub async fn fetch_articles(&self, tag: Option<&str>) -> Result<ArticleList, ExchangeError> {
        let tag = tag.map(str::trim).filter(|t| !t.is_empty());
        let res = self.bounded(self.backends.articles.list_articles(tag)).await;
        if let Err(e) = &res {
            log_failure(FLOW_ARTICLES, e);
        }
        res
    }

    pub async fn check_health(&self) -> Result<HealthStatus, ExchangeError> {
        self.bounded(self.backends.health.health()).await
    }

    pub fn set_input(&self, text: impl Into<String>) {
        *lock(&self.input) = text.into();
    }

    pub fn input(&self) -> String {
        lock(&self.input).clone()
    }

    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        lock(&self.transcript).entries().to_vec()
    }

    pub fn state(&self) -> RequestState {
        self.pending.state()
    }

    pub fn in_flight(&self) -> usize {
        self.pending.in_flight()
    }

    fn clear_input(&self) {
        lock(&self.input).clear();
    }

    // The view is told after the transcript lock is released; `notify_order`
    // keeps callbacks in transcript order across concurrent exchanges.
    fn append(&self, entry: TranscriptEntry) {
        let _order = lock(&self.notify_order);
        let appended = lock(&self.transcript).append(entry).clone();
        self.view.entry_appended(&appended);
    }

    fn fail(&self, flow: &str, message: &str, e: ExchangeError) -> ExchangeOutcome {
        log_failure(flow, &e);
        self.append(TranscriptEntry::system_error(message));
        ExchangeOutcome::Failed(e.kind())
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, ExchangeError>
    where
        F: Future<Output = Result<T, ExchangeError>>,
    {
        let limit = self.settings.request_timeout;
        match tokio::time::timeout(limit, fut).await {
            Ok(res) => res,
            Err(_) => Err(ExchangeError::Timeout(limit)),
        }
    }
}

fn log_failure(flow: &str, e: &ExchangeError) {
    log::warn!("{flow} exchange failed ({:?}): {e}", e.kind());
    if let ExchangeError::Status { body, .. } = e {
        if !body.is_empty() {
            log::debug!("{flow} error body: {body}");
        }
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}
