use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("base url is empty")]
    EmptyBaseUrl,
    #[error("base url must start with http:// or https://: {0}")]
    UnsupportedScheme(String),
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointPaths {
    pub chat: String,
    pub generate_image: String,
    pub articles: String,
    pub instant_answer: String,
    pub health: String,
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self {
            chat: "/api/chat".into(),
            generate_image: "/api/generate_image".into(),
            articles: "/api/articles".into(),
            instant_answer: "/api/instant_answer".into(),
            health: "/health".into(),
        }
    }
}

/// Static user-facing text shown when an exchange fails, one per flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FailureMessages {
    pub chat: String,
    pub image: String,
    pub instant_answer: String,
}

impl Default for FailureMessages {
    fn default() -> Self {
        Self {
            chat: "Error connecting to server. Please try again.".into(),
            image: "Could not generate image. Try again.".into(),
            instant_answer: "Could not retrieve an answer. Please try again.".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub connect_ms: u64,
    pub request_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_ms: 10_000,
            request_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    #[serde(default)]
    pub endpoints: EndpointPaths,
    #[serde(default = "default_fallback_image_query")]
    pub fallback_image_query: String,
    #[serde(default = "default_image_alt_text")]
    pub image_alt_text: String,
    #[serde(default)]
    pub failure_messages: FailureMessages,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    #[serde(default)]
    pub quick_phrases: Vec<String>,
}

pub fn default_fallback_image_query() -> String {
    "medical diagram".into()
}

pub fn default_image_alt_text() -> String {
    "AI-generated diagram".into()
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            endpoints: EndpointPaths::default(),
            fallback_image_query: default_fallback_image_query(),
            image_alt_text: default_image_alt_text(),
            failure_messages: FailureMessages::default(),
            timeouts: TimeoutConfig::default(),
            quick_phrases: vec![],
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        let lower = base.to_ascii_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(ConfigError::UnsupportedScheme(base.to_string()));
        }
        if self.timeouts.request_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}
