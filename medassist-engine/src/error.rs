use std::time::Duration;
use thiserror::Error;

/// Coarse failure family used for logging and outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connect, DNS, transport or timeout.
    Network,
    /// Non-success status or a body we could not use.
    Server,
}

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    #[error("server returned status {status}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ExchangeError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ExchangeError::Network(_) | ExchangeError::Timeout(_) => FailureKind::Network,
            ExchangeError::Status { .. } | ExchangeError::Decode(_) => FailureKind::Server,
        }
    }
}
