use crate::types::{EntryId, ImageRef, Role};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub id: EntryId,
    pub role: Role,
    pub text: String,
    pub attachment: Option<ImageRef>,
    pub ts_unix_ms: i64,
}

impl TranscriptEntry {
    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            role,
            text: text.into(),
            attachment: None,
            ts_unix_ms: now_unix_ms(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    pub fn system_error(text: impl Into<String>) -> Self {
        Self::new(Role::SystemError, text)
    }

    pub fn with_attachment(mut self, image: ImageRef) -> Self {
        self.attachment = Some(image);
        self
    }
}

/// Ordered, append-only log of the exchange.
///
/// Entries are never edited, reordered or removed. A new conversation starts
/// from a new `Transcript`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: TranscriptEntry) -> &TranscriptEntry {
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }
}

pub fn now_unix_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
        .try_into()
        .unwrap_or(i64::MAX)
}
