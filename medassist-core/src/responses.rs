use serde::{Deserialize, Serialize};

/// Result of the image-generation endpoint after normalisation.
///
/// Empty strings from the backend are folded into `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageGeneration {
    pub explanation: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstantAnswer {
    pub answer: String,
    #[serde(default)]
    pub source: String,
}

impl InstantAnswer {
    /// Text shown in the transcript: the answer, then the source line if any.
    pub fn display_text(&self) -> String {
        let source = self.source.trim();
        if source.is_empty() {
            self.answer.clone()
        } else {
            format!("{}\n\n{}", self.answer, source)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") || self.status.eq_ignore_ascii_case("ok")
    }
}
