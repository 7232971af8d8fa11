use medassist_core::responses::HealthStatus;
use medassist_core::transcript::TranscriptEntry;
use medassist_core::types::{RequestState, Role};
use medassist_engine::traits::ConversationView;

pub const TYPING_INDICATOR: &str = "Assistant is typing...";

/// Prints transcript entries to stdout and the typing indicator to stderr.
#[derive(Debug, Default)]
pub struct TerminalView;

impl ConversationView for TerminalView {
    fn entry_appended(&self, entry: &TranscriptEntry) {
        // The REPL echoes what the user typed already.
        if entry.role == Role::User {
            return;
        }
        println!("{}", render_entry(entry));
    }

    fn state_changed(&self, state: RequestState) {
        if state.is_pending() {
            eprintln!("{TYPING_INDICATOR}");
        }
    }
}

pub fn render_entry(entry: &TranscriptEntry) -> String {
    let mut out = format!("{}> {}", entry.role.as_str(), entry.text);
    if let Some(image) = &entry.attachment {
        out.push_str(&format!("\n  [{}] {}", image.alt_text, image.url));
    }
    out
}

pub fn describe_health(health: &HealthStatus) -> String {
    let verdict = if health.is_healthy() { "up" } else { "degraded" };
    match health.version.as_deref() {
        Some(version) => format!("backend {verdict}: {} (version {version})", health.status),
        None => format!("backend {verdict}: {}", health.status),
    }
}
