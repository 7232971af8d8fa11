use crate::traits::ConversationView;
use medassist_core::transcript::TranscriptEntry;
use medassist_core::types::RequestState;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Entry(TranscriptEntry),
    State(RequestState),
}

/// Records every callback in order. Handy for tests and headless embedding.
#[derive(Debug, Default)]
pub struct MemoryView {
    events: Mutex<Vec<ViewEvent>>,
}

impl MemoryView {
    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn states(&self) -> Vec<RequestState> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::State(s) => Some(s),
                ViewEvent::Entry(_) => None,
            })
            .collect()
    }

    fn push(&self, event: ViewEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}

impl ConversationView for MemoryView {
    fn entry_appended(&self, entry: &TranscriptEntry) {
        self.push(ViewEvent::Entry(entry.clone()));
    }

    fn state_changed(&self, state: RequestState) {
        self.push(ViewEvent::State(state));
    }
}
