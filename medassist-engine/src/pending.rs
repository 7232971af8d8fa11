use crate::traits::ConversationView;
use medassist_core::types::RequestState;
use std::sync::{Mutex, MutexGuard};

/// Counts requests in flight and derives [`RequestState`] from the count.
///
/// The state is `Pending` while any request is outstanding. Views hear about
/// the `Idle -> Pending` and `Pending -> Idle` edges only.
#[derive(Debug, Default)]
pub struct PendingTracker {
    in_flight: Mutex<usize>,
    // Held across count change and callback so edges reach the view in order.
    // The count itself is unlocked before the view runs.
    edges: Mutex<()>,
}

impl PendingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RequestState {
        if *self.lock() > 0 {
            RequestState::Pending
        } else {
            RequestState::Idle
        }
    }

    pub fn in_flight(&self) -> usize {
        *self.lock()
    }

    /// Marks one request as in flight until the returned guard is dropped.
    ///
    /// Dropping the guard is the only way out of `Pending`, so early returns,
    /// panics and cancelled futures all release it.
    pub fn begin<'a>(&'a self, view: &'a dyn ConversationView) -> PendingGuard<'a> {
        let _edge = lock(&self.edges);
        let now = {
            let mut n = self.lock();
            *n += 1;
            *n
        };
        if now == 1 {
            view.state_changed(RequestState::Pending);
        }
        PendingGuard {
            tracker: self,
            view,
        }
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        lock(&self.in_flight)
    }
}

// The counter stays consistent even if a view panicked mid-callback.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

#[must_use = "the request is only pending while the guard is alive"]
pub struct PendingGuard<'a> {
    tracker: &'a PendingTracker,
    view: &'a dyn ConversationView,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let _edge = lock(&self.tracker.edges);
        let now = {
            let mut n = self.tracker.lock();
            *n = n.saturating_sub(1);
            *n
        };
        if now == 0 {
            self.view.state_changed(RequestState::Idle);
        }
    }
}
