// Support Widget: View Seam
//
// The controller never touches a screen directly. A `ChatView` owns the
// three regions a chat page has: the message log, the input box and the
// status line.

use crate::atoms::types::{Bubble, Status};
use parking_lot::Mutex;

pub trait ChatView: Send + Sync {
    /// Append a bubble to the message log.
    fn append_bubble(&self, bubble: &Bubble);

    /// Keep the newest bubble visible. Views that always show the tail can ignore this.
    fn scroll_to_bottom(&self) {}

    /// Empty the input box after its content was taken.
    fn clear_input(&self);

    fn set_status(&self, status: &Status);
}

impl<V: ChatView + ?Sized> ChatView for std::sync::Arc<V> {
    fn append_bubble(&self, bubble: &Bubble) {
        (**self).append_bubble(bubble)
    }
    fn scroll_to_bottom(&self) {
        (**self).scroll_to_bottom()
    }
    fn clear_input(&self) {
        (**self).clear_input()
    }
    fn set_status(&self, status: &Status) {
        (**self).set_status(status)
    }
}

// ── In-memory view ─────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Transcript {
    bubbles: Vec<Bubble>,
    status: Option<Status>,
    status_history: Vec<Status>,
    input_clears: usize,
    scrolls: usize,
}

/// Records everything rendered to it. Used for headless embedding and tests.
#[derive(Debug, Default)]
pub struct TranscriptView {
    inner: Mutex<Transcript>,
}

impl TranscriptView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bubbles(&self) -> Vec<Bubble> {
        self.inner.lock().bubbles.clone()
    }

    pub fn status(&self) -> Option<Status> {
        self.inner.lock().status.clone()
    }

    /// The status as shown on screen, e.g. `Status: resolved`.
    pub fn status_line(&self) -> Option<String> {
        self.inner.lock().status.as_ref().map(ToString::to_string)
    }

    /// Every status set so far, oldest first.
    pub fn status_history(&self) -> Vec<Status> {
        self.inner.lock().status_history.clone()
    }

    pub fn input_clears(&self) -> usize {
        self.inner.lock().input_clears
    }

    pub fn scrolls(&self) -> usize {
        self.inner.lock().scrolls
    }
}

impl ChatView for TranscriptView {
    fn append_bubble(&self, bubble: &Bubble) {
        self.inner.lock().bubbles.push(bubble.clone());
    }

    fn scroll_to_bottom(&self) {
        self.inner.lock().scrolls += 1;
    }

    fn clear_input(&self) {
        self.inner.lock().input_clears += 1;
    }

    fn set_status(&self, status: &Status) {
        let mut t = self.inner.lock();
        t.status = Some(status.clone());
        t.status_history.push(status.clone());
    }
}
