// Support Widget: Chat Controller
//
// One submission = one round trip:
//   1. trim the input; blank input is dropped without a trace
//   2. render the user bubble, clear the input, status "sending..."
//   3. POST {message, session_id?} through the transport
//   4. success: remember the session id, render the bot bubble and the
//      resolved / escalated status
//      failure: render the generic apology and status "error"; the session
//      id is left as it was
//
// No retry and no queueing: `submit` takes `&self`, so overlapping
// submissions each run their own round trip and the last reply to land
// decides the cached session id.

mod session;
mod view;

pub use session::SessionCache;
pub use view::{ChatView, TranscriptView};

use crate::atoms::constants::ERROR_BUBBLE_TEXT;
use crate::atoms::error::WidgetError;
use crate::atoms::types::{Bubble, ChatReply, ChatRequest, Status};
use crate::engine::http::{preview, ChatTransport};
use log::{debug, info, warn};

/// What happened to one submission.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Blank input; nothing was rendered or sent.
    Ignored,
    /// The server answered; the reply has been rendered.
    Answered(ChatReply),
    /// The round trip failed; the apology bubble has been rendered.
    Failed(WidgetError),
}

impl SubmitOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, SubmitOutcome::Ignored)
    }

    pub fn reply(&self) -> Option<&ChatReply> {
        match self {
            SubmitOutcome::Answered(reply) => Some(reply),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&WidgetError> {
        match self {
            SubmitOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

pub struct ChatWidget<T, V> {
    transport: T,
    view: V,
    session: SessionCache,
}

impl<T: ChatTransport, V: ChatView> ChatWidget<T, V> {
    pub fn new(transport: T, view: V) -> Self {
        Self { transport, view, session: SessionCache::new() }
    }

    /// Continue a conversation the server already knows about.
    pub fn with_session(transport: T, view: V, session_id: impl Into<String>) -> Self {
        Self { transport, view, session: SessionCache::resumed(session_id) }
    }

    pub fn session_id(&self) -> Option<String> {
        self.session.get()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Handle one form submission.
    pub async fn submit(&self, raw_input: &str) -> SubmitOutcome {
        let message = raw_input.trim();
        if message.is_empty() {
            return SubmitOutcome::Ignored;
        }

        self.add_bubble(Bubble::user(message));
        self.view.clear_input();
        self.send_message(message).await
    }

    async fn send_message(&self, message: &str) -> SubmitOutcome {
        self.view.set_status(&Status::Sending);
        let request = ChatRequest::new(message, self.session.get());
        debug!("[widget] Sending: {}", preview(message));

        match self.transport.post_chat(&request).await {
            Ok(reply) => {
                if self.session.set(reply.session_id.clone()) {
                    info!("[widget] Session {}", reply.session_id);
                }
                self.add_bubble(Bubble::bot(reply.response.clone()));
                let status = reply.status();
                if reply.escalated {
                    info!("[widget] Conversation escalated: {}", status);
                }
                self.view.set_status(&status);
                SubmitOutcome::Answered(reply)
            }
            Err(e) => {
                warn!("[widget] Chat request failed: {}", e);
                self.view.set_status(&Status::Error);
                self.add_bubble(Bubble::bot(ERROR_BUBBLE_TEXT));
                SubmitOutcome::Failed(e)
            }
        }
    }

    fn add_bubble(&self, bubble: Bubble) {
        self.view.append_bubble(&bubble);
        self.view.scroll_to_bottom();
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
