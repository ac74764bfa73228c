// Support Widget
//
// Client-side controller for a customer-support chat: reads a message, posts
// it to the server's `/chat` endpoint with the cached session id, and renders
// the reply (or a generic failure) through a pluggable view.
//
// Layout:
//   atoms/   pure types, constants and the error enum
//   engine/  config loading, HTTP transport, widget controller

pub mod atoms;
pub mod engine;

pub use atoms::error::{WidgetError, WidgetResult};
pub use atoms::types::{Bubble, BubbleRole, ChatReply, ChatRequest, Status};
pub use engine::config::WidgetConfig;
pub use engine::http::{ChatTransport, HttpTransport};
pub use engine::widget::{ChatView, ChatWidget, SessionCache, SubmitOutcome, TranscriptView};
