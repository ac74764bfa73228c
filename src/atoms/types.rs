// ── Support Widget Atoms: Pure Data Types ───────────────────────────────────
// Wire payloads for the support server plus the render-side types the view
// layer consumes. Atoms layer rule: no I/O, no side effects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::constants::STATUS_PREFIX;

// ── Wire: /chat ────────────────────────────────────────────────────────────

/// Body of `POST /chat`. `session_id` is left out entirely until the server
/// has issued one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, session_id: Option<String>) -> Self {
        Self { message: message.into(), session_id }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub session_id: String,
    pub response: String,
    pub escalated: bool,
    #[serde(default)]
    pub escalation_reason: Option<String>,
    /// Retrieval confidence in `[0, 1]`; older servers omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl ChatReply {
    /// The status line this reply should produce.
    pub fn status(&self) -> Status {
        if self.escalated {
            let reason = self.escalation_reason.clone().filter(|r| !r.trim().is_empty());
            Status::Escalated { reason }
        } else {
            Status::Resolved
        }
    }
}

// ── Wire: /health, /ingest, /ingest-path ──────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
}

impl HealthReport {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRequest {
    pub documents: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestPathRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Reply of `/ingest` and `/ingest-path`. The server reports refusals with
/// a 200 and an `error` code instead of `ingested`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestReply {
    #[serde(default)]
    pub ingested: Option<usize>,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

// ── Render side ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BubbleRole {
    User,
    Bot,
}

impl BubbleRole {
    pub fn as_str(self) -> &'static str {
        match self {
            BubbleRole::User => "user",
            BubbleRole::Bot => "bot",
        }
    }
}

/// One rendered chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub role: BubbleRole,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Bubble {
    pub fn new(role: BubbleRole, text: impl Into<String>) -> Self {
        Self { role, text: text.into(), created_at: Utc::now() }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(BubbleRole::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(BubbleRole::Bot, text)
    }

    /// Style class, e.g. `bubble user`.
    pub fn class_name(&self) -> String {
        format!("bubble {}", self.role.as_str())
    }
}

/// What the status line currently reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Status {
    Sending,
    Resolved,
    Escalated { reason: Option<String> },
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Sending => write!(f, "{STATUS_PREFIX} sending..."),
            Status::Resolved => write!(f, "{STATUS_PREFIX} resolved"),
            Status::Escalated { reason: Some(reason) } => {
                write!(f, "{STATUS_PREFIX} escalated ({reason})")
            }
            Status::Escalated { reason: None } => write!(f, "{STATUS_PREFIX} escalated"),
            Status::Error => write!(f, "{STATUS_PREFIX} error"),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
