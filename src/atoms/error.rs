// ── Support Widget Atoms: Error Types ──────────────────────────────────────
// Single canonical error enum for the crate, built with `thiserror`.
//
// Design rules:
//   • Variants are coarse-grained by layer (I/O, wire, HTTP status, config).
//   • The `#[from]` attribute wires std/external error conversions automatically.
//   • The widget controller never shows these to the user; it renders one
//     generic failure bubble and logs the detail.

use thiserror::Error;

// ── Primary error enum ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum WidgetError {
    /// Filesystem or OS-level I/O failure (config file, ingest files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization / deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Transport failure or undecodable response (reqwest layer).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The server answered 2xx but refused the operation (e.g. `path_not_found`).
    #[error("Rejected by server: {0}")]
    Rejected(String),

    /// Widget configuration is invalid or unreadable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catch-all for errors that do not have a dedicated variant.
    #[error("{0}")]
    Other(String),
}

impl WidgetError {
    /// Create a status error for `url`.
    pub fn status(status: u16, url: impl Into<String>) -> Self {
        Self::Status { status, url: url.into() }
    }
}

impl From<toml::de::Error> for WidgetError {
    fn from(e: toml::de::Error) -> Self {
        WidgetError::Config(format!("TOML parse error: {e}"))
    }
}

// ── Convenience alias ──────────────────────────────────────────────────────

/// All fallible widget operations return this type.
pub type WidgetResult<T> = Result<T, WidgetError>;
