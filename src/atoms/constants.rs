// ── Support Widget Atoms: Constants ────────────────────────────────────────
// Named constants shared by the controller, transport and config layers.

// ── User-facing text ──────────────────────────────────────────────────────
// Shown as a bot bubble whenever a submission fails, whatever the cause.
pub const ERROR_BUBBLE_TEXT: &str = "Something went wrong. Please try again.";

/// Prefix of every rendered status line.
pub const STATUS_PREFIX: &str = "Status:";

// ── Wire paths ────────────────────────────────────────────────────────────
pub const DEFAULT_CHAT_PATH: &str = "/chat";
pub const HEALTH_PATH: &str = "/health";
pub const INGEST_PATH: &str = "/ingest";
pub const INGEST_DIR_PATH: &str = "/ingest-path";

// ── Endpoint defaults ─────────────────────────────────────────────────────
// Matches the support server's own defaults (api_host / api_port).
pub const DEFAULT_API_HOST: &str = "127.0.0.1";
pub const DEFAULT_API_PORT: u16 = 8000;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

// ── Environment overrides ─────────────────────────────────────────────────
pub const ENV_ENDPOINT: &str = "CSB_ENDPOINT";
pub const ENV_API_HOST: &str = "CSB_API_HOST";
pub const ENV_API_PORT: &str = "CSB_API_PORT";

// ── Config file location ──────────────────────────────────────────────────
// Resolved under `dirs::config_dir()`.
pub const CONFIG_DIR_NAME: &str = "support-widget";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Max characters of a message echoed into debug logs.
pub(crate) const LOG_PREVIEW_CHARS: usize = 80;
