// ── Support Widget Engine ──────────────────────────────────────────────────
// Side-effecting layer: config loading, HTTP transport, widget controller.

pub mod config;
pub mod http;
pub mod widget;
