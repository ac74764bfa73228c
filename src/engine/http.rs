// Support Widget: HTTP Transport
//
// `ChatTransport` is the network seam of the widget controller: one call,
// one reply, no retry. `HttpTransport` implements it over reqwest against
// the support server and also exposes the server's maintenance endpoints
// (health check and document ingestion).

use crate::atoms::constants::{HEALTH_PATH, INGEST_DIR_PATH, INGEST_PATH, LOG_PREVIEW_CHARS};
use crate::atoms::error::{WidgetError, WidgetResult};
use crate::atoms::types::{
    ChatReply, ChatRequest, HealthReport, IngestPathRequest, IngestReply, IngestRequest,
};
use crate::engine::config::WidgetConfig;
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Client, Response};
use std::sync::Arc;
use std::time::Duration;

// ── Transport seam ─────────────────────────────────────────────────────────

#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send one chat message. Any non-2xx status is an error.
    async fn post_chat(&self, request: &ChatRequest) -> WidgetResult<ChatReply>;
}

#[async_trait]
impl<T: ChatTransport + ?Sized> ChatTransport for Arc<T> {
    async fn post_chat(&self, request: &ChatRequest) -> WidgetResult<ChatReply> {
        (**self).post_chat(request).await
    }
}

// ── reqwest implementation ─────────────────────────────────────────────────

pub struct HttpTransport {
    client: Client,
    config: WidgetConfig,
}

impl HttpTransport {
    pub fn new(config: WidgetConfig) -> WidgetResult<Self> {
        config.validate()?;
        let mut builder =
            Client::builder().connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// `GET /health`.
    pub async fn health(&self) -> WidgetResult<HealthReport> {
        let url = self.config.url_for(HEALTH_PATH);
        let resp = self.client.get(&url).send().await?;
        let report: HealthReport = ensure_success(resp, &url)?.json().await?;
        if !report.is_ok() {
            warn!("[http] Health check reported '{}'", report.status);
        }
        Ok(report)
    }

    /// `POST /ingest` with raw document bodies. Returns the ingested count.
    pub async fn ingest(&self, documents: Vec<String>) -> WidgetResult<usize> {
        let url = self.config.url_for(INGEST_PATH);
        let count = documents.len();
        let resp = self.client.post(&url).json(&IngestRequest { documents }).send().await?;
        let reply = ingest_outcome(ensure_success(resp, &url)?.json().await?)?;
        let ingested = reply.ingested.unwrap_or(count);
        info!("[http] Ingested {} document(s)", ingested);
        Ok(ingested)
    }

    /// `POST /ingest-path`. `None` lets the server use its default docs dir.
    pub async fn ingest_path(&self, path: Option<String>) -> WidgetResult<IngestReply> {
        let url = self.config.url_for(INGEST_DIR_PATH);
        let resp = self.client.post(&url).json(&IngestPathRequest { path }).send().await?;
        let reply = ingest_outcome(ensure_success(resp, &url)?.json().await?)?;
        info!(
            "[http] Ingested {} document(s) from {} file(s)",
            reply.ingested.unwrap_or(0),
            reply.files.len()
        );
        Ok(reply)
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn post_chat(&self, request: &ChatRequest) -> WidgetResult<ChatReply> {
        let url = self.config.chat_url();
        debug!(
            "[http] POST {} session={} message={}",
            url,
            request.session_id.as_deref().unwrap_or("-"),
            preview(&request.message)
        );
        let resp = self.client.post(&url).json(request).send().await?;
        let reply: ChatReply = ensure_success(resp, &url)?.json().await?;
        debug!("[http] Reply for session {} (escalated={})", reply.session_id, reply.escalated);
        Ok(reply)
    }
}

// ── Helpers ────────────────────────────────────────────────────────────────

fn ensure_success(resp: Response, url: &str) -> WidgetResult<Response> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(WidgetError::status(status.as_u16(), url))
    }
}

/// The server reports ingest refusals as `{"error": "<code>"}` with a 200.
fn ingest_outcome(reply: IngestReply) -> WidgetResult<IngestReply> {
    match reply.error {
        Some(code) => Err(WidgetError::Rejected(code)),
        None => Ok(reply),
    }
}

pub(crate) fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(LOG_PREVIEW_CHARS).collect();
    if text.chars().count() > LOG_PREVIEW_CHARS {
        out.push('…');
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_error_codes_are_rejections() {
        let reply =
            IngestReply { error: Some("path_outside_project".into()), ..Default::default() };
        match ingest_outcome(reply) {
            Err(WidgetError::Rejected(code)) => assert_eq!(code, "path_outside_project"),
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn ingest_success_passes_through() {
        let reply = IngestReply {
            ingested: Some(2),
            files: vec!["a.md".into(), "b.txt".into()],
            error: None,
        };
        let out = ingest_outcome(reply.clone()).unwrap();
        assert_eq!(out, reply);
    }

    #[test]
    fn invalid_config_refused() {
        let cfg = WidgetConfig { endpoint: "ftp://nope".into(), ..Default::default() };
        assert!(matches!(HttpTransport::new(cfg), Err(WidgetError::Config(_))));
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let long = "é".repeat(LOG_PREVIEW_CHARS + 5);
        let p = preview(&long);
        assert_eq!(p.chars().count(), LOG_PREVIEW_CHARS + 1);
        assert!(p.ends_with('…'));
        assert_eq!(preview("short"), "short");
    }
}
