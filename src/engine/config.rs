// Support Widget: Configuration
//
// TOML file (explicit path or `<config dir>/support-widget/config.toml`),
// then environment overrides, then validation. A missing default file is
// not an error: the widget runs against the local support server.

use crate::atoms::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_API_HOST, DEFAULT_API_PORT, DEFAULT_CHAT_PATH,
    DEFAULT_CONNECT_TIMEOUT_SECS, ENV_API_HOST, ENV_API_PORT, ENV_ENDPOINT,
};
use crate::atoms::error::{WidgetError, WidgetResult};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Base URL of the support server, e.g. `http://127.0.0.1:8000`.
    pub endpoint: String,
    /// Path of the chat endpoint, relative to `endpoint`.
    pub chat_path: String,
    pub connect_timeout_secs: u64,
    /// Whole-request timeout. `None` waits for the server indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        WidgetConfig {
            endpoint: format!("http://{}:{}", DEFAULT_API_HOST, DEFAULT_API_PORT),
            chat_path: DEFAULT_CHAT_PATH.into(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: None,
        }
    }
}

/// `<config dir>/support-widget/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

impl WidgetConfig {
    /// Parse a TOML document; absent keys keep their defaults.
    pub fn from_toml_str(content: &str) -> WidgetResult<Self> {
        Ok(toml::from_str::<WidgetConfig>(content)?)
    }

    /// Load from `path`, or from the default location when `path` is `None`.
    /// An explicit path must exist; the default one may be absent.
    pub fn load(path: Option<&Path>) -> WidgetResult<Self> {
        Self::load_with(path, default_config_path(), |key| std::env::var(key).ok())
    }

    fn load_with<F>(
        path: Option<&Path>,
        default_path: Option<PathBuf>,
        lookup: F,
    ) -> WidgetResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)
                    .map_err(|e| WidgetError::Config(format!("Read {}: {}", p.display(), e)))?;
                info!("[config] Loaded {}", p.display());
                Self::from_toml_str(&content)?
            }
            None => match default_path {
                Some(p) if p.exists() => {
                    let content = std::fs::read_to_string(&p)?;
                    info!("[config] Loaded {}", p.display());
                    Self::from_toml_str(&content)?
                }
                _ => {
                    debug!("[config] No config file, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Apply `CSB_ENDPOINT`, or else `CSB_API_HOST` / `CSB_API_PORT`.
    /// `lookup` is the environment (injected so tests need not touch the process env).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_ENDPOINT).filter(|v| !v.trim().is_empty()) {
            self.endpoint = endpoint.trim().to_string();
            return;
        }
        let host = lookup(ENV_API_HOST).filter(|v| !v.trim().is_empty());
        let port = lookup(ENV_API_PORT).filter(|v| !v.trim().is_empty());
        if host.is_none() && port.is_none() {
            return;
        }
        let host = host.unwrap_or_else(|| DEFAULT_API_HOST.to_string());
        let port = port.unwrap_or_else(|| DEFAULT_API_PORT.to_string());
        self.endpoint = format!("http://{}:{}", host.trim(), port.trim());
    }

    pub fn validate(&self) -> WidgetResult<()> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(WidgetError::Config(format!(
                "endpoint must start with http:// or https://, got '{}'",
                self.endpoint
            )));
        }
        if !self.chat_path.starts_with('/') {
            return Err(WidgetError::Config(format!(
                "chat_path must start with '/', got '{}'",
                self.chat_path
            )));
        }
        Ok(())
    }

    /// Join `path` onto the endpoint without doubling slashes.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    pub fn chat_url(&self) -> String {
        self.url_for(&self.chat_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_local_server() {
        let cfg = WidgetConfig::default();
        assert_eq!(cfg.chat_url(), "http://127.0.0.1:8000/chat");
        assert_eq!(cfg.request_timeout_secs, None);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg =
            WidgetConfig::from_toml_str("endpoint = \"https://support.example.com/\"").unwrap();
        assert_eq!(cfg.chat_url(), "https://support.example.com/chat");
        assert_eq!(cfg.connect_timeout_secs, DEFAULT_CONNECT_TIMEOUT_SECS);
    }

    #[test]
    fn full_toml() {
        let cfg = WidgetConfig::from_toml_str(
            "endpoint = \"http://10.0.0.5:9000\"\n\
             chat_path = \"/api/chat\"\n\
             connect_timeout_secs = 3\n\
             request_timeout_secs = 30\n",
        )
        .unwrap();
        assert_eq!(cfg.chat_url(), "http://10.0.0.5:9000/api/chat");
        assert_eq!(cfg.request_timeout_secs, Some(30));
    }

    #[test]
    fn endpoint_override_wins() {
        let mut cfg = WidgetConfig::default();
        cfg.apply_overrides(env(&[
            (ENV_ENDPOINT, "https://bot.example.com"),
            (ENV_API_PORT, "9999"),
        ]));
        assert_eq!(cfg.endpoint, "https://bot.example.com");
    }

    #[test]
    fn host_and_port_overrides() {
        let mut cfg = WidgetConfig::default();
        cfg.apply_overrides(env(&[(ENV_API_PORT, "8080")]));
        assert_eq!(cfg.endpoint, "http://127.0.0.1:8080");

        let mut cfg = WidgetConfig::default();
        cfg.apply_overrides(env(&[(ENV_API_HOST, "0.0.0.0"), (ENV_API_PORT, "81")]));
        assert_eq!(cfg.endpoint, "http://0.0.0.0:81");
    }

    #[test]
    fn empty_env_values_ignored() {
        let mut cfg = WidgetConfig::default();
        cfg.apply_overrides(env(&[(ENV_ENDPOINT, "  "), (ENV_API_HOST, "")]));
        assert_eq!(cfg, WidgetConfig::default());
    }

    #[test]
    fn validation_rejects_bad_values() {
        let cfg = WidgetConfig { endpoint: "localhost:8000".into(), ..Default::default() };
        assert!(matches!(cfg.validate(), Err(WidgetError::Config(_))));

        let cfg = WidgetConfig { chat_path: "chat".into(), ..Default::default() };
        assert!(matches!(cfg.validate(), Err(WidgetError::Config(_))));
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    /// A fresh file under the temp dir, removed when dropped.
    struct TempConfig(PathBuf);

    impl TempConfig {
        fn write(name: &str, content: &str) -> Self {
            let path = std::env::temp_dir()
                .join(format!("support-widget-{}-{}.toml", std::process::id(), name));
            std::fs::write(&path, content).unwrap();
            Self(path)
        }
    }

    impl Drop for TempConfig {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    #[test]
    fn explicit_file_is_loaded_then_overridden() {
        let file = TempConfig::write(
            "explicit",
            "endpoint = \"http://10.1.1.1:9000\"\nrequest_timeout_secs = 15\n",
        );
        let cfg = WidgetConfig::load_with(Some(&file.0), None, no_env).unwrap();
        assert_eq!(cfg.endpoint, "http://10.1.1.1:9000");
        assert_eq!(cfg.request_timeout_secs, Some(15));

        let cfg = WidgetConfig::load_with(Some(&file.0), None, env(&[(ENV_API_PORT, "7000")]))
            .unwrap();
        assert_eq!(cfg.endpoint, "http://127.0.0.1:7000");
        assert_eq!(cfg.request_timeout_secs, Some(15));
    }

    #[test]
    fn explicit_path_wins_over_default_path() {
        let explicit = TempConfig::write("wins-explicit", "endpoint = \"http://a.example\"");
        let default = TempConfig::write("wins-default", "endpoint = \"http://b.example\"");
        let cfg =
            WidgetConfig::load_with(Some(&explicit.0), Some(default.0.clone()), no_env).unwrap();
        assert_eq!(cfg.endpoint, "http://a.example");
    }

    #[test]
    fn default_path_is_used_when_present() {
        let file = TempConfig::write("default", "chat_path = \"/api/chat\"");
        let cfg = WidgetConfig::load_with(None, Some(file.0.clone()), no_env).unwrap();
        assert_eq!(cfg.chat_url(), "http://127.0.0.1:8000/api/chat");
    }

    #[test]
    fn absent_default_path_gives_defaults() {
        let missing = std::env::temp_dir().join("support-widget-no-default-here.toml");
        let cfg = WidgetConfig::load_with(None, Some(missing), no_env).unwrap();
        assert_eq!(cfg, WidgetConfig::default());
        let cfg = WidgetConfig::load_with(None, None, no_env).unwrap();
        assert_eq!(cfg, WidgetConfig::default());
    }

    #[test]
    fn loaded_file_is_validated() {
        let file = TempConfig::write("invalid", "endpoint = \"localhost:8000\"");
        let err = WidgetConfig::load_with(Some(&file.0), None, no_env).unwrap_err();
        assert!(matches!(err, WidgetError::Config(_)));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let missing = std::env::temp_dir().join("support-widget-does-not-exist.toml");
        assert!(WidgetConfig::load(Some(&missing)).is_err());
    }
}
