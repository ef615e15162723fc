use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TlsBackend {
    Rustls,
    NativeTls,
}

impl Default for TlsBackend {
    fn default() -> Self {
        Self::Rustls
    }
}

/// Client adapter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Application base URL, relative form URLs and the auth endpoints resolve against it
    #[serde(default = "default_app_url")]
    pub app_url: String,

    /// OAuth client identifier (required for sign-in)
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// Session exchange endpoint
    #[serde(default = "default_connect_path")]
    pub connect_path: String,

    /// Sign-out endpoint
    #[serde(default = "default_disconnect_path")]
    pub disconnect_path: String,

    /// Delay before navigating to the profile page after sign-in
    #[serde(default = "default_redirect_delay_ms")]
    pub redirect_delay_ms: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_tls_backend")]
    pub tls_backend: TlsBackend,

    /// HTTP proxy URL (optional)
    /// Supported formats: http://host:port, https://host:port, socks5://host:port
    #[serde(default)]
    pub proxy_url: Option<String>,

    /// Proxy authentication username (optional)
    #[serde(default)]
    pub proxy_username: Option<String>,

    /// Proxy authentication password (optional)
    #[serde(default)]
    pub proxy_password: Option<String>,
}

fn default_app_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_connect_path() -> String {
    "/gconnect".to_string()
}

fn default_disconnect_path() -> String {
    "/gdisconnect".to_string()
}

fn default_redirect_delay_ms() -> u64 {
    2000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_tls_backend() -> TlsBackend {
    TlsBackend::Rustls
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_url: default_app_url(),
            client_id: None,
            connect_path: default_connect_path(),
            disconnect_path: default_disconnect_path(),
            redirect_delay_ms: default_redirect_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            tls_backend: default_tls_backend(),
            proxy_url: None,
            proxy_username: None,
            proxy_password: None,
        }
    }
}

impl Config {
    /// Get default config file path
    pub fn default_config_path() -> &'static str {
        "config.json"
    }

    /// Delay before the post-sign-in navigation
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            // Config file doesn't exist, return default config
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.app_url, "http://localhost:5000");
        assert_eq!(config.connect_path, "/gconnect");
        assert_eq!(config.disconnect_path, "/gdisconnect");
        assert_eq!(config.redirect_delay(), Duration::from_secs(2));
        assert!(config.client_id.is_none());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{
            "appUrl": "https://club.example.org",
            "clientId": "abc.apps.example.com",
            "tlsBackend": "native-tls"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.app_url, "https://club.example.org");
        assert_eq!(config.client_id.as_deref(), Some("abc.apps.example.com"));
        assert_eq!(config.tls_backend, TlsBackend::NativeTls);
        assert_eq!(config.redirect_delay_ms, 2000);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let path = std::env::temp_dir().join(format!("bgclub-missing-{}.json", std::process::id()));
        let config = Config::load(&path).unwrap();
        assert_eq!(config.app_url, "http://localhost:5000");
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("bgclub-config-{}.json", std::process::id()));
        fs::write(&path, r#"{"clientId": "abc", "redirectDelayMs": 10}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.client_id.as_deref(), Some("abc"));
        assert_eq!(config.redirect_delay(), Duration::from_millis(10));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_malformed_file_is_error() {
        let path = std::env::temp_dir().join(format!("bgclub-bad-config-{}.json", std::process::id()));
        fs::write(&path, "{not json").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
        let _ = fs::remove_file(&path);
    }
}
