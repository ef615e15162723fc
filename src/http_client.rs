//! HTTP Client builder module
//!
//! Builds the client used for every ajax call: timeout, TLS backend, optional
//! proxy, a cookie store for the backend session and the ajax marker header.

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Proxy};
use std::time::Duration;

use crate::model::config::{Config, TlsBackend};

/// Header the backend checks to tell ajax calls from plain form posts
pub const REQUESTED_WITH_HEADER: &str = "x-requested-with";
pub const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";

/// Proxy configuration
#[derive(Debug, Clone, Default)]
pub struct ProxyConfig {
    /// Proxy URL, supports http/https/socks5
    pub url: String,
    /// Proxy authentication username
    pub username: Option<String>,
    /// Proxy authentication password
    pub password: Option<String>,
}

impl ProxyConfig {
    /// Create proxy configuration from URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            password: None,
        }
    }

    /// Set authentication credentials
    pub fn with_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Proxy settings from the config, if a proxy URL is set
    pub fn from_config(config: &Config) -> Option<Self> {
        let url = config.proxy_url.as_deref()?;
        let mut proxy = Self::new(url);
        if let (Some(username), Some(password)) = (&config.proxy_username, &config.proxy_password) {
            proxy = proxy.with_auth(username, password);
        }
        Some(proxy)
    }
}

/// Build HTTP Client
///
/// Each client owns its cookie jar, so calls made through one client share a
/// backend session.
pub fn build_client(
    proxy: Option<&ProxyConfig>,
    timeout_secs: u64,
    tls_backend: TlsBackend,
) -> anyhow::Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(REQUESTED_WITH_HEADER, HeaderValue::from_static(REQUESTED_WITH_VALUE));

    let mut builder = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .cookie_store(true)
        .default_headers(headers);

    if tls_backend == TlsBackend::Rustls {
        builder = builder.use_rustls_tls();
    }

    if let Some(proxy_config) = proxy {
        let mut proxy = Proxy::all(&proxy_config.url)?;

        // Set proxy authentication
        if let (Some(username), Some(password)) = (&proxy_config.username, &proxy_config.password) {
            proxy = proxy.basic_auth(username, password);
        }

        builder = builder.proxy(proxy);
        tracing::debug!("HTTP Client using proxy: {}", proxy_config.url);
    }

    Ok(builder.build()?)
}

/// Build the client described by the config
pub fn build_client_from_config(config: &Config) -> anyhow::Result<Client> {
    let proxy = ProxyConfig::from_config(config);
    if let Some(proxy) = &proxy {
        tracing::info!("HTTP proxy configured: {}", proxy.url);
    }
    build_client(proxy.as_ref(), config.request_timeout_secs, config.tls_backend)
}
