//! Ajax client

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::http_client::build_client_from_config;
use crate::model::config::Config;

use super::error::AjaxError;

/// Successful (2xx) response
#[derive(Debug, Clone)]
pub struct AjaxResponse {
    pub status: u16,
    pub body: String,
}

impl AjaxResponse {
    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, AjaxError> {
        serde_json::from_str(&self.body).map_err(|e| AjaxError::Decode(e.to_string()))
    }
}

/// Client for JSON ajax calls against the application backend
pub struct AjaxClient {
    client: Client,
    base_url: Url,
}

impl AjaxClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = build_client_from_config(config)?;
        Self::with_client(client, &config.app_url)
    }

    pub fn with_client(client: Client, app_url: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(app_url)
            .map_err(|e| anyhow::anyhow!("Invalid appUrl {:?}: {}", app_url, e))?;
        Ok(Self { client, base_url })
    }

    /// Resolve a possibly relative URL against the application URL
    pub fn resolve(&self, url: &str) -> Result<Url, AjaxError> {
        self.base_url
            .join(url)
            .map_err(|e| AjaxError::InvalidUrl(format!("{:?}: {}", url, e)))
    }

    /// Send `payload` as a JSON string body
    ///
    /// The body is serialized up front and sent as-is with a JSON content
    /// type. Any non-2xx status is an error; status codes are not otherwise
    /// interpreted.
    pub async fn send_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        payload: &T,
    ) -> Result<AjaxResponse, AjaxError> {
        let target = self.resolve(url)?;
        let body = serde_json::to_string(payload).map_err(|e| AjaxError::Serialize(e.to_string()))?;

        tracing::debug!("{} {} ({} bytes)", method, target, body.len());

        let response = self
            .client
            .request(method.clone(), target.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| AjaxError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AjaxError::Transport(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!("{} {} failed with status {}", method, target, status);
            return Err(AjaxError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(AjaxResponse {
            status: status.as_u16(),
            body,
        })
    }
}
