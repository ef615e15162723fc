//! Auth provider seam
//!
//! The third-party auth library is loaded once per page and hands out a
//! client bound to the application's client id.

use std::sync::Arc;

use async_trait::async_trait;

use super::types::AuthResult;

/// Client bound to one client id
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Ask the user to grant offline access; yields a one-time code on success
    async fn grant_offline_access(&self) -> anyhow::Result<AuthResult>;
}

/// Auth library loader
#[async_trait]
pub trait AuthLibrary: Send + Sync {
    async fn init(&self, client_id: &str) -> anyhow::Result<Arc<dyn AuthClient>>;
}

/// Library whose grants always yield a fixed result
///
/// Used when the one-time code was obtained out of band, e.g. from the
/// provider's consent page in a real browser.
pub struct StaticAuthLibrary {
    result: AuthResult,
}

impl StaticAuthLibrary {
    pub fn new(result: AuthResult) -> Self {
        Self { result }
    }
}

#[async_trait]
impl AuthLibrary for StaticAuthLibrary {
    async fn init(&self, client_id: &str) -> anyhow::Result<Arc<dyn AuthClient>> {
        if client_id.trim().is_empty() {
            anyhow::bail!("Auth client id is empty");
        }
        Ok(Arc::new(StaticAuthClient {
            result: self.result.clone(),
        }))
    }
}

struct StaticAuthClient {
    result: AuthResult,
}

#[async_trait]
impl AuthClient for StaticAuthClient {
    async fn grant_offline_access(&self) -> anyhow::Result<AuthResult> {
        Ok(self.result.clone())
    }
}
