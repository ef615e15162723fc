//! Delayed navigation

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::dom::Window;

/// Navigation scheduled after a delay, dropped if the page is torn down first
pub struct PendingRedirect {
    target: String,
    handle: JoinHandle<bool>,
}

impl PendingRedirect {
    pub fn schedule(
        window: Arc<dyn Window>,
        target: String,
        delay: Duration,
        cancel: CancellationToken,
    ) -> Self {
        let href = target.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("Redirect to {} cancelled", href);
                    false
                }
                _ = tokio::time::sleep(delay) => {
                    window.navigate(&href);
                    true
                }
            }
        });
        Self { target, handle }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Wait for the redirect; true if the window navigated
    pub async fn wait(self) -> bool {
        self.handle.await.unwrap_or(false)
    }
}

impl std::fmt::Debug for PendingRedirect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingRedirect")
            .field("target", &self.target)
            .finish()
    }
}
