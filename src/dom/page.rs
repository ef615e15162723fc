//! Live page shared by event handlers

use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use super::document::Document;
use super::window::Window;

/// Meta tag carrying the session CSRF token
pub const CSRF_META_NAME: &str = "_csrf_token";

/// Live page: the document every handler may read and mutate, the window it
/// lives in, and the teardown signal for scheduled continuations.
///
/// The document lock is never held across an `.await`.
#[derive(Clone)]
pub struct Page {
    document: Arc<Mutex<Document>>,
    window: Arc<dyn Window>,
    teardown: CancellationToken,
}

impl Page {
    pub fn new(document: Document, window: Arc<dyn Window>) -> Self {
        Self {
            document: Arc::new(Mutex::new(document)),
            window,
            teardown: CancellationToken::new(),
        }
    }

    /// Read the document
    pub fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        f(&self.document.lock())
    }

    /// Mutate the document
    pub fn update<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        f(&mut self.document.lock())
    }

    /// Copy of the current document
    pub fn snapshot(&self) -> Document {
        self.document.lock().clone()
    }

    pub fn window(&self) -> &Arc<dyn Window> {
        &self.window
    }

    /// Page-level CSRF token from the `_csrf_token` meta tag
    pub fn csrf_token(&self) -> Option<String> {
        self.read(|doc| doc.meta_content(CSRF_META_NAME).map(str::to_string))
    }

    /// Token cancelled when the page is torn down
    pub fn teardown_token(&self) -> CancellationToken {
        self.teardown.child_token()
    }

    /// Tear the page down, cancelling pending scheduled work
    pub fn teardown(&self) {
        tracing::debug!("Page torn down");
        self.teardown.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.teardown.is_cancelled()
    }
}
