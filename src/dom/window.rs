//! Browser window seam: location and blocking alerts

use parking_lot::Mutex;

/// Window side effects a handler may trigger
pub trait Window: Send + Sync {
    /// Current location
    fn location(&self) -> String;

    /// Navigate to `href`
    fn navigate(&self, href: &str);

    /// Show a blocking alert
    fn alert(&self, message: &str);
}

/// Window without a display: records navigation and alerts
pub struct HeadlessWindow {
    location: Mutex<String>,
    alerts: Mutex<Vec<String>>,
}

impl HeadlessWindow {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: Mutex::new(location.into()),
            alerts: Mutex::new(Vec::new()),
        }
    }

    /// Alerts shown so far, oldest first
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().clone()
    }
}

impl Window for HeadlessWindow {
    fn location(&self) -> String {
        self.location.lock().clone()
    }

    fn navigate(&self, href: &str) {
        tracing::info!("Navigating to {}", href);
        *self.location.lock() = href.to_string();
    }

    fn alert(&self, message: &str) {
        tracing::warn!("Alert: {}", message);
        self.alerts.lock().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_window_records() {
        let window = HeadlessWindow::new("/posts");
        assert_eq!(window.location(), "/posts");

        window.alert("Unsuccessful deletion");
        window.navigate("/club");

        assert_eq!(window.location(), "/club");
        assert_eq!(window.alerts(), vec!["Unsuccessful deletion".to_string()]);
    }
}
