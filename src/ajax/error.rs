//! Ajax call error types

use std::fmt;

/// Why an ajax call did not succeed
#[derive(Debug)]
pub enum AjaxError {
    /// Target URL could not be resolved against the application URL
    InvalidUrl(String),

    /// Payload could not be serialized
    Serialize(String),

    /// Network failure, timeout or connection refused
    Transport(String),

    /// Backend answered with a non-2xx status
    Status { status: u16, body: String },

    /// 2xx answer whose body is not what the caller expected
    Decode(String),
}

impl fmt::Display for AjaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AjaxError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            AjaxError::Serialize(msg) => write!(f, "Failed to serialize payload: {}", msg),
            AjaxError::Transport(msg) => write!(f, "Request failed: {}", msg),
            AjaxError::Status { status, body } => {
                write!(f, "Backend returned status {}: {}", status, body)
            }
            AjaxError::Decode(msg) => write!(f, "Failed to decode response: {}", msg),
        }
    }
}

impl std::error::Error for AjaxError {}

impl AjaxError {
    /// Response body, when the backend answered
    pub fn body(&self) -> Option<&str> {
        match self {
            AjaxError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}
