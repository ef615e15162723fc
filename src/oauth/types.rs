//! OAuth bridge wire types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result of an offline-access grant from the auth provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl AuthResult {
    /// One-time code, if present and non-empty
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref().filter(|c| !c.is_empty())
    }
}

/// Session exchange request body
#[derive(Debug, Clone, Serialize)]
pub struct ConnectRequest {
    #[serde(rename = "_csrf_token", skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
    pub auth_code: String,
}

/// Sign-out request body
#[derive(Debug, Clone, Serialize)]
pub struct DisconnectRequest {
    #[serde(rename = "_csrf_token", skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
}

/// User id as returned by the backend (number or string)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(id) => write!(f, "{}", id),
            UserId::Text(id) => write!(f, "{}", id),
        }
    }
}

/// Session exchange success body
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectResponse {
    /// Display name; the backend may leave it out
    #[serde(default)]
    pub username: String,
    pub user_id: UserId,
    #[serde(default)]
    pub new_user: bool,
}

impl ConnectResponse {
    /// Profile page to land on: the setup page for new accounts
    pub fn profile_path(&self) -> String {
        if self.new_user {
            format!("/users/{}/new", self.user_id)
        } else {
            format!("/users/{}", self.user_id)
        }
    }

    pub fn welcome_html(&self) -> String {
        format!(
            "Login successful! <br> Hello {}<br> Redirecting...",
            self.username
        )
    }
}

/// Error body of the auth endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "error-msg")]
    pub error_msg: String,
}

/// `error-msg` from an error body, if it parses
pub fn parse_error_msg(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|e| e.error_msg)
}

#[cfg(test)]
impl AuthResult {
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
        }
    }
}
