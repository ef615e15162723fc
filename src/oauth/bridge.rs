//! Sign-in / sign-out bridge
//!
//! Wires the sign-in and sign-out buttons to the backend: a one-time code from
//! the auth provider is exchanged for a session at the connect endpoint, and
//! sign-out posts to the disconnect endpoint.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use tokio::sync::OnceCell;

use crate::ajax::{AjaxClient, AjaxError};
use crate::dom::Page;
use crate::model::config::Config;

use super::client::{AuthClient, AuthLibrary};
use super::redirect::PendingRedirect;
use super::types::{
    AuthResult, ConnectRequest, ConnectResponse, DisconnectRequest, parse_error_msg,
};

pub const SIGNIN_BUTTON_ID: &str = "signinButton";
pub const SIGNOUT_BUTTON_ID: &str = "signoutButton";
pub const FLASH_MSG_ID: &str = "flash-msg";

pub const SIGN_IN_FAILED_ALERT: &str = "Unsuccessful sign-in";
pub const SIGN_OUT_FAILED_ALERT: &str = "Unsuccessful sign-out";

const HIDE_STYLE: &str = "display: none";

/// What a sign-in click led to
#[derive(Debug)]
pub enum SignInOutcome {
    /// Auth client unavailable or the provider refused the grant
    AuthFailed,
    /// Provider result carried no one-time code; nothing sent
    MissingCode,
    /// Backend rejected the exchange; alert shown
    Failed { error_msg: Option<String> },
    /// Session established; navigation to the profile page is pending
    SignedIn {
        username: String,
        redirect: PendingRedirect,
    },
}

/// What a sign-out click led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignOutOutcome {
    SignedOut,
    Failed { error_msg: Option<String> },
}

/// OAuth bridge for one page
pub struct OAuthBridge {
    client_id: Option<String>,
    connect_path: String,
    disconnect_path: String,
    redirect_delay: Duration,
    client: Arc<AjaxClient>,
    page: Page,
    library: Arc<dyn AuthLibrary>,
    auth: OnceCell<Arc<dyn AuthClient>>,
}

impl OAuthBridge {
    pub fn new(
        config: &Config,
        client: Arc<AjaxClient>,
        page: Page,
        library: Arc<dyn AuthLibrary>,
    ) -> Self {
        Self {
            client_id: config.client_id.clone(),
            connect_path: config.connect_path.clone(),
            disconnect_path: config.disconnect_path.clone(),
            redirect_delay: config.redirect_delay(),
            client,
            page,
            library,
            auth: OnceCell::new(),
        }
    }

    /// Initialize the auth client; later calls reuse the first client
    pub async fn init(&self) -> anyhow::Result<Arc<dyn AuthClient>> {
        let auth = self
            .auth
            .get_or_try_init(|| async {
                let client_id = self
                    .client_id
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("clientId not set in config file"))?;
                tracing::info!("Initializing auth client");
                self.library.init(client_id).await
            })
            .await?;
        Ok(auth.clone())
    }

    /// Handle a click on the sign-in button
    pub async fn sign_in(&self) -> SignInOutcome {
        let auth = match self.init().await {
            Ok(auth) => auth,
            Err(e) => {
                tracing::error!("Auth client unavailable: {:#}", e);
                return SignInOutcome::AuthFailed;
            }
        };

        match auth.grant_offline_access().await {
            Ok(result) => self.exchange_code(result).await,
            Err(e) => {
                tracing::warn!("Offline access not granted: {:#}", e);
                SignInOutcome::AuthFailed
            }
        }
    }

    /// Exchange the provider's one-time code for a backend session
    pub async fn exchange_code(&self, result: AuthResult) -> SignInOutcome {
        let Some(code) = result.code() else {
            tracing::warn!("One-time code missing in authResult");
            return SignInOutcome::MissingCode;
        };

        self.page.update(|doc| {
            if let Some(button) = doc.element_mut(SIGNIN_BUTTON_ID) {
                button.style = Some(HIDE_STYLE.to_string());
            }
        });

        tracing::info!("Sending one-time code to the server...");
        let request = ConnectRequest {
            csrf_token: self.page.csrf_token(),
            auth_code: code.to_string(),
        };
        let response = self
            .client
            .send_json(Method::POST, &self.connect_path, &request)
            .await
            .and_then(|r| r.json::<ConnectResponse>());

        match response {
            Ok(info) => {
                let welcome = info.welcome_html();
                self.page.update(|doc| {
                    if let Some(flash) = doc.element_mut(FLASH_MSG_ID) {
                        flash.html = welcome;
                    }
                });

                let target = info.profile_path();
                tracing::info!("Signed in as {}, redirecting to {}", info.username, target);
                let redirect = PendingRedirect::schedule(
                    self.page.window().clone(),
                    target,
                    self.redirect_delay,
                    self.page.teardown_token(),
                );
                SignInOutcome::SignedIn {
                    username: info.username,
                    redirect,
                }
            }
            Err(e) => {
                self.page.window().alert(SIGN_IN_FAILED_ALERT);
                let error_msg = log_error_msg("Sign-in", &e);
                SignInOutcome::Failed { error_msg }
            }
        }
    }

    /// Handle a click on the sign-out button
    pub async fn sign_out(&self) -> SignOutOutcome {
        let request = DisconnectRequest {
            csrf_token: self.page.csrf_token(),
        };

        match self
            .client
            .send_json(Method::POST, &self.disconnect_path, &request)
            .await
        {
            Ok(_) => {
                self.page.window().navigate("/");
                SignOutOutcome::SignedOut
            }
            Err(e) => {
                self.page.window().alert(SIGN_OUT_FAILED_ALERT);
                let error_msg = log_error_msg("Sign-out", &e);
                SignOutOutcome::Failed { error_msg }
            }
        }
    }
}

fn log_error_msg(operation: &str, err: &AjaxError) -> Option<String> {
    let error_msg = err.body().and_then(parse_error_msg);
    match &error_msg {
        Some(msg) => tracing::error!("{} failed: {}", operation, msg),
        None => tracing::error!("{} failed: {}", operation, err),
    }
    error_msg
}
