mod ajax;
mod dom;
mod form;
mod http_client;
mod model;
mod oauth;
#[cfg(test)]
mod test_support;

use std::sync::Arc;

use ajax::AjaxClient;
use clap::Parser;
use dom::{Document, HeadlessWindow, Page, Window};
use form::{FormInterceptor, SubmitOutcome};
use model::arg::{Args, Command};
use model::config::Config;
use oauth::{AuthResult, OAuthBridge, SignInOutcome, SignOutOutcome, StaticAuthLibrary};

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config_path = args
        .config
        .unwrap_or_else(|| Config::default_config_path().to_string());
    let config = Config::load(&config_path).unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {:#}", e);
        std::process::exit(1);
    });
    tracing::debug!("Application URL: {}", config.app_url);

    if let Err(e) = run(args.command, config).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(command: Command, config: Config) -> anyhow::Result<()> {
    let client = Arc::new(AjaxClient::new(&config)?);

    match command {
        Command::Submit { page, form } => {
            let document = Document::load(&page)?;
            let index = document
                .find_form(&form)
                .ok_or_else(|| anyhow::anyhow!("Form not found: {}", form))?;
            let (live, window) = open_page(document, &config);

            match FormInterceptor::new(client, live.clone()).submit(index).await {
                SubmitOutcome::NotIntercepted => {
                    tracing::info!("Form {} is not an ajax form, left to native submission", form)
                }
                SubmitOutcome::UnknownMethod(raw) => {
                    tracing::warn!("Form {} has unsupported method {:?}", form, raw)
                }
                SubmitOutcome::Completed { method, redirect } => match redirect {
                    Some(href) => tracing::info!("{} succeeded, redirected to {}", method, href),
                    None => tracing::info!("{} succeeded", method),
                },
                SubmitOutcome::Failed { method, alert } => {
                    tracing::warn!("{} failed: {}", method, alert)
                }
            }
            report(&live, &window);
        }
        Command::Toggle { page, panel } => {
            let mut document = Document::load(&page)?;
            if !form::toggle_update(&mut document, panel) {
                anyhow::bail!("Panel not found: {}", panel);
            }
            document.save(&page)?;
            tracing::info!("Panel {} toggled", panel);
        }
        Command::Signin { page, code } => {
            let document = Document::load(&page)?;
            require_element(&document, oauth::SIGNIN_BUTTON_ID)?;
            let (live, window) = open_page(document, &config);
            let library = Arc::new(StaticAuthLibrary::new(AuthResult { code }));
            let bridge = OAuthBridge::new(&config, client, live.clone(), library);

            // Page load initializes the auth client
            bridge.init().await?;

            match bridge.sign_in().await {
                SignInOutcome::SignedIn { username, redirect } => {
                    let target = redirect.target().to_string();
                    tracing::info!("Signed in as {}, waiting to open {}", username, target);
                    let teardown = live.clone();
                    let watcher = tokio::spawn(async move {
                        if tokio::signal::ctrl_c().await.is_ok() {
                            teardown.teardown();
                        }
                    });
                    if !redirect.wait().await && live.is_torn_down() {
                        tracing::warn!("Page torn down, redirect to {} dropped", target);
                    }
                    watcher.abort();
                }
                SignInOutcome::AuthFailed => tracing::warn!("Sign-in not completed by the auth provider"),
                SignInOutcome::MissingCode => tracing::warn!("Sign-in skipped: no one-time code"),
                SignInOutcome::Failed { error_msg } => tracing::warn!(
                    "Sign-in rejected: {}",
                    error_msg.as_deref().unwrap_or("no error message")
                ),
            }

            live.snapshot().save(&page)?;
            report(&live, &window);
        }
        Command::Signout { page } => {
            let document = Document::load(&page)?;
            require_element(&document, oauth::SIGNOUT_BUTTON_ID)?;
            let (live, window) = open_page(document, &config);
            let library = Arc::new(StaticAuthLibrary::new(AuthResult::default()));
            let bridge = OAuthBridge::new(&config, client, live.clone(), library);

            match bridge.sign_out().await {
                SignOutOutcome::SignedOut => tracing::info!("Signed out"),
                SignOutOutcome::Failed { error_msg } => tracing::warn!(
                    "Sign-out rejected: {}",
                    error_msg.as_deref().unwrap_or("no error message")
                ),
            }
            report(&live, &window);
        }
    }

    Ok(())
}

/// Clicks need their target element on the page
fn require_element(document: &Document, id: &str) -> anyhow::Result<()> {
    if document.element(id).is_none() {
        anyhow::bail!("Page has no #{} element", id);
    }
    Ok(())
}

/// Put a loaded document into a headless window at its own location
fn open_page(document: Document, config: &Config) -> (Page, Arc<HeadlessWindow>) {
    let location = document
        .location
        .clone()
        .unwrap_or_else(|| config.app_url.clone());
    let window = Arc::new(HeadlessWindow::new(location));
    (Page::new(document, window.clone()), window)
}

fn report(page: &Page, window: &HeadlessWindow) {
    tracing::info!("Location: {}", window.location());
    for alert in window.alerts() {
        tracing::info!("Alert shown: {}", alert);
    }
    let flash = page.read(|doc| {
        doc.element(oauth::FLASH_MSG_ID)
            .map(|e| e.html.clone())
            .filter(|html| !html.is_empty())
    });
    if let Some(flash) = flash {
        tracing::info!("Flash message: {}", flash);
    }
}
