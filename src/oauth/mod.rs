//! OAuth Bridge
//!
//! Connects the page's sign-in and sign-out buttons to the backend session
//! endpoints:
//! - lazy auth client initialization bound to the configured client id
//! - one-time code exchange with a delayed redirect to the profile page
//! - sign-out

mod bridge;
mod client;
mod redirect;
mod types;

pub use bridge::{
    FLASH_MSG_ID, OAuthBridge, SIGNIN_BUTTON_ID, SIGNOUT_BUTTON_ID, SignInOutcome, SignOutOutcome,
};
pub use client::StaticAuthLibrary;
pub use types::AuthResult;
