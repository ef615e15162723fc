//! Ajax transport
//!
//! Sends JSON payloads as pre-serialized request bodies and reduces every
//! outcome to success or `AjaxError`.

mod client;
mod error;

pub use client::AjaxClient;
pub use error::AjaxError;
