//! Ajax form interception
//!
//! Turns submissions of `ajax-form` forms into DELETE and PATCH calls and
//! swaps the edit/delete forms in and out of view.

mod interceptor;
mod method;
mod payload;
mod toggle;

pub use interceptor::{FormInterceptor, SubmitOutcome};
pub use toggle::toggle_update;
