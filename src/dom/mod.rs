//! In-memory page model standing in for the browser DOM

pub mod document;
pub mod page;
mod window;

pub use document::{Document, Form, HIDDEN_CLASS};
pub use page::Page;
pub use window::{HeadlessWindow, Window};
