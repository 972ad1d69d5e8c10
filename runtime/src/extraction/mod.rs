//! Reading a conversation out of a rendered share page.
//!
//! Pure functions over a [`Page`](crate::page::Page): the conversation
//! turns, the sanitized title, and the page's source address.

pub mod conversation;
pub mod source;
pub mod title;

pub use conversation::extract;
pub use source::resolve_source;
pub use title::{derive_title, sanitize_title, DEFAULT_TITLE};
