//! Contact Chat - contact book with a simulated chat
//!
//! Stores name/number pairs in a JSON snapshot and keeps append-only text
//! logs of canned-response chats with those contacts.

pub mod chatlog;
pub mod config;
pub mod contacts;
pub mod error;
pub mod reply;
pub mod session;

pub use error::{Error, Result};
