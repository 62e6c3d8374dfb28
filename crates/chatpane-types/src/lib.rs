//! Shared domain types for chatpane.
//!
//! Session identifiers, transcript roles, the JSON shapes of the chat
//! endpoint, widget configuration, and the error enums every layer speaks.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror, toml.

pub mod chat;
pub mod config;
pub mod error;
pub mod session;
