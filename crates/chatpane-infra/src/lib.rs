//! Infrastructure layer for chatpane.
//!
//! Implements the [`chatpane_core::backend::ChatBackend`] port over HTTP and
//! loads the widget configuration file.

pub mod config;
pub mod http;
