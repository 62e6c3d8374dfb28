//! Widget logic and port definitions for chatpane.
//!
//! This crate defines the ports ([`backend::ChatBackend`],
//! [`renderer::Renderer`], [`dictation::DictationProvider`]) that the
//! infrastructure and front-end layers implement. It depends only on
//! `chatpane-types`, never on `chatpane-infra` or any HTTP crate.

pub mod backend;
pub mod controller;
pub mod dictation;
pub mod markup;
pub mod renderer;
pub mod transcript;
