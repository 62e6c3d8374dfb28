//! Interactive terminal chat experience.
//!
//! This module implements the chat loop: one controller turn per line,
//! a thinking spinner while a request is in flight, styled rendering of the
//! widget markup, and slash commands. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
