//! CLI command definitions for the `chatpane` binary.
//!
//! Uses clap derive macros for argument parsing. Global flags select the
//! config file, the chat server and the output style; subcommands pick the
//! interaction mode.

pub mod chat;
pub mod format;
pub mod health;
pub mod send;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use chatpane_types::config::Locale;

/// Terminal front-end for a JSON chat endpoint.
#[derive(Parser)]
#[command(name = "chatpane", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config.toml (defaults to the platform config dir).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the chat server, overriding the config file.
    #[arg(long, global = true, env = "CHATPANE_URL")]
    pub url: Option<String>,

    /// Language of the built-in messages (ko, en).
    #[arg(long, global = true)]
    pub locale: Option<Locale>,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Export tracing spans via OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session.
    Chat,

    /// Send a single message and print the reply.
    Send {
        /// Message text.
        text: String,
    },

    /// Check whether the chat server is reachable.
    Health,

    /// Print the markup the widget would render for a message.
    Format {
        /// Raw message text (use \n for line breaks).
        text: String,

        /// Wrap every bullet run in its own list, not only the first.
        #[arg(long)]
        all_runs: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_send_with_global_flags() {
        let cli = Cli::try_parse_from([
            "chatpane", "send", "hello", "--url", "http://localhost:9000", "--locale", "en", "-vv",
        ])
        .unwrap();

        assert_eq!(cli.url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(cli.locale, Some(Locale::En));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Send { ref text } if text == "hello"));
    }

    #[test]
    fn test_parse_format_all_runs() {
        let cli = Cli::try_parse_from(["chatpane", "format", "--all-runs", "bullets"]).unwrap();
        assert!(matches!(cli.command, Commands::Format { all_runs: true, .. }));
    }

    #[test]
    fn test_rejects_unknown_locale() {
        assert!(Cli::try_parse_from(["chatpane", "--locale", "fr", "health"]).is_err());
    }

    #[test]
    fn test_command_definition_is_consistent() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }
}
