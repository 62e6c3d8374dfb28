//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and mirror the widget's buttons: clear the
//! conversation, send a quick message, dictate, plus session inspection and
//! transcript export.

use std::path::PathBuf;

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the conversation and start a new session. `/clear!` skips the
    /// confirmation prompt.
    Clear { confirmed: bool },
    /// Send the n-th (1-based) quick message; list them when absent.
    Quick(Option<usize>),
    /// Fill the input from speech.
    Voice,
    /// Show the current session identifier.
    Session,
    /// Show turn and transcript counters.
    Stats,
    /// Write the transcript as HTML.
    Save(PathBuf),
    /// Exit the chat session.
    Exit,
    /// Unknown command or bad argument.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let arg = parts.get(1).map(|s| s.trim()).filter(|s| !s.is_empty());

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear { confirmed: false }),
        "/clear!" => Some(ChatCommand::Clear { confirmed: true }),
        "/quick" => match arg {
            None => Some(ChatCommand::Quick(None)),
            Some(n) => match n.parse::<usize>() {
                Ok(n) if n > 0 => Some(ChatCommand::Quick(Some(n))),
                _ => Some(ChatCommand::Unknown(format!("/quick expects a number, got '{n}'"))),
            },
        },
        "/voice" | "/mic" => Some(ChatCommand::Voice),
        "/session" => Some(ChatCommand::Session),
        "/stats" => Some(ChatCommand::Stats),
        "/save" => match arg {
            Some(path) => Some(ChatCommand::Save(PathBuf::from(path))),
            None => Some(ChatCommand::Unknown("/save requires a path".to_string())),
        },
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Whether an answer to a y/N prompt accepts it. Anything else declines.
pub fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Print the help text listing all available commands.
pub fn print_help() {
    let rows = [
        ("/help", "Show this help message"),
        ("/clear", "Clear the conversation and start a new session"),
        ("/clear!", "Clear without asking for confirmation"),
        ("/quick [n]", "Send quick message n, or list them"),
        ("/voice", "Dictate a message"),
        ("/session", "Show the session identifier"),
        ("/stats", "Show conversation counters"),
        ("/save <path>", "Save the transcript as HTML"),
        ("/exit", "End the chat session"),
    ];

    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    for (name, help) in rows {
        println!("  {:<14} {}", style(name).cyan(), help);
    }
    println!();
    println!(
        "  {}",
        style("Ctrl+D to exit, Ctrl+C safe (no message loss)").dim()
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_help() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/h"), Some(ChatCommand::Help));
        assert_eq!(parse("/?"), Some(ChatCommand::Help));
    }

    #[test]
    fn test_parse_exit() {
        assert_eq!(parse("/exit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/quit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/q"), Some(ChatCommand::Exit));
    }

    #[test]
    fn test_parse_clear() {
        assert_eq!(parse("/clear"), Some(ChatCommand::Clear { confirmed: false }));
        assert_eq!(parse("/CLS"), Some(ChatCommand::Clear { confirmed: false }));
        assert_eq!(parse("/clear!"), Some(ChatCommand::Clear { confirmed: true }));
    }

    #[test]
    fn test_confirmation_defaults_to_no() {
        assert!(is_confirmation("y"));
        assert!(is_confirmation(" YES "));
        assert!(!is_confirmation(""));
        assert!(!is_confirmation("n"));
        assert!(!is_confirmation("yep"));
    }

    #[test]
    fn test_parse_quick() {
        assert_eq!(parse("/quick"), Some(ChatCommand::Quick(None)));
        assert_eq!(parse("/quick 2"), Some(ChatCommand::Quick(Some(2))));
        assert!(matches!(parse("/quick 0"), Some(ChatCommand::Unknown(_))));
        assert!(matches!(parse("/quick two"), Some(ChatCommand::Unknown(_))));
    }

    #[test]
    fn test_parse_save() {
        assert_eq!(
            parse("/save  transcript.html "),
            Some(ChatCommand::Save(PathBuf::from("transcript.html")))
        );
        assert_eq!(
            parse("/save"),
            Some(ChatCommand::Unknown("/save requires a path".to_string()))
        );
    }

    #[test]
    fn test_parse_session_stats_voice() {
        assert_eq!(parse("/session"), Some(ChatCommand::Session));
        assert_eq!(parse("/stats"), Some(ChatCommand::Stats));
        assert_eq!(parse("/voice"), Some(ChatCommand::Voice));
    }

    #[test]
    fn test_parse_not_command() {
        assert_eq!(parse("hello world"), None);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse("/foo"),
            Some(ChatCommand::Unknown("/foo".to_string()))
        );
    }
}
