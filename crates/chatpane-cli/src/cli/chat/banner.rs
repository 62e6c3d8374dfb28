//! Welcome banner display for chat sessions.
//!
//! Prints a styled banner when a chat session starts, showing the server,
//! the session and the configured quick messages.

use console::style;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(base_url: &str, session_short: &str, quick_messages: &[String]) {
    println!();
    println!("  {} {}", style("\u{1f4ac}").bold(), style("chatpane").cyan().bold());
    println!();
    println!("  {}   {}", style("Server:").bold(), style(base_url).dim());
    println!("  {}  {}", style("Session:").bold(), style(session_short).dim());
    print_quick_messages(quick_messages);
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
}

/// List the quick messages with their `/quick` numbers.
pub fn print_quick_messages(quick_messages: &[String]) {
    if quick_messages.is_empty() {
        return;
    }
    println!();
    println!("  {}", style("Quick messages:").bold());
    for (i, text) in quick_messages.iter().enumerate() {
        println!("  {} {}", style(format!("/quick {}", i + 1)).cyan(), text);
    }
}
