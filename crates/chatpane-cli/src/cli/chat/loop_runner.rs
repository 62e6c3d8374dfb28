//! Main chat loop orchestration.
//!
//! Coordinates the session lifecycle: health check, welcome banner, input
//! loop with slash commands, and one controller turn per message.

use std::path::Path;

use console::style;
use tracing::info;

use chatpane_core::controller::{SkipReason, TurnOutcome};
use chatpane_core::dictation::NoDictation;
use chatpane_types::error::DictationError;

use crate::state::{AppState, ConcreteController};

use super::banner::{print_quick_messages, print_welcome_banner};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::Echo;

/// Run the interactive chat loop against the configured server.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let controller = state.controller(Echo::BotOnly);
    let quick_messages = &state.config.quick_messages;

    print_welcome_banner(
        &state.config.base_url,
        &controller.session_id().short(),
        quick_messages,
    );

    controller.renderer().print_welcome();
    // A failed check renders its own notice; chatting stays possible.
    let _ = controller.check_health().await;
    println!();

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        match chat_input.read_event().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
            }
            InputEvent::Message(text) => {
                // An empty line submits whatever dictation left in the input.
                if !text.trim().is_empty() {
                    controller.set_input(text);
                }
                report_outcome(controller.submit().await);
            }
            InputEvent::Command(cmd) => match cmd {
                ChatCommand::Help => commands::print_help(),
                ChatCommand::Clear { confirmed } => {
                    if !confirmed && !confirm_clear(&mut chat_input).await {
                        println!("  {}\n", style("Conversation kept.").dim());
                        continue;
                    }
                    chat_input.clear();
                    let session = controller.clear_conversation();
                    println!(
                        "  {} New session {}",
                        style("*").cyan().bold(),
                        style(session.short()).dim()
                    );
                    controller.renderer().print_welcome();
                    println!();
                }
                ChatCommand::Quick(None) => {
                    if quick_messages.is_empty() {
                        println!("\n  {} No quick messages configured.\n", style("!").yellow().bold());
                    } else {
                        print_quick_messages(quick_messages);
                        println!();
                    }
                }
                ChatCommand::Quick(Some(n)) => match quick_messages.get(n - 1) {
                    Some(text) => report_outcome(controller.quick_message(text).await),
                    None => println!(
                        "\n  {} No quick message #{n} ({} configured).\n",
                        style("?").yellow().bold(),
                        quick_messages.len()
                    ),
                },
                ChatCommand::Voice => dictate(&controller).await,
                ChatCommand::Session => {
                    let session = controller.session_id();
                    println!();
                    println!("  {}  {}", style("Session:").bold(), session);
                    println!("  {}    {}", style("Short:").bold(), style(session.short()).dim());
                    println!();
                }
                ChatCommand::Stats => print_stats(&controller),
                ChatCommand::Save(path) => match save_transcript(&controller, &path).await {
                    Ok(()) => println!(
                        "\n  {} Transcript saved to {}\n",
                        style("*").cyan().bold(),
                        style(path.display()).dim()
                    ),
                    Err(e) => println!("\n  {} Failed to save transcript: {e}\n", style("!").red().bold()),
                },
                ChatCommand::Exit => {
                    println!("\n  {}", style("Session ended.").dim());
                    break;
                }
                ChatCommand::Unknown(name) => println!(
                    "\n  {} Unknown command: {}. Type /help for available commands.\n",
                    style("?").yellow().bold(),
                    style(name).dim()
                ),
            },
        }
    }

    info!(
        session_id = %controller.session_id(),
        turns = controller.completed_turns(),
        "Chat session ended"
    );
    Ok(())
}

async fn confirm_clear(chat_input: &mut ChatInput) -> bool {
    println!(
        "\n  {} Clear the whole conversation? {}",
        style("?").yellow().bold(),
        style("[y/N]").dim()
    );
    match chat_input.read_event().await {
        InputEvent::Message(answer) => commands::is_confirmation(&answer),
        InputEvent::Command(_) | InputEvent::Eof | InputEvent::Interrupted => false,
    }
}

fn report_outcome(outcome: TurnOutcome) {
    match outcome {
        TurnOutcome::Skipped(SkipReason::Busy) => {
            println!("  {}", style("Still waiting for the previous reply.").dim());
        }
        // Failures already rendered the fallback message.
        TurnOutcome::Skipped(SkipReason::Empty) | TurnOutcome::Replied(_) | TurnOutcome::Failed(_) => {}
    }
}

async fn dictate(controller: &ConcreteController) {
    match controller.dictate(&NoDictation).await {
        Ok(text) => println!(
            "\n  {} {}  {}\n",
            style("*").cyan().bold(),
            text,
            style("(press Enter to send)").dim()
        ),
        Err(DictationError::Unsupported) => println!(
            "\n  {} {}\n",
            style("!").yellow().bold(),
            controller.catalog().dictation_unsupported
        ),
        Err(e) => println!("\n  {} {e}\n", style("!").red().bold()),
    }
}

fn print_stats(controller: &ConcreteController) {
    let view = controller.renderer().view();
    println!();
    println!("  {}  {}", style("Session:").bold(), controller.session_id().short());
    println!("  {}    {}", style("Turns:").bold(), controller.completed_turns());
    println!("  {}  {}", style("Entries:").bold(), view.history().len());
    println!("  {}  {}", style("Scrolls:").bold(), view.scroll_requests());
    println!();
}

async fn save_transcript(controller: &ConcreteController, path: &Path) -> std::io::Result<()> {
    let html = controller.renderer().view().to_html();
    tokio::fs::write(path, format!("{html}\n")).await
}
