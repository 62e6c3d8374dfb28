//! `chatpane send`: one turn, then print it.

use chatpane_core::controller::{SkipReason, TurnOutcome};

use crate::cli::chat::renderer::Echo;
use crate::state::AppState;

/// Send `text` as a single turn.
///
/// In styled mode the renderer prints both entries as they are appended.
/// With `--json` the turn is printed as one object instead.
pub async fn send_message(state: &AppState, text: &str, json: bool) -> anyhow::Result<()> {
    let echo = if json { Echo::Silent } else { Echo::All };
    let controller = state.controller(echo);
    let outcome = controller.send(text).await;

    if let TurnOutcome::Skipped(SkipReason::Empty) = outcome {
        anyhow::bail!("message is empty");
    }

    if json {
        let entries: Vec<serde_json::Value> = controller
            .renderer()
            .view()
            .history()
            .iter()
            .map(|e| {
                serde_json::json!({
                    "sender": e.sender,
                    "text": e.raw,
                    "markup": e.markup.as_str(),
                    "created_at": e.created_at,
                })
            })
            .collect();
        let body = serde_json::json!({
            "session_id": controller.session_id(),
            "ok": matches!(outcome, TurnOutcome::Replied(_)),
            "entries": entries,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!();
    }

    if let TurnOutcome::Failed(err) = outcome {
        anyhow::bail!("{err}");
    }
    Ok(())
}
