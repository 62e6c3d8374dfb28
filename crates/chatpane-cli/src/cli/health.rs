//! `chatpane health`: liveness check against the chat server.

use console::style;

use chatpane_core::backend::ChatBackend;
use chatpane_infra::http::HttpChatBackend;

use crate::state::AppState;

/// Check the server and fail (non-zero exit) when it is unreachable.
pub async fn check_health(state: &AppState, json: bool) -> anyhow::Result<()> {
    let backend = HttpChatBackend::from_config(&state.config);

    match backend.health().await {
        Ok(status) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!();
                println!(
                    "  {} {} is {}",
                    style("✓").green(),
                    style(backend.base_url()).cyan(),
                    style(&status.status).bold()
                );
                if let Some(version) = &status.version {
                    println!("  {}  {}", style("Version:").bold(), version);
                }
                println!(
                    "  {}  {}s per request",
                    style("Timeout:").bold(),
                    backend.timeout().as_secs()
                );
                println!();
            }
            Ok(())
        }
        Err(err) => {
            tracing::debug!(error = %err, "Health check failed");
            let catalog = state.catalog();
            if json {
                let body = serde_json::json!({
                    "status": "unreachable",
                    "error": err.to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                eprintln!();
                eprintln!(
                    "  {} {}",
                    style("✗").red(),
                    catalog.error_notice(&catalog.health_error)
                );
                eprintln!();
            }
            anyhow::bail!("chat server at {} is unreachable: {err}", backend.base_url())
        }
    }
}
