mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use chatpane_observe::tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let tracing_options = TracingOptions {
        json: cli.log_json,
        otel: cli.otel,
        ..TracingOptions::new(TracingOptions::filter_for_verbosity(cli.verbose, cli.quiet))
    };
    init_tracing(&tracing_options).map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "chatpane", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(&cli).await?;

    let result = match &cli.command {
        Commands::Chat => cli::chat::loop_runner::run_chat_loop(&state).await,
        Commands::Send { text } => cli::send::send_message(&state, text, cli.json).await,
        Commands::Health => cli::health::check_health(&state, cli.json).await,
        Commands::Format { text, all_runs } => {
            cli::format::format_message(&state, text, *all_runs, cli.json)
        }
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    shutdown_tracing();
    result
}
