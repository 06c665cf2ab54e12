//! agentcast CLI and HTTP/WebSocket entry point.
//!
//! Binary name: `agentcast`
//!
//! Parses CLI arguments, wires the agents and artifact store, then
//! dispatches to a command handler or starts the server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use agentcast_observe::{TracingOptions, init_tracing, shutdown_tracing};
use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Shell completions don't need tracing or app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "agentcast", &mut std::io::stdout());
        return Ok(());
    }

    let serving = matches!(cli.command, Commands::Serve { .. });
    let otel = matches!(cli.command, Commands::Serve { otel: true, .. });
    let options = TracingOptions::from_verbosity(cli.verbose, cli.quiet)
        .with_json(serving && cli.json)
        .with_otel(otel);
    init_tracing(&options).map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let state = AppState::init(cli.config).await?;

    match cli.command {
        Commands::Serve { host, port, .. } => {
            cli::serve::serve(state, host, port, cli.quiet || cli.json).await?;
        }
        Commands::Agents => {
            cli::agents::list_agents(&state, cli.json)?;
        }
        Commands::Run {
            agent,
            query,
            session,
        } => {
            cli::agents::run_agent(&state, &agent, query, session, cli.json).await?;
        }
        Commands::Artifacts => {
            cli::artifacts::list_artifacts(&state, cli.json).await?;
        }
        Commands::Completions { .. } => unreachable!("handled before state init"),
    }

    Ok(())
}
