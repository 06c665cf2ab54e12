//! CLI command definitions and dispatch for the `agentcast` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod agents;
pub mod artifacts;
pub mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Serve AI agents over HTTP and WebSocket.
#[derive(Parser)]
#[command(name = "agentcast", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config.toml (defaults to the data directory).
    #[arg(long, global = true, env = "AGENTCAST_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP and WebSocket server.
    Serve {
        /// Address to bind (overrides config).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config).
        #[arg(short, long)]
        port: Option<u16>,

        /// Export spans to stdout through OpenTelemetry.
        #[arg(long)]
        otel: bool,
    },

    /// List the agents that can be invoked.
    #[command(alias = "ls")]
    Agents,

    /// Run an agent once and print its answer.
    Run {
        /// Agent identifier (research, analyze, general, team).
        agent: String,

        /// The request to send.
        query: String,

        /// Conversation identity for history.
        #[arg(long)]
        session: Option<String>,
    },

    /// List stored artifacts.
    Artifacts,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
