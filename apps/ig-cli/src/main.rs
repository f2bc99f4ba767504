//! # ig-cli
//!
//! Command-line interface for Intent Gate.
//!
//! - `intent-gate pre` / `intent-gate post` — hook entry points; read one
//!   invocation context as JSON on stdin
//! - `intent-gate intents` — list intents in the registry
//! - `intent-gate trace tail` — show recent agent trace entries
//! - `intent-gate index` — print the intent map
//! - `intent-gate scope <intent> <path>` — explain a scope decision

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ig_hooks::GateConfig;
use tracing_subscriber::EnvFilter;

/// Intent Gate — intent-scoped policy hooks for coding agents.
#[derive(Parser)]
#[command(name = "intent-gate", version, about)]
struct Cli {
    /// Workspace root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide one tool call. Prints the decision JSON; exits 2 on denial.
    Pre,
    /// Record provenance for a tool call that already ran.
    Post,
    /// List intents declared in the registry.
    Intents,
    /// Inspect the agent trace.
    Trace {
        #[command(subcommand)]
        command: commands::trace::TraceCommands,
    },
    /// Print the intent map.
    Index,
    /// Check whether a path is inside an intent's scope.
    Scope {
        /// Intent id to check against.
        intent_id: String,
        /// Workspace-relative path.
        path: String,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so they don't interfere with hook JSON on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("ig_hooks=info".parse()?)
                .add_directive("ig_policy=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);
    let config = GateConfig::for_project(&project_root);

    match &cli.command {
        Commands::Pre => commands::hook::pre(&config),
        Commands::Post => commands::hook::post(&config),
        Commands::Intents => commands::intents::execute(&config),
        Commands::Trace { command } => commands::trace::execute(command, &config),
        Commands::Index => commands::index::execute(&config),
        Commands::Scope { intent_id, path } => commands::scope::execute(&config, intent_id, path),
    }
}
