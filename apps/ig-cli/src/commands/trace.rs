// trace.rs — Trace subcommands: tail.

use std::process::ExitCode;

use clap::Subcommand;
use ig_audit::TraceLog;
use ig_hooks::GateConfig;

#[derive(Subcommand)]
pub enum TraceCommands {
    /// Show recent trace entries.
    Tail {
        /// Number of entries to show.
        #[arg(short, default_value = "10")]
        n: usize,
        /// Print raw JSON lines instead of a summary.
        #[arg(long)]
        json: bool,
    },
}

pub fn execute(cmd: &TraceCommands, config: &GateConfig) -> anyhow::Result<ExitCode> {
    match cmd {
        TraceCommands::Tail { n, json } => {
            let log = TraceLog::new(config.layout.trace_log.clone());
            let entries = log.read_all()?;
            if entries.is_empty() {
                println!("No trace entries at {}", log.path().display());
                return Ok(ExitCode::SUCCESS);
            }

            let start = entries.len().saturating_sub(*n);
            for entry in &entries[start..] {
                if *json {
                    println!("{}", serde_json::to_string(entry)?);
                    continue;
                }
                let path = entry
                    .files
                    .first()
                    .map(|f| f.relative_path.as_str())
                    .unwrap_or("-");
                println!(
                    "{}  {:<10} {:<18} {}  {}",
                    entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    entry.intent_id,
                    format!("{:?}", entry.mutation_class),
                    path,
                    entry.content_hash().unwrap_or("-"),
                );
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
