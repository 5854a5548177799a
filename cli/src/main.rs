use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod output;

use browse_memory_core::change_tracker::ChangeTracker;
use browse_memory_core::orchestrator::Orchestrator;
use browse_memory_core::procedural_memory::MemoryStore;
use commands::{handle_diff_command, handle_fetch_command, handle_skill_command};
use config::AppConfig;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "bmem")]
#[command(about = "Operator CLI for the adaptive browsing intelligence core")]
#[command(version, long_about = None)]
struct Cli {
    /// Configuration file path (TOML).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Human)]
    format: OutputFormat,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Procedural memory skill management.
    Skill {
        #[command(subcommand)]
        command: commands::SkillCommands,
    },
    /// Run the tiered fetch orchestrator against a simulated executor.
    Fetch(commands::FetchArgs),
    /// Diff two JSON documents with the field-level change tracker.
    Diff(commands::DiffArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let app_config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Skill { command } => {
            let mut store = MemoryStore::initialize(app_config.memory)?;
            handle_skill_command(command, &mut store, cli.format)
        }
        Commands::Fetch(args) => {
            let mut orchestrator = Orchestrator::initialize(app_config.orchestrator)?;
            handle_fetch_command(args, &mut orchestrator, cli.format).await
        }
        Commands::Diff(args) => {
            let mut tracker = ChangeTracker::initialize(app_config.change_tracker)?;
            handle_diff_command(args, &mut tracker, cli.format)
        }
    }
}
