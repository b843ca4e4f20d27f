//! Ignition — startup-orchestration simulator CLI.
//!
//! # Usage
//!
//! ```text
//! ignition run --manifest <path> [--api-level <n>] [--state-dir <dir>] [--json]
//! ignition validate <manifest>
//! ignition caps [--api-level <n>] [--json]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{caps::CapsArgs, run::RunArgs, validate::ValidateArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "ignition",
    version,
    about = "Simulate and inspect application-startup orchestration",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate one process launch against a startup manifest.
    Run(RunArgs),

    /// Parse and validate a startup manifest.
    Validate(ValidateArgs),

    /// Show platform capability flags for an API level.
    Caps(CapsArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => args.run(),
        Commands::Validate(args) => args.run(),
        Commands::Caps(args) => args.run(),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
