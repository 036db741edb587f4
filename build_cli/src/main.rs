//! Command-line harness for evaluating saved character builds
//!
//! Run with: `build-calc <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Evaluate, ParseAffix, Tree};
use tracing_subscriber::EnvFilter;

/// Build calculator
#[derive(Parser)]
#[command(name = "build-calc")]
#[command(about = "Evaluate character builds offline", long_about = None)]
#[command(version)]
struct Cli {
    /// Log evaluation details to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Evaluate a saved build and print per-skill DPS and resistances
    Evaluate(Evaluate),

    /// Parse affix text and show the modifiers it produces
    ParseAffix(ParseAffix),

    /// Inspect talent tree layouts
    Tree(Tree),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Evaluate(cmd) => cmd.execute(),
        Command::ParseAffix(cmd) => cmd.execute(),
        Command::Tree(cmd) => cmd.execute(),
    }
}
