//! The `sift` command-line tool.

mod commands;
mod settings;

use std::{io, path::PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CbrtArgs, EventsArgs, ScanArgs};
use settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "sift", version, about = "Root finding, curve scanning, and event statistics")]
struct Cli {
    /// TOML file with `[newton]` and `[events]` settings.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute a cube root with Newton's method.
    Cbrt(CbrtArgs),
    /// Find extrema and zero crossings of two CSV columns.
    Scan(ScanArgs),
    /// Summarize a CSV log of user events.
    Events(EventsArgs),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Cbrt(args) => commands::cbrt(&args, &settings, &mut out),
        Command::Scan(args) => commands::scan(&args, &mut out),
        Command::Events(args) => commands::events(&args, &settings, &mut out),
    }
}
