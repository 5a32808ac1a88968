use std::{io::Write, path::PathBuf};

use clap::Args;
use sift_analysis::events::{EventLog, Report, analyze};

use crate::settings::Settings;

use super::CommandResult;

#[derive(Debug, Args)]
pub struct EventsArgs {
    /// CSV log with one row per event.
    pub path: PathBuf,

    /// Overrides `events.top_cities`.
    #[arg(long)]
    pub top_cities: Option<usize>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &EventsArgs, settings: &Settings, out: &mut impl Write) -> CommandResult {
    let log = EventLog::load(&args.path)?;
    write_report(&log, args, settings, out)
}

fn write_report(
    log: &EventLog,
    args: &EventsArgs,
    settings: &Settings,
    out: &mut impl Write,
) -> CommandResult {
    let mut config = settings.events;
    if let Some(top_cities) = args.top_cities {
        config.top_cities = top_cities;
    }

    let report = Report::new(&analyze(log, &config)?);
    if args.json {
        writeln!(out, "{}", report.to_json()?)?;
    } else {
        write!(out, "{report}")?;
    }
    Ok(())
}
