use std::{
    fs::File,
    io::{BufReader, Write},
    path::PathBuf,
};

use clap::Args;
use serde::Serialize;
use sift_analysis::curve::{Curve, CurveScan, Sample, StationaryPoint, read_samples};

use super::CommandResult;

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// CSV file with a header row.
    pub path: PathBuf,

    /// Column holding the x values.
    #[arg(long, short)]
    pub x: String,

    /// Column holding the y values.
    #[arg(long, short)]
    pub y: String,

    /// Sort rows by x instead of requiring them in order.
    #[arg(long)]
    pub sort: bool,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Output {
    #[serde(flatten)]
    scan: CurveScan,
    stationary_points: Vec<StationaryPoint>,
}

pub fn run(args: &ScanArgs, out: &mut impl Write) -> CommandResult {
    let file = File::open(&args.path)?;
    let samples = read_samples(BufReader::new(file), &args.x, &args.y)?;
    tracing::info!(path = %args.path.display(), samples = samples.len(), "read samples");

    write_scan(samples, args.sort, args.json, out)
}

fn write_scan(samples: Vec<Sample>, sort: bool, json: bool, out: &mut impl Write) -> CommandResult {
    let curve = if sort {
        Curve::sorted(samples)?
    } else {
        Curve::new(samples)?
    };
    let output = Output {
        scan: curve.scan()?,
        stationary_points: curve.stationary_points(),
    };

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        return Ok(());
    }

    let CurveScan {
        max,
        min,
        crossings,
    } = &output.scan;
    writeln!(out, "max: x = {}, y = {} (row {})", max.x, max.y, max.index)?;
    writeln!(out, "min: x = {}, y = {} (row {})", min.x, min.y, min.index)?;
    if crossings.is_empty() {
        writeln!(out, "no zero crossings")?;
    }
    for crossing in crossings {
        writeln!(out, "zero crossing: x = {}", crossing.x)?;
    }
    for point in &output.stationary_points {
        writeln!(out, "{:?}: x = {}, y = {}", point.kind, point.x, point.y)?;
    }
    Ok(())
}
