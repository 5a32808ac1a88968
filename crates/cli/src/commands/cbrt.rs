use std::io::Write;

use clap::Args;
use serde::Serialize;
use sift_core::Observer;
use sift_observers::{Recorder, Step, TraceObserver};
use sift_solvers::{
    cbrt,
    equation::newton::{Action, Config, Event, Solution},
};

use crate::settings::Settings;

use super::CommandResult;

#[derive(Debug, Args)]
pub struct CbrtArgs {
    /// Number to take the cube root of.
    #[arg(allow_negative_numbers = true)]
    pub n: f64,

    /// Overrides `newton.max_iters`.
    #[arg(long)]
    pub max_iters: Option<usize>,

    /// Overrides `newton.step_tol`.
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Print every Newton step before the result.
    #[arg(long)]
    pub steps: bool,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Output {
    n: f64,
    root: f64,
    residual: f64,
    converged: bool,
    iterations: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    steps: Vec<Step>,
}

pub fn run(args: &CbrtArgs, settings: &Settings, out: &mut impl Write) -> CommandResult {
    let config = config(args, &settings.newton)?;

    let mut recorder = Recorder::new();
    let mut trace = TraceObserver::new("cbrt");
    let solution: Solution<f64, f64> =
        cbrt::solve(args.n, &config, |event: &Event<'_, f64, f64>| -> Option<Action> {
            if args.steps {
                Observer::<_, Action>::observe(&mut recorder, event);
            }
            trace.observe(event)
        })?;

    if !solution.is_converged() {
        tracing::warn!(
            n = args.n,
            iters = solution.iters,
            status = ?solution.status,
            "returning best-effort estimate"
        );
    }

    let output = Output {
        n: args.n,
        root: solution.x,
        residual: solution.residual,
        converged: solution.is_converged(),
        iterations: solution.iters,
        steps: recorder.into_steps(),
    };

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        return Ok(());
    }
    for step in &output.steps {
        writeln!(
            out,
            "step {:>4}  x = {:<24}  residual = {:e}",
            step.iter, step.x, step.residual
        )?;
    }
    writeln!(out, "{}", output.root)?;
    Ok(())
}

/// Applies command-line overrides to the configured solver settings.
fn config(args: &CbrtArgs, base: &Config) -> Result<Config, Box<dyn std::error::Error>> {
    Ok(Config::new(
        args.max_iters.unwrap_or(base.max_iters()),
        args.tolerance.unwrap_or(base.step_tol()),
        base.residual_tol(),
    )?)
}
