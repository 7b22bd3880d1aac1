use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::write_json;
use crate::cli::{Cli, TrajectoryArgs};
use crate::{ElectionTable, FilterSpec};

/// Poll opening and closing times bracket the sampled readings on the time
/// axis.
const POLLS_OPEN_HOURS: f64 = 8.0;
const POLLS_CLOSE_HOURS: f64 = 20.0;

#[derive(Serialize)]
struct TrajectoryOutput {
    region_code: String,
    region_name: String,
    /// Time grid in fractional hours: poll opening, each sampled reading,
    /// poll closing.
    times: Vec<f64>,
    /// Clock labels for the sampled readings, aligned with `times[1..n-1]`.
    labels: Vec<String>,
    /// One cumulative turnout series per precinct, percentages aligned with
    /// `times`: zero at opening, the sampled readings, final turnout at close.
    turnout: Vec<Vec<f64>>,
}

pub fn run(cli: &Cli, args: &TrajectoryArgs) -> Result<()> {
    let table = ElectionTable::load(&args.data)?;
    let regions = table.regions()?;
    std::fs::create_dir_all(&args.output).with_context(|| {
        format!("[trajectory] Failed to create output directory: {}", args.output.display())
    })?;

    for (code, name) in &regions {
        match write_region(&table, code, name, &args.output) {
            Ok(()) => {
                if cli.verbose > 0 {
                    eprintln!("[trajectory] {code}");
                }
            }
            Err(err) => eprintln!("[trajectory] {code} failed: {err:#}"),
        }
    }
    Ok(())
}

fn write_region(table: &ElectionTable, code: &str, name: &str, out_dir: &Path) -> Result<()> {
    let region = table.filter(&FilterSpec::default().with_region_code(code))?;
    let series = region.turnout_series()?;
    let final_turnout = region.final_turnout()?;

    let mut times = Vec::with_capacity(series.len() + 2);
    times.push(POLLS_OPEN_HOURS);
    times.extend(series.iter().map(|s| s.hours));
    times.push(POLLS_CLOSE_HOURS);

    let turnout = (0..region.height())
        .map(|row| {
            let mut path = Vec::with_capacity(series.len() + 2);
            path.push(0.0);
            path.extend(series.iter().map(|s| 100.0 * s.values[row]));
            path.push(100.0 * final_turnout[row]);
            path
        })
        .collect();

    let output = TrajectoryOutput {
        region_code: code.to_string(),
        region_name: name.to_string(),
        times,
        labels: series.iter().map(|s| s.label.clone()).collect(),
        turnout,
    };
    write_json(&out_dir.join(format!("{code}.json")), &output)
}
