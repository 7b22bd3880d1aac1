use anyhow::Result;
use serde::Serialize;

use super::{dataset_title, write_json};
use crate::cli::{Cli, TurnoutArgs};
use crate::{histogram2d, ElectionTable};

#[derive(Serialize)]
struct TurnoutOutput {
    title: String,
    weight_label: &'static str,
    bin_width: f64,
    centers: Vec<f64>,
    counts: Vec<f64>,
    scale_exponent: i32,
}

pub fn run(cli: &Cli, args: &TurnoutArgs) -> Result<()> {
    let table = ElectionTable::load(&args.data.data)?;
    if cli.verbose > 0 {
        eprintln!("[turnout] {} rows from {}", table.height(), args.data.data.display());
    }

    // The turnout curve is the row sums of the 2D histogram.
    let hist = histogram2d(&table, &args.data.leader_names(), &args.hist.options())?;
    let output = TurnoutOutput {
        title: dataset_title(&args.data.data),
        weight_label: hist.weight_label,
        bin_width: args.hist.bin_width,
        counts: hist.turnout_marginal().to_vec(),
        scale_exponent: hist.scale_exponent(),
        centers: hist.centers,
    };
    write_json(&args.output, &output)?;

    if cli.verbose > 0 {
        eprintln!("[turnout] -> {}", args.output.display());
    }
    Ok(())
}
