use anyhow::Result;
use serde::Serialize;

use super::{dataset_title, write_json};
use crate::cli::{Cli, SquareArgs};
use crate::{histogram2d, ElectionTable};

#[derive(Serialize)]
struct SquareOutput {
    title: String,
    weight_label: &'static str,
    bin_width: f64,
    centers: Vec<f64>,
    /// Turnout-major counts matrix, `counts[i][j]` = weight at turnout bin `i`
    /// and leader-result bin `j`.
    counts: Vec<Vec<f64>>,
    turnout_marginal: Vec<f64>,
    result_marginal: Vec<f64>,
    scale_exponent: i32,
}

pub fn run(cli: &Cli, args: &SquareArgs) -> Result<()> {
    let table = ElectionTable::load(&args.data.data)?;
    if cli.verbose > 0 {
        eprintln!("[square] {} rows from {}", table.height(), args.data.data.display());
    }

    let hist = histogram2d(&table, &args.data.leader_names(), &args.hist.options())?;
    let output = SquareOutput {
        title: dataset_title(&args.data.data),
        weight_label: hist.weight_label,
        bin_width: args.hist.bin_width,
        turnout_marginal: hist.turnout_marginal().to_vec(),
        result_marginal: hist.result_marginal().to_vec(),
        scale_exponent: hist.scale_exponent(),
        counts: hist.counts.outer_iter().map(|row| row.to_vec()).collect(),
        centers: hist.centers,
    };
    write_json(&args.output, &output)?;

    if cli.verbose > 0 {
        eprintln!("[square] -> {}", args.output.display());
    }
    Ok(())
}
