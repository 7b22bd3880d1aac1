use anyhow::Result;
use serde::Serialize;

use super::{dataset_title, write_json};
use crate::cli::{Cli, HistoryArgs};
use crate::{histogram1d, ElectionTable};

#[derive(Serialize)]
struct SeriesOutput {
    label: String,
    counts: Vec<f64>,
    peak_center: f64,
    peak_count: f64,
}

#[derive(Serialize)]
struct HistoryOutput {
    title: String,
    weight_label: &'static str,
    bin_width: f64,
    centers: Vec<f64>,
    series: Vec<SeriesOutput>,
}

pub fn run(cli: &Cli, args: &HistoryArgs) -> Result<()> {
    let table = ElectionTable::load(&args.data)?;
    let columns = table.turnout_column_names();
    if cli.verbose > 0 {
        eprintln!(
            "[history] {} rows, {} turnout readings from {}",
            table.height(),
            columns.len(),
            args.data.display()
        );
    }

    let hist = histogram1d(&table, &columns, &args.hist.options())?;
    let output = HistoryOutput {
        title: dataset_title(&args.data),
        weight_label: hist.weight_label,
        bin_width: args.hist.bin_width,
        centers: hist.centers,
        series: hist
            .series
            .into_iter()
            .map(|series| SeriesOutput {
                label: series.label,
                counts: series.counts.to_vec(),
                peak_center: series.peak_center,
                peak_count: series.peak_count,
            })
            .collect(),
    };
    write_json(&args.output, &output)?;

    if cli.verbose > 0 {
        eprintln!("[history] -> {}", args.output.display());
    }
    Ok(())
}
