//! Per-time 1D turnout histograms.

use anyhow::Result;
use ndarray::Array1;

use super::{BinGrid, HistogramOptions};
use crate::data::{turnout_time, ElectionTable, FilterSpec};

/// One binned metric column plus its peak, used by callers to place an inline
/// label at the curve's maximum.
#[derive(Debug, Clone)]
pub struct SeriesHistogram {
    /// Display label: the clock time for `turnout_*` columns, otherwise the
    /// column name itself.
    pub label: String,
    /// Weighted counts per bin.
    pub counts: Array1<f64>,
    /// Center of the tallest bin; ties go to the lowest-index bin.
    pub peak_center: f64,
    /// Count of the tallest bin.
    pub peak_count: f64,
}

/// A family of 1D histograms over a shared bin grid.
#[derive(Debug, Clone)]
pub struct Histogram1d {
    /// Display label of the weighting scheme's base quantity.
    pub weight_label: &'static str,
    /// Bin midpoints.
    pub centers: Vec<f64>,
    /// One histogram per requested metric column, in request order.
    pub series: Vec<SeriesHistogram>,
}

/// Bins each fractional metric column (typically the `turnout_<time>` family)
/// as a percentage of `[0, 100]`.
///
/// A row's contribution is its scheme weight multiplied by the metric
/// fraction, so with the default registered-voter scheme each bin sums the
/// ballots given by that time of day. The same standard row filter as the 2D
/// histogram applies. An empty filtered table produces all-zero series.
pub fn histogram1d(
    table: &ElectionTable,
    metric_columns: &[String],
    opts: &HistogramOptions,
) -> Result<Histogram1d> {
    let grid = BinGrid::new(opts.bin_width)?;
    let table = table.filter(&FilterSpec::standard(opts.min_size))?;
    let weights = opts.weights.vector(&table, None)?;
    let centers = grid.centers();

    let mut series = Vec::with_capacity(metric_columns.len());
    for column in metric_columns {
        let fractions = table.numeric(column)?;
        let mut counts = Array1::<f64>::zeros(grid.len());
        for row in 0..table.height() {
            let percent = 100.0 * fractions[row];
            if let Some(bin) = grid.index_of(percent) {
                counts[bin] += weights[row] * fractions[row];
            }
        }

        let (peak_bin, peak_count) = argmax(&counts);
        series.push(SeriesHistogram {
            label: turnout_time(column)
                .map(|(label, _)| label)
                .unwrap_or_else(|| column.clone()),
            counts,
            peak_center: centers[peak_bin],
            peak_count,
        });
    }

    Ok(Histogram1d { weight_label: opts.weights.label(), centers, series })
}

/// First-occurrence argmax; an all-zero series peaks at bin 0 with count 0.
fn argmax(counts: &Array1<f64>) -> (usize, f64) {
    let mut best = 0;
    let mut best_count = f64::NEG_INFINITY;
    for (bin, &count) in counts.iter().enumerate() {
        if count > best_count {
            best = bin;
            best_count = count;
        }
    }
    (best, best_count)
}
