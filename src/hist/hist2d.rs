//! The turnout / leader-result 2D histogram.

use anyhow::Result;
use ndarray::{Array1, Array2, Axis};

use super::{noise_pair, BinGrid, HistogramOptions};
use crate::data::{ElectionTable, FilterSpec};
use crate::error::Error;

/// A `k x k` weighted 2D histogram: `counts[[i, j]]` sums the weights of rows
/// whose turnout falls in bin `i` and leader result in bin `j`. Counts are
/// raw (never pre-scaled) so callers can pick their own display divisor.
#[derive(Debug, Clone)]
pub struct Histogram2d {
    /// Display label of the summed quantity, fixed per weighting scheme.
    pub weight_label: &'static str,
    /// Shared bin midpoints of both axes.
    pub centers: Vec<f64>,
    /// Weighted counts, turnout-major.
    pub counts: Array2<f64>,
}

impl Histogram2d {
    /// Turnout distribution: row sums of the matrix.
    pub fn turnout_marginal(&self) -> Array1<f64> {
        self.counts.sum_axis(Axis(1))
    }

    /// Leader-result distribution: column sums of the matrix.
    pub fn result_marginal(&self) -> Array1<f64> {
        self.counts.sum_axis(Axis(0))
    }

    /// Power-of-ten exponent shared by both marginal curves, chosen from the
    /// smaller of the two peaks so both stay on a readable scale. Zero for an
    /// all-zero histogram.
    pub fn scale_exponent(&self) -> i32 {
        let turnout_peak = peak_value(&self.turnout_marginal());
        let result_peak = peak_value(&self.result_marginal());
        let low = turnout_peak.min(result_peak);
        if low <= 0.0 {
            return 0;
        }
        low.log10().ceil() as i32 - 1
    }
}

fn peak_value(marginal: &Array1<f64>) -> f64 {
    marginal.iter().copied().fold(0.0, f64::max)
}

/// Bins every surviving precinct by `(turnout %, leader result %)`.
///
/// Turnout is `100 * voters_voted / voters_registered`; the leader result is
/// `100 * leader_votes / ballots_valid_invalid`, where the leader column is
/// the sum of the candidate columns matching `leader_names`. Rows failing the
/// standard filter (empty ballot boxes, undersized precincts, over-100%
/// turnout, foreign stations) are excluded first, so the denominators are
/// never zero. With `opts.dither` on, seeded U(-0.5, 0.5) noise is added to
/// each numerator before forming the ratio, which spreads the integer-ratio
/// spikes small precincts produce without biasing the weighted sum.
///
/// An empty filtered table yields a zero matrix of full shape; that is a
/// legitimate, if uninteresting, outcome.
pub fn histogram2d(
    table: &ElectionTable,
    leader_names: &[&str],
    opts: &HistogramOptions,
) -> Result<Histogram2d> {
    let grid = BinGrid::new(opts.bin_width)?;
    if leader_names.is_empty() {
        return Err(Error::InvalidParameter("at least one leader name is required".into()).into());
    }

    let table = table.filter(&FilterSpec::standard(opts.min_size))?;
    let leader = table.leader_score(leader_names)?;
    let weights = opts.weights.vector(&table, Some(&leader))?;

    let registered = table.voters_registered()?;
    let voted = table.voters_voted()?;
    let ballots = table.ballots_valid_invalid()?;
    let (turnout_noise, result_noise) = noise_pair(table.height(), opts.dither, opts.seed);

    let mut counts = Array2::<f64>::zeros((grid.len(), grid.len()));
    for row in 0..table.height() {
        debug_assert!(
            registered[row] > 0.0 && ballots[row] > 0.0,
            "zero denominators must not survive filtering"
        );
        let turnout = 100.0 * (voted[row] + turnout_noise[row]) / registered[row];
        let result = 100.0 * (leader[row] + result_noise[row]) / ballots[row];
        if let (Some(i), Some(j)) = (grid.index_of(turnout), grid.index_of(result)) {
            counts[[i, j]] += weights[row];
        }
    }

    Ok(Histogram2d {
        weight_label: opts.weights.label(),
        centers: grid.centers(),
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::histogram2d;
    use crate::data::tests::sample_table;
    use crate::{ElectionTable, HistogramOptions, WeightScheme};

    fn uniform_table() -> ElectionTable {
        // Four identical precincts: 50% turnout, 50% leader result.
        let tsv = "\
region_code\tterritory\tprecinct\tvoters_registered\tvoters_voted\tballots_valid_invalid\tleader
R1\tT1\tp1\t100\t50\t50\t25
R1\tT1\tp2\t100\t50\t50\t25
R1\tT2\tp3\t100\t50\t50\t25
R1\tT2\tp4\t100\t50\t50\t25
";
        ElectionTable::from_tsv_bytes(tsv.as_bytes()).unwrap()
    }

    fn options(bin_width: f64) -> HistogramOptions {
        HistogramOptions { bin_width, ..HistogramOptions::default() }
    }

    #[test]
    fn identical_rows_fill_a_single_cell() {
        let hist = histogram2d(&uniform_table(), &["leader"], &options(10.0)).unwrap();
        assert_eq!(hist.counts.dim(), (10, 10));
        assert_eq!(hist.counts[[5, 5]], 400.0);
        assert_eq!(hist.counts.sum(), 400.0);
        assert_eq!(hist.weight_label, "voters registered");
    }

    #[test]
    fn mass_is_conserved_for_every_scheme() {
        let table = sample_table();
        for (scheme, expected) in [
            // Foreign row p5 is filtered out of all of these.
            (WeightScheme::RegisteredVoters, 1500.0),
            (WeightScheme::BallotsGiven, 750.0),
            (WeightScheme::LeaderVotes, 375.0),
            (WeightScheme::PollingStationCount, 4.0),
        ] {
            let opts = HistogramOptions { weights: scheme, ..options(1.0) };
            let hist = histogram2d(&table, &["alice"], &opts).unwrap();
            assert!(
                (hist.counts.sum() - expected).abs() < 1e-9,
                "{scheme:?}: {} != {expected}",
                hist.counts.sum()
            );
        }
    }

    #[test]
    fn marginals_are_row_and_column_sums() {
        let hist = histogram2d(&sample_table(), &["alice"], &options(10.0)).unwrap();
        let turnout = hist.turnout_marginal();
        let result = hist.result_marginal();
        assert!((turnout.sum() - hist.counts.sum()).abs() < 1e-9);
        assert!((result.sum() - hist.counts.sum()).abs() < 1e-9);
        // All sample rows sit at 50% turnout.
        assert_eq!(turnout[5], hist.counts.sum());
    }

    #[test]
    fn dither_is_reproducible_per_seed() {
        let table = sample_table();
        let dithered = HistogramOptions { dither: true, seed: 42, ..options(0.5) };

        let first = histogram2d(&table, &["alice"], &dithered).unwrap();
        let second = histogram2d(&table, &["alice"], &dithered).unwrap();
        assert_eq!(first.counts, second.counts);
    }

    #[test]
    fn dither_spreads_quantized_ratios() {
        // Tiny precincts produce values only at multiples of 100/registered;
        // with quarter-point bins the noise scatters them across many bins, so
        // a different seed lands the mass differently.
        let tsv = "\
region_code\tterritory\tprecinct\tvoters_registered\tvoters_voted\tballots_valid_invalid\tleader
R1\tT1\tp1\t3\t2\t3\t2
R1\tT1\tp2\t4\t3\t4\t1
R1\tT1\tp3\t5\t2\t5\t3
";
        let table = ElectionTable::from_tsv_bytes(tsv.as_bytes()).unwrap();
        let dithered = HistogramOptions { dither: true, seed: 1, ..options(0.25) };

        let first = histogram2d(&table, &["leader"], &dithered).unwrap();
        let reseeded = histogram2d(
            &table,
            &["leader"],
            &HistogramOptions { seed: 2, ..dithered },
        )
        .unwrap();
        assert_ne!(first.counts, reseeded.counts);
    }

    #[test]
    fn seed_is_inert_without_dither() {
        let table = sample_table();
        let a = histogram2d(&table, &["alice"], &HistogramOptions { seed: 1, ..options(0.5) });
        let b = histogram2d(&table, &["alice"], &HistogramOptions { seed: 999, ..options(0.5) });
        assert_eq!(a.unwrap().counts, b.unwrap().counts);
    }

    #[test]
    fn empty_filtered_table_yields_zero_matrix() {
        let opts = HistogramOptions { min_size: 1_000_000, ..options(10.0) };
        let hist = histogram2d(&sample_table(), &["alice"], &opts).unwrap();
        assert_eq!(hist.counts.dim(), (10, 10));
        assert_eq!(hist.counts.sum(), 0.0);
        assert_eq!(hist.scale_exponent(), 0);
    }

    #[test]
    fn empty_leader_names_fail_fast() {
        assert!(histogram2d(&sample_table(), &[], &options(10.0)).is_err());
    }

    #[test]
    fn invalid_bin_width_fails_fast() {
        assert!(histogram2d(&sample_table(), &["alice"], &options(0.0)).is_err());
    }

    #[test]
    fn scale_exponent_tracks_the_smaller_peak() {
        let hist = histogram2d(&uniform_table(), &["leader"], &options(10.0)).unwrap();
        // Both marginals peak at 400 -> ceil(log10(400)) - 1 = 2.
        assert_eq!(hist.scale_exponent(), 2);
    }
}
