//! Weighted histogram engine.
//!
//! Aggregates percentage-valued metrics of a precinct table into uniform bins,
//! weighted by one of four per-row schemes, with optional seeded dithering to
//! break integer-ratio quantization artifacts. Pure and stateless: every call
//! recomputes from an immutable snapshot of its inputs.

mod bins;
mod hist1d;
mod hist2d;
mod weights;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub use bins::BinGrid;
pub use hist1d::{histogram1d, Histogram1d, SeriesHistogram};
pub use hist2d::{histogram2d, Histogram2d};
pub use weights::WeightScheme;

/// Shared histogram parameters. Defaults match the settings used for the
/// published analyses: quarter-point bins, registered-voter weighting, no
/// size cutoff, no dithering.
#[derive(Debug, Clone)]
pub struct HistogramOptions {
    /// Bin width in percentage points.
    pub bin_width: f64,
    /// What each surviving row contributes to its bin.
    pub weights: WeightScheme,
    /// Minimum registered voters for a precinct to be counted.
    pub min_size: u64,
    /// Add U(-0.5, 0.5) noise to ratio numerators before binning.
    pub dither: bool,
    /// Seed of the dither noise; inert when `dither` is off.
    pub seed: u64,
}

impl Default for HistogramOptions {
    fn default() -> Self {
        Self {
            bin_width: 0.25,
            weights: WeightScheme::RegisteredVoters,
            min_size: 0,
            dither: false,
            seed: 1,
        }
    }
}

/// Two independent per-row noise vectors on `[-0.5, 0.5]`, fully determined by
/// `seed`. The first vector is drawn in its entirety before the second, so a
/// given seed always produces the same pair. All zeros when `dither` is off.
pub(crate) fn noise_pair(rows: usize, dither: bool, seed: u64) -> (Vec<f64>, Vec<f64>) {
    if !dither {
        return (vec![0.0; rows], vec![0.0; rows]);
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let first = (0..rows).map(|_| rng.random::<f64>() - 0.5).collect();
    let second = (0..rows).map(|_| rng.random::<f64>() - 0.5).collect();
    (first, second)
}

#[cfg(test)]
mod tests {
    use super::noise_pair;

    #[test]
    fn disabled_dither_is_all_zeros() {
        let (a, b) = noise_pair(4, false, 99);
        assert_eq!(a, vec![0.0; 4]);
        assert_eq!(b, vec![0.0; 4]);
    }

    #[test]
    fn same_seed_reproduces_noise() {
        let (a1, b1) = noise_pair(16, true, 7);
        let (a2, b2) = noise_pair(16, true, 7);
        assert_eq!(a1, a2);
        assert_eq!(b1, b2);
    }

    #[test]
    fn different_seeds_differ() {
        let (a1, _) = noise_pair(16, true, 7);
        let (a2, _) = noise_pair(16, true, 8);
        assert_ne!(a1, a2);
    }

    #[test]
    fn noise_is_centered_on_zero() {
        let (a, b) = noise_pair(64, true, 1);
        for value in a.iter().chain(&b) {
            assert!((-0.5..=0.5).contains(value));
        }
    }
}
