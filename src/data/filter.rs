//! Row predicates over a precinct table.

use anyhow::{Context, Result};
use polars::frame::DataFrame;
use polars::prelude::{BooleanChunked, NewChunkedArray};

use super::{numeric_column, string_column};

/// Which precinct rows to keep. Predicates compose with AND; the row order of
/// survivors is unchanged.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    ballots_valid_invalid_min: Option<f64>,
    voters_registered_min: Option<f64>,
    voted_le_registered: bool,
    exclude_foreign: bool,
    region_code: Option<String>,
}

impl FilterSpec {
    /// Keep rows with at least `min` valid+invalid ballots.
    pub fn with_ballots_valid_invalid_min(mut self, min: f64) -> Self {
        self.ballots_valid_invalid_min = Some(min);
        self
    }

    /// Keep rows with at least `min` registered voters.
    pub fn with_voters_registered_min(mut self, min: f64) -> Self {
        self.voters_registered_min = Some(min);
        self
    }

    /// Drop rows where more ballots were cast than voters registered.
    pub fn with_voted_le_registered(mut self) -> Self {
        self.voted_le_registered = true;
        self
    }

    /// Drop out-of-territory ("foreign") polling stations. A table without a
    /// `foreign` column has no such rows.
    pub fn with_exclude_foreign(mut self) -> Self {
        self.exclude_foreign = true;
        self
    }

    /// Keep only rows of one region.
    pub fn with_region_code(mut self, code: &str) -> Self {
        self.region_code = Some(code.to_string());
        self
    }

    /// The row filter every histogram applies before aggregating: non-empty
    /// ballot boxes, precincts of at least `min_size` registered voters, no
    /// over-100% turnout, no foreign stations.
    pub fn standard(min_size: u64) -> Self {
        Self::default()
            .with_ballots_valid_invalid_min(1.0)
            .with_voters_registered_min(min_size as f64)
            .with_voted_le_registered()
            .with_exclude_foreign()
    }

    pub(crate) fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut keep = vec![true; df.height()];

        if let Some(min) = self.ballots_valid_invalid_min {
            let ballots = numeric_column(df, "ballots_valid_invalid")?;
            for (keep, ballots) in keep.iter_mut().zip(&ballots) {
                *keep &= *ballots >= min;
            }
        }
        if let Some(min) = self.voters_registered_min {
            let registered = numeric_column(df, "voters_registered")?;
            for (keep, registered) in keep.iter_mut().zip(&registered) {
                *keep &= *registered >= min;
            }
        }
        if self.voted_le_registered {
            let voted = numeric_column(df, "voters_voted")?;
            let registered = numeric_column(df, "voters_registered")?;
            for ((keep, voted), registered) in keep.iter_mut().zip(&voted).zip(&registered) {
                *keep &= *voted <= *registered;
            }
        }
        if self.exclude_foreign && df.column("foreign").is_ok() {
            let foreign = numeric_column(df, "foreign")?;
            for (keep, foreign) in keep.iter_mut().zip(&foreign) {
                *keep &= *foreign == 0.0;
            }
        }
        if let Some(code) = &self.region_code {
            let codes = string_column(df, "region_code")?;
            for (keep, row_code) in keep.iter_mut().zip(&codes) {
                *keep &= row_code == code;
            }
        }

        let mask = BooleanChunked::from_slice("keep".into(), &keep);
        df.filter(&mask).context("[data::filter] Failed to apply row mask")
    }
}
