//! The precinct table and its column accessors.
//!
//! A dataset is one row per precinct, sorted by territory then precinct within
//! each region, with registration/ballot counts, optional cumulative turnout
//! readings (`turnout_<HH>h<MM>` columns), and one numeric column per
//! candidate. Row order is semantically meaningful and preserved everywhere.

mod filter;
mod read;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{ensure, Context, Result};
use polars::frame::DataFrame;
use polars::prelude::DataType;
use regex::Regex;

use crate::error::Error;

pub use filter::FilterSpec;

static TURNOUT_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^turnout_(\d{1,2})h(\d{2})$").expect("valid regex"));

/// One cumulative turnout reading: every precinct's turnout fraction sampled
/// at the same time of day.
#[derive(Debug, Clone)]
pub struct TurnoutSeries {
    /// Source column name, e.g. `turnout_10h00`.
    pub column: String,
    /// Clock label for display, e.g. `10:00`.
    pub label: String,
    /// Time of day in fractional hours, e.g. `10.0`.
    pub hours: f64,
    /// Per-precinct turnout fraction in `[0, 1]`, in table row order.
    pub values: Vec<f64>,
}

/// A precinct result table backed by a polars [`DataFrame`].
#[derive(Debug, Clone)]
pub struct ElectionTable {
    df: DataFrame,
}

impl ElectionTable {
    /// Loads a tab-separated table from `path`, gunzipping transparently.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self { df: read::read_table(path)? })
    }

    /// Parses a tab-separated table from raw bytes (plain or gzipped).
    pub fn from_tsv_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self { df: read::read_table_bytes(bytes)? })
    }

    /// Number of precinct rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.df.height()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.height() == 0
    }

    /// Whether the table carries a column of this name.
    #[inline]
    pub fn has_column(&self, name: &str) -> bool {
        self.df.column(name).is_ok()
    }

    /// Read-only view of the backing frame.
    #[inline]
    pub fn data_frame(&self) -> &DataFrame {
        &self.df
    }

    /// Returns a new table containing only the rows `spec` keeps, in the same
    /// relative order.
    pub fn filter(&self, spec: &FilterSpec) -> Result<Self> {
        Ok(Self { df: spec.apply(&self.df)? })
    }

    /// A named column as `f64`, nulls read as zero.
    pub fn numeric(&self, name: &str) -> Result<Vec<f64>> {
        numeric_column(&self.df, name)
    }

    /// A named column as strings, nulls read as empty.
    pub fn strings(&self, name: &str) -> Result<Vec<String>> {
        string_column(&self.df, name)
    }

    pub fn voters_registered(&self) -> Result<Vec<f64>> {
        self.numeric("voters_registered")
    }

    pub fn voters_voted(&self) -> Result<Vec<f64>> {
        self.numeric("voters_voted")
    }

    pub fn ballots_valid_invalid(&self) -> Result<Vec<f64>> {
        self.numeric("ballots_valid_invalid")
    }

    pub fn territory(&self) -> Result<Vec<String>> {
        self.strings("territory")
    }

    pub fn precinct(&self) -> Result<Vec<String>> {
        self.strings("precinct")
    }

    pub fn region_code(&self) -> Result<Vec<String>> {
        self.strings("region_code")
    }

    /// Maps each region code to its display name, in code order. Falls back to
    /// the code itself when the table has no `region_name` column.
    pub fn regions(&self) -> Result<BTreeMap<String, String>> {
        let codes = self.region_code()?;
        let names = if self.has_column("region_name") {
            self.strings("region_name")?
        } else {
            codes.clone()
        };

        let mut regions = BTreeMap::new();
        for (code, name) in codes.into_iter().zip(names) {
            regions.entry(code).or_insert(name);
        }
        Ok(regions)
    }

    /// Resolves candidate name fragments to vote columns and sums them into a
    /// single per-row leader score. A fragment matches any numeric column whose
    /// header contains it, case-insensitively; multiple matches are summed
    /// (coalition tickets).
    pub fn leader_score(&self, names: &[&str]) -> Result<Vec<f64>> {
        if names.is_empty() {
            return Err(Error::InvalidParameter(
                "at least one leader name is required".into(),
            )
            .into());
        }
        let needles: Vec<String> = names.iter().map(|n| n.to_lowercase()).collect();

        let mut matched = Vec::new();
        for column in self.df.get_column_names() {
            let header = column.to_lowercase();
            if !needles.iter().any(|needle| header.contains(needle.as_str())) {
                continue;
            }
            if self.df.column(column)?.dtype().is_primitive_numeric() {
                matched.push(column.to_string());
            }
        }
        ensure!(
            !matched.is_empty(),
            "[data] no numeric candidate column matches {:?}",
            names
        );

        let mut total = vec![0.0; self.height()];
        for name in &matched {
            for (slot, value) in total.iter_mut().zip(self.numeric(name)?) {
                *slot += value;
            }
        }
        Ok(total)
    }

    /// Names of the cumulative turnout columns, in time order.
    pub fn turnout_column_names(&self) -> Vec<String> {
        let mut columns: Vec<(f64, String)> = self
            .df
            .get_column_names()
            .iter()
            .filter_map(|name| turnout_time(name).map(|(_, hours)| (hours, name.to_string())))
            .collect();
        columns.sort_by(|a, b| a.0.total_cmp(&b.0));
        columns.into_iter().map(|(_, name)| name).collect()
    }

    /// All cumulative turnout readings, in time order.
    pub fn turnout_series(&self) -> Result<Vec<TurnoutSeries>> {
        self.turnout_column_names()
            .into_iter()
            .map(|column| {
                let (label, hours) = turnout_time(&column)
                    .with_context(|| format!("[data] malformed turnout column {column:?}"))?;
                let values = self.numeric(&column)?;
                Ok(TurnoutSeries { column, label, hours, values })
            })
            .collect()
    }

    /// Final turnout fraction, `voters_voted / voters_registered` per row.
    /// Rows with zero registered voters read as zero.
    pub fn final_turnout(&self) -> Result<Vec<f64>> {
        let registered = self.voters_registered()?;
        let voted = self.voters_voted()?;
        Ok(voted
            .into_iter()
            .zip(registered)
            .map(|(voted, registered)| if registered > 0.0 { voted / registered } else { 0.0 })
            .collect())
    }
}

/// Parses a `turnout_<HH>h<MM>` column name into a clock label and fractional
/// hours, e.g. `turnout_10h30` -> `("10:30", 10.5)`.
pub(crate) fn turnout_time(name: &str) -> Option<(String, f64)> {
    let caps = TURNOUT_COLUMN.captures(name)?;
    let hours: u32 = caps[1].parse().ok()?;
    let minutes: u32 = caps[2].parse().ok()?;
    Some((
        format!("{hours}:{minutes:02}"),
        f64::from(hours) + f64::from(minutes) / 60.0,
    ))
}

pub(crate) fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let values = df
        .column(name)
        .with_context(|| format!("[data] missing column {name:?}"))?
        .cast(&DataType::Float64)
        .with_context(|| format!("[data] column {name:?} is not numeric"))?;
    Ok(values
        .f64()?
        .into_iter()
        .map(|value| value.unwrap_or(0.0))
        .collect())
}

pub(crate) fn string_column(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let values = df
        .column(name)
        .with_context(|| format!("[data] missing column {name:?}"))?
        .cast(&DataType::String)
        .with_context(|| format!("[data] column {name:?} is not castable to string"))?;
    Ok(values
        .str()?
        .into_iter()
        .map(|value| value.unwrap_or_default().to_string())
        .collect())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{turnout_time, ElectionTable};

    /// Small in-memory dataset shared by the data/hist test modules.
    pub(crate) const SAMPLE_TSV: &str = "\
region_code\tregion_name\tterritory\tprecinct\tforeign\tvoters_registered\tvoters_voted\tballots_valid_invalid\tturnout_10h00\tturnout_15h00\tAlice Ivanova\tBob Petrov
R1\tNorth\tT1\tp1\t0\t100\t50\t50\t0.10\t0.30\t25\t20
R1\tNorth\tT1\tp2\t0\t200\t100\t100\t0.20\t0.40\t50\t40
R1\tNorth\tT2\tp3\t0\t400\t200\t200\t0.25\t0.50\t100\t80
R2\tSouth\tT3\tp4\t0\t800\t400\t400\t0.30\t0.45\t200\t160
R2\tSouth\tT3\tp5\t1\t50\t25\t25\t0.50\t0.60\t10\t5
";

    pub(crate) fn sample_table() -> ElectionTable {
        ElectionTable::from_tsv_bytes(SAMPLE_TSV.as_bytes()).unwrap()
    }

    #[test]
    fn loads_tsv_and_exposes_columns() {
        let table = sample_table();
        assert_eq!(table.height(), 5);
        assert_eq!(table.voters_registered().unwrap(), vec![100.0, 200.0, 400.0, 800.0, 50.0]);
        assert_eq!(table.territory().unwrap(), vec!["T1", "T1", "T2", "T3", "T3"]);
    }

    #[test]
    fn regions_maps_codes_to_names() {
        let regions = sample_table().regions().unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions["R1"], "North");
        assert_eq!(regions["R2"], "South");
    }

    #[test]
    fn leader_score_sums_matching_columns() {
        let table = sample_table();
        // One fragment, one column.
        assert_eq!(table.leader_score(&["alice"]).unwrap()[0], 25.0);
        // Two fragments sum across columns (coalition).
        let coalition = table.leader_score(&["Alice", "Bob"]).unwrap();
        assert_eq!(coalition, vec![45.0, 90.0, 180.0, 360.0, 15.0]);
    }

    #[test]
    fn leader_score_rejects_empty_and_unknown_names() {
        let table = sample_table();
        assert!(table.leader_score(&[]).is_err());
        assert!(table.leader_score(&["nobody"]).is_err());
    }

    #[test]
    fn turnout_columns_parse_and_sort_by_time() {
        let table = sample_table();
        assert_eq!(table.turnout_column_names(), vec!["turnout_10h00", "turnout_15h00"]);

        let series = table.turnout_series().unwrap();
        assert_eq!(series[0].label, "10:00");
        assert_eq!(series[1].hours, 15.0);
        assert_eq!(series[0].values[2], 0.25);
    }

    #[test]
    fn turnout_time_parsing() {
        assert_eq!(turnout_time("turnout_10h30"), Some(("10:30".into(), 10.5)));
        assert_eq!(turnout_time("turnout_9h00"), Some(("9:00".into(), 9.0)));
        assert_eq!(turnout_time("voters_voted"), None);
    }

    #[test]
    fn final_turnout_divides_voted_by_registered() {
        let turnout = sample_table().final_turnout().unwrap();
        assert_eq!(turnout, vec![0.5; 5]);
    }
}
