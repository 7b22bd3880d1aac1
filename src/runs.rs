//! Run-length grouping of ordered category labels.
//!
//! Precinct tables are sorted by territory, so the territory column decomposes
//! into contiguous runs; each run's start offset becomes a tick position and
//! the cumulative lengths become separator positions on a precinct axis.

use std::fmt::Display;
use std::hash::Hash;

use ahash::AHashSet;

use crate::error::Error;

/// A maximal contiguous run of equal labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run<T> {
    /// Number of consecutive positions holding `value`.
    pub len: usize,
    /// Index of the first position of the run.
    pub start: usize,
    /// The label shared by every position of the run.
    pub value: T,
}

/// Groups `labels` into maximal contiguous runs, in input order.
///
/// The runs partition `0..labels.len()` exactly: lengths sum to the input
/// length and starts are the exclusive prefix sum of lengths. A label that
/// reappears in a non-adjacent run means the input was not sorted by the
/// grouping key; that is an [`Error::UnsortedInput`], not a recoverable
/// condition. Empty input yields an empty vec.
pub fn group<T>(labels: &[T]) -> Result<Vec<Run<T>>, Error>
where
    T: Eq + Hash + Clone + Display,
{
    let mut runs = Vec::new();
    if labels.is_empty() {
        return Ok(runs);
    }

    let mut seen = AHashSet::new();
    let mut start = 0;
    for next in 1..=labels.len() {
        if next < labels.len() && labels[next] == labels[start] {
            continue;
        }
        let value = labels[start].clone();
        if !seen.insert(value.clone()) {
            return Err(Error::UnsortedInput(value.to_string()));
        }
        runs.push(Run { len: next - start, start, value });
        start = next;
    }
    Ok(runs)
}

/// Inclusive cumulative-length sequence `[0, l0, l0+l1, .., n]` of a grouping.
/// Used for separator positions; every interior entry is also the start of the
/// following run.
pub fn boundaries<T>(runs: &[Run<T>]) -> Vec<usize> {
    let mut out = Vec::with_capacity(runs.len() + 1);
    let mut total = 0;
    out.push(total);
    for run in runs {
        total += run.len;
        out.push(total);
    }
    out
}
