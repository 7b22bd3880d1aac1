//! Typed errors of the analysis core.
//!
//! I/O and table-shape failures stay on the `anyhow` path; these variants
//! cover the contract violations callers may want to match on.

/// Contract violations of the analysis core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Run-length grouping found a label in two non-adjacent runs, meaning the
    /// input was not pre-sorted by the grouping key. Never silently corrected:
    /// that would hide a data-ordering bug upstream.
    #[error("label {0:?} appears in non-adjacent runs; input is not grouped")]
    UnsortedInput(String),

    /// A parameter failed validation before any computation started.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
