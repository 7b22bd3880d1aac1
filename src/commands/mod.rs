//! CLI command implementations. Each command computes engine outputs and
//! writes them as JSON for an external chart renderer.

pub mod bubbles;
pub mod history;
pub mod square;
pub mod trajectory;
pub mod turnout;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Writes `value` as JSON to `path`.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("[commands] Failed to create output file: {}", path.display()))?;
    serde_json::to_writer(BufWriter::new(file), value)
        .with_context(|| format!("[commands] Failed to write JSON to {}", path.display()))
}

/// The dataset's file name, used as a chart title.
pub(crate) fn dataset_title(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
