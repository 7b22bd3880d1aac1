//! Reading precinct tables from disk.

use std::io::{Cursor, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use polars::frame::DataFrame;
use polars::io::SerReader;
use polars::prelude::CsvReadOptions;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Reads a tab-separated table from `path`, gunzipping when the file starts
/// with the gzip magic bytes (datasets are usually shipped as `.tsv.gz`).
pub(crate) fn read_table(path: &Path) -> Result<DataFrame> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("[data::read] Failed to open dataset: {}", path.display()))?;
    read_table_bytes(&bytes)
        .with_context(|| format!("[data::read] Failed to read dataset from {}", path.display()))
}

/// Parses a tab-separated table with a header row from raw (possibly gzipped)
/// bytes.
pub(crate) fn read_table_bytes(bytes: &[u8]) -> Result<DataFrame> {
    let data = if bytes.starts_with(&GZIP_MAGIC) {
        let mut decoded = Vec::new();
        GzDecoder::new(bytes)
            .read_to_end(&mut decoded)
            .context("[data::read] Failed to decompress gzip stream")?;
        decoded
    } else {
        bytes.to_vec()
    };

    CsvReadOptions::default()
        .with_has_header(true)
        .map_parse_options(|po| po.with_separator(b'\t'))
        .with_infer_schema_length(Some(1024))
        .into_reader_with_file_handle(Cursor::new(data))
        .finish()
        .context("[data::read] Failed to parse TSV")
}
