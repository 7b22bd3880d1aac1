use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::write_json;
use crate::cli::{BubblesArgs, Cli};
use crate::{boundaries, group, ElectionTable, FilterSpec};

#[derive(Serialize)]
struct TerritoryTick {
    label: String,
    /// Row offset of the territory's first precinct.
    position: usize,
    /// Number of precincts in the territory.
    len: usize,
}

#[derive(Serialize)]
struct BubblesOutput {
    region_code: String,
    region_name: String,
    /// `100 * leader / ballots_valid_invalid` per precinct, in row order.
    leader_share: Vec<f64>,
    /// Registered voters per precinct (bubble sizes).
    sizes: Vec<f64>,
    /// Precinct label at each territory start.
    precinct_ticks: Vec<String>,
    territory_ticks: Vec<TerritoryTick>,
    /// Vertical separator positions, including 0 and the row count.
    separators: Vec<usize>,
}

pub fn run(cli: &Cli, args: &BubblesArgs) -> Result<()> {
    let table = ElectionTable::load(&args.data.data)?;
    let regions = table.regions()?;
    std::fs::create_dir_all(&args.output).with_context(|| {
        format!("[bubbles] Failed to create output directory: {}", args.output.display())
    })?;

    // One file per region; a bad region aborts only its own file.
    for (code, name) in &regions {
        match write_region(&table, code, name, &args.data.leader_names(), &args.output) {
            Ok(()) => {
                if cli.verbose > 0 {
                    eprintln!("[bubbles] {code}");
                }
            }
            Err(err) => eprintln!("[bubbles] {code} failed: {err:#}"),
        }
    }
    Ok(())
}

fn write_region(
    table: &ElectionTable,
    code: &str,
    name: &str,
    leader_names: &[&str],
    out_dir: &Path,
) -> Result<()> {
    let region = table.filter(&FilterSpec::default().with_region_code(code))?;

    let ballots = region.ballots_valid_invalid()?;
    let leader = region.leader_score(leader_names)?;
    let leader_share = leader
        .iter()
        .zip(&ballots)
        .map(|(leader, ballots)| if *ballots > 0.0 { 100.0 * leader / ballots } else { 0.0 })
        .collect();

    let territory = region.territory()?;
    let runs = group(&territory)?;
    let precinct = region.precinct()?;

    let output = BubblesOutput {
        region_code: code.to_string(),
        region_name: name.to_string(),
        leader_share,
        sizes: region.voters_registered()?,
        precinct_ticks: runs.iter().map(|run| precinct[run.start].clone()).collect(),
        separators: boundaries(&runs),
        territory_ticks: runs
            .into_iter()
            .map(|run| TerritoryTick { label: run.value, position: run.start, len: run.len })
            .collect(),
    };
    write_json(&out_dir.join(format!("{code}.json")), &output)
}
