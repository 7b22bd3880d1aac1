use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;

use crate::{HistogramOptions, WeightScheme};

/// Election anomaly charting CLI (numeric chart inputs only; rendering is a
/// separate concern)
#[derive(Parser, Debug)]
#[command(name = "electogram", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 2D turnout / leader-result histogram with marginals
    Square(SquareArgs),

    /// 1D turnout distribution (row sums of the 2D histogram)
    Turnout(TurnoutArgs),

    /// Per-time turnout histograms with peak labels
    History(HistoryArgs),

    /// Per-region precinct scatter inputs with territory tick marks
    Bubbles(BubblesArgs),

    /// Per-region cumulative turnout trajectories
    Trajectory(TrajectoryArgs),
}

/// How precincts are weighted in histogram bins.
#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
pub enum WeightArg {
    /// Count registered voters
    Voters,
    /// Count ballots given
    Given,
    /// Count ballots for the leader
    Leader,
    /// Count polling stations
    Ones,
}

impl From<WeightArg> for WeightScheme {
    fn from(arg: WeightArg) -> Self {
        match arg {
            WeightArg::Voters => WeightScheme::RegisteredVoters,
            WeightArg::Given => WeightScheme::BallotsGiven,
            WeightArg::Leader => WeightScheme::LeaderVotes,
            WeightArg::Ones => WeightScheme::PollingStationCount,
        }
    }
}

#[derive(Args, Debug)]
pub struct DataArgs {
    /// Precinct table (.tsv or .tsv.gz)
    #[arg(value_hint = ValueHint::FilePath)]
    pub data: PathBuf,

    /// Candidate name fragment(s) matched against vote columns; multiple
    /// fragments sum into one leader score
    #[arg(long = "leader", default_values_t = [String::from("leader")])]
    pub leader: Vec<String>,
}

impl DataArgs {
    pub fn leader_names(&self) -> Vec<&str> {
        self.leader.iter().map(String::as_str).collect()
    }
}

#[derive(Args, Debug)]
pub struct HistArgs {
    /// Bin width in percentage points
    #[arg(long, default_value_t = 0.25)]
    pub bin_width: f64,

    /// What each precinct contributes to its bin
    #[arg(long, value_enum, default_value_t = WeightArg::Voters)]
    pub weights: WeightArg,

    /// Minimum precinct size (registered voters) to include
    #[arg(long, default_value_t = 0)]
    pub min_size: u64,

    /// Add U(-0.5,0.5) noise to the numerators (removes division artifacts)
    #[arg(long)]
    pub noise: bool,

    /// Seed of the noise generator
    #[arg(long, default_value_t = 1)]
    pub seed: u64,
}

impl HistArgs {
    pub fn options(&self) -> HistogramOptions {
        HistogramOptions {
            bin_width: self.bin_width,
            weights: self.weights.into(),
            min_size: self.min_size,
            dither: self.noise,
            seed: self.seed,
        }
    }
}

#[derive(Args, Debug)]
pub struct SquareArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub hist: HistArgs,

    /// Output file
    #[arg(short, long, default_value = "square.json", value_hint = ValueHint::FilePath)]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct TurnoutArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub hist: HistArgs,

    /// Output file
    #[arg(short, long, default_value = "turnout.json", value_hint = ValueHint::FilePath)]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Precinct table (.tsv or .tsv.gz)
    #[arg(value_hint = ValueHint::FilePath)]
    pub data: PathBuf,

    #[command(flatten)]
    pub hist: HistArgs,

    /// Output file
    #[arg(short, long, default_value = "history.json", value_hint = ValueHint::FilePath)]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct BubblesArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Output directory (one JSON file per region)
    #[arg(short, long, default_value = "bubbles", value_hint = ValueHint::DirPath)]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct TrajectoryArgs {
    /// Precinct table (.tsv or .tsv.gz)
    #[arg(value_hint = ValueHint::FilePath)]
    pub data: PathBuf,

    /// Output directory (one JSON file per region)
    #[arg(short, long, default_value = "trajectory", value_hint = ValueHint::DirPath)]
    pub output: PathBuf,
}
