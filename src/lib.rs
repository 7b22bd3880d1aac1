#![doc = "Electogram public API"]
mod data;
mod error;
mod hist;
mod runs;

pub mod cli;
pub mod commands;

#[doc(inline)]
pub use data::{ElectionTable, FilterSpec, TurnoutSeries};

#[doc(inline)]
pub use error::Error;

#[doc(inline)]
pub use hist::{
    histogram1d, histogram2d, BinGrid, Histogram1d, Histogram2d, HistogramOptions,
    SeriesHistogram, WeightScheme,
};

#[doc(inline)]
pub use runs::{boundaries, group, Run};
