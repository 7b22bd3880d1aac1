use anyhow::Result;
use clap::Parser;

use electogram::cli::{Cli, Commands};
use electogram::commands::{bubbles, history, square, trajectory, turnout};

fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Square(args) => square::run(&cli, args),
        Commands::Turnout(args) => turnout::run(&cli, args),
        Commands::History(args) => history::run(&cli, args),
        Commands::Bubbles(args) => bubbles::run(&cli, args),
        Commands::Trajectory(args) => trajectory::run(&cli, args),
    }
}
