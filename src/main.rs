//! OrbitRisk - Close-Approach Detection and Fragmentation Simulation
//!
//! Scans a catalog of orbiting objects for dangerously close approaches and
//! synthesizes plausible debris fields for assumed collisions, using SGP4
//! via satkit for orbit states.

mod analysis;
mod collision;
mod data;
mod detection;
mod propagation;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "orbitrisk",
    about = "Close-approach detection and collision fragmentation simulator",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan object pairs for close approaches in a time window
    Detect(analysis::DetectArgs),
    /// Simulate an assumed collision and generate a debris field
    Simulate(analysis::SimulateArgs),
    /// List registered collision models
    Models,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Detect(args) => analysis::run_detect(args),
        Command::Simulate(args) => analysis::run_simulate(args),
        Command::Models => analysis::run_models(),
    }
}
