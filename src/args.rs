use std::path::PathBuf;

use clap::Parser;

use crate::{
    config::{EloConfig, SimulationOptions},
    error::ConfigError,
    model::constants::{DEFAULT_K, DEFAULT_RUNS, DEFAULT_SEED, DEFAULT_TIE_MARGIN}
};

#[derive(Parser, Clone, Debug)]
#[command(
    display_name = "Soccer Elo",
    long_about = "Computes Elo ratings for soccer teams from league results and simulates remaining fixtures"
)]
pub struct Args {
    /// League files: JSON arrays of `{name, year, champion, matches}`
    #[arg(short, long, required = true, num_args = 1.., help = "League JSON files to rate")]
    pub leagues: Vec<PathBuf>,

    /// Previously saved teams to start from instead of the default rating
    #[arg(short, long, help = "Team ratings JSON file to start from")]
    pub teams: Option<PathBuf>,

    #[arg(short, long, env = "ELO_K", default_value_t = DEFAULT_K, help = "K factor")]
    pub k: f64,

    /// Skips the pull toward the mean between seasons
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub no_regression: bool,

    /// Rates league by league, regressing between seasons, instead of as one history
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub seasons: bool,

    /// Fixtures of one league to simulate. Unplayed matches use -1 goals.
    #[arg(short, long, help = "League JSON file to simulate")]
    pub fixtures: Option<PathBuf>,

    #[arg(short, long, env = "ELO_RUNS", default_value_t = DEFAULT_RUNS, help = "Number of simulation runs")]
    pub runs: usize,

    #[arg(short, long, env = "ELO_SEED", default_value_t = DEFAULT_SEED, help = "Simulation seed")]
    pub seed: u64,

    #[arg(
        long,
        env = "ELO_TIE_MARGIN",
        default_value_t = DEFAULT_TIE_MARGIN,
        help = "Width, in percentage points, of the simulated draw band"
    )]
    pub tie_margin: i32,

    /// Score already played fixtures as they happened
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub use_real_results: bool,

    /// Let simulated results move ratings within a run
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub update_ratings: bool,

    #[arg(long, help = "Writes the final team ratings to this JSON file")]
    pub save_teams: Option<PathBuf>,

    #[arg(long, help = "Writes one rating history CSV per team into this directory")]
    pub csv_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        long,
        env = "RUST_LOG",
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        help = "Sets the logging verbosity"
    )]
    pub log_level: String
}

impl Args {
    pub fn elo_config(&self) -> Result<EloConfig, ConfigError> {
        EloConfig::new(self.k, !self.no_regression, self.tie_margin)
    }

    pub fn simulation_options(&self) -> SimulationOptions {
        SimulationOptions {
            update_ratings: self.update_ratings,
            use_real_results: self.use_real_results
        }
    }
}
