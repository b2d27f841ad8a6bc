use std::collections::HashMap;

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::{
    model::{constants::PLACEMENT_BAND, structures::team_performance::TeamPerformance},
    utils::progress_utils::progress_bar
};

/// Final table of one simulated league, keyed by team name
pub type SimulationRun = HashMap<String, TeamPerformance>;

/// Chance, in percent, of each final placement
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PlacementProbabilities {
    pub champion: f64,
    pub top4: f64,
    pub bottom4: f64
}

/// Executes `simulate` once per run index, in parallel. Results keep run order.
pub fn run_simulations<F>(n: usize, simulate: F) -> Vec<SimulationRun>
where
    F: Fn(usize) -> SimulationRun + Sync + Send
{
    let bar = progress_bar(n as u64, "Simulating leagues".to_string());
    let runs: Vec<SimulationRun> = (0..n)
        .into_par_iter()
        .map(|i| {
            let run = simulate(i);
            bar.inc(1);
            run
        })
        .collect();
    bar.finish_and_clear();

    info!(runs = runs.len(), "Simulations complete");
    runs
}

/// # Standings
///
/// Ascending order: the last entry is the champion. Ties cascade through points,
/// wins and goals (see [`TeamPerformance::cmp_standing`]). Teams still equal after
/// that are ordered so the alphabetically first name ranks higher.
pub fn rank(run: &SimulationRun) -> Vec<&TeamPerformance> {
    let mut table: Vec<&TeamPerformance> = run.values().collect();
    table.sort_by(|a, b| a.cmp_standing(b).then_with(|| b.team.cmp(&a.team)));

    table
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PlacementCounts {
    champion: usize,
    top4: usize,
    bottom4: usize
}

/// Placement tallies over a set of simulation runs
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    runs: usize,
    counts: HashMap<String, PlacementCounts>
}

impl Statistics {
    /// Tallies every run. In a league smaller than four teams the whole table
    /// counts as both top four and bottom four.
    pub fn from_runs(runs: &[SimulationRun]) -> Statistics {
        let mut counts: HashMap<String, PlacementCounts> = HashMap::new();

        for run in runs {
            let table = rank(run);
            let size = table.len();
            let band = PLACEMENT_BAND.min(size);

            for (position, performance) in table.iter().enumerate() {
                let entry = counts.entry(performance.team.clone()).or_default();

                if position + 1 == size {
                    entry.champion += 1;
                }
                if position >= size - band {
                    entry.top4 += 1;
                }
                if position < band {
                    entry.bottom4 += 1;
                }
            }
        }

        Statistics {
            runs: runs.len(),
            counts
        }
    }

    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn championship_probability(&self, team: &str) -> f64 {
        self.probability(team, |c| c.champion)
    }

    pub fn top4_probability(&self, team: &str) -> f64 {
        self.probability(team, |c| c.top4)
    }

    pub fn bottom4_probability(&self, team: &str) -> f64 {
        self.probability(team, |c| c.bottom4)
    }

    pub fn distribution(&self, team: &str) -> PlacementProbabilities {
        PlacementProbabilities {
            champion: self.championship_probability(team),
            top4: self.top4_probability(team),
            bottom4: self.bottom4_probability(team)
        }
    }

    /// Every team seen in any run, most likely champion first
    pub fn distributions(&self) -> Vec<(&str, PlacementProbabilities)> {
        let mut distributions: Vec<(&str, PlacementProbabilities)> = self
            .counts
            .keys()
            .map(|team| (team.as_str(), self.distribution(team)))
            .collect();

        distributions.sort_by(|(a_name, a), (b_name, b)| {
            b.champion
                .total_cmp(&a.champion)
                .then_with(|| b.top4.total_cmp(&a.top4))
                .then_with(|| a.bottom4.total_cmp(&b.bottom4))
                .then_with(|| a_name.cmp(b_name))
        });

        distributions
    }

    fn probability(&self, team: &str, count: impl Fn(&PlacementCounts) -> usize) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }

        self.counts
            .get(team)
            .map_or(0.0, |c| count(c) as f64 / self.runs as f64 * 100.0)
    }
}
