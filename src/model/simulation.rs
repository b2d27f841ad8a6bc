use std::collections::HashMap;

use itertools::Itertools;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::{
    config::{EloConfig, SimulationOptions},
    error::ConfigError,
    model::{
        constants::MAX_DRAW,
        elo_model::EloModel,
        rating_tracker::RatingTracker,
        statistics::{run_simulations, SimulationRun},
        structures::{fixture::Match, match_result::MatchResult, team_performance::TeamPerformance}
    }
};

/// Monte-Carlo simulator over a fixed set of fixtures.
///
/// Owns a snapshot of the ratings it was built from. Every run starts from that
/// snapshot, so runs never influence each other or the caller's registry.
#[derive(Debug, Clone)]
pub struct Simulator {
    ratings: RatingTracker,
    fixtures: Vec<Match>,
    config: EloConfig,
    options: SimulationOptions
}

impl Simulator {
    pub fn new(ratings: RatingTracker, fixtures: Vec<Match>, config: EloConfig, options: SimulationOptions) -> Simulator {
        let fixtures = fixtures.into_iter().sorted_by_key(|m| m.date).collect();

        Simulator {
            ratings,
            fixtures,
            config,
            options
        }
    }

    pub fn fixtures(&self) -> &[Match] {
        &self.fixtures
    }

    pub fn ratings(&self) -> &RatingTracker {
        &self.ratings
    }

    pub fn options(&self) -> SimulationOptions {
        self.options
    }

    /// # Single run
    ///
    /// 1. Start from a private copy of the rating snapshot.
    /// 2. With `use_real_results`, fixtures that were already played are applied
    ///    through the rating engine and scored with their actual goal difference.
    /// 3. Every other fixture gets a uniform draw `r` in `[0, 100]` which is
    ///    classified against the home win probability (see [`simulated_result`]).
    ///    Decisive results move the goal accumulator by one.
    /// 4. With `update_ratings`, each simulated result is fed back into the working
    ///    ratings as a one-goal (or goalless) match.
    ///
    /// Every team named in a fixture appears in the output.
    pub fn simulate<R: Rng + ?Sized>(&self, rng: &mut R) -> SimulationRun {
        let mut model = EloModel::new(self.config, self.ratings.clone());
        let mut table: SimulationRun = HashMap::new();

        for m in &self.fixtures {
            table.entry(m.home.clone()).or_insert_with(|| TeamPerformance::new(m.home.as_str()));
            table.entry(m.away.clone()).or_insert_with(|| TeamPerformance::new(m.away.as_str()));
        }

        let (real, remaining): (Vec<&Match>, Vec<&Match>) = if self.options.use_real_results {
            self.fixtures.iter().partition(|m| m.is_played())
        } else {
            (Vec::new(), self.fixtures.iter().collect())
        };

        for m in real {
            model.apply_match(m);
            record(&mut table, m, m.result(), m.goal_difference());
        }

        let tie_margin = self.config.tie_margin() as f64;
        for m in remaining {
            let probability = model.win_probability(m);
            let draw = rng.random_range(0..=MAX_DRAW) as f64;
            let result = simulated_result(probability, tie_margin, draw);

            let goal_difference = match result {
                MatchResult::Victory => 1,
                MatchResult::Tie => 0,
                MatchResult::Loss => -1
            };
            record(&mut table, m, result, goal_difference);

            if self.options.update_ratings {
                model.apply_match(&simulated_match(m, goal_difference));
            }
        }

        table
    }

    /// Runs `runs` independent simulations in parallel.
    ///
    /// Run `i` draws from a [`ChaCha8Rng`] seeded with `seed` on stream `i`, so the
    /// output depends only on the seed and never on thread scheduling.
    pub fn simulate_many(&self, runs: usize, seed: u64) -> Result<Vec<SimulationRun>, ConfigError> {
        if runs == 0 {
            return Err(ConfigError::NoRuns);
        }

        debug!(runs, seed, fixtures = self.fixtures.len(), "Simulating fixtures");

        Ok(run_simulations(runs, |i| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            rng.set_stream(i as u64);
            self.simulate(&mut rng)
        }))
    }
}

/// # Outcome bands
///
/// With home win probability `p` and tie margin `m` (both in percentage points):
/// - `p - m <= r <= p + m` is a tie
/// - `r < p - m` is a home victory
/// - `r > p + m` is an away victory
///
/// A NaN probability fits none of the bands and is a programming error.
pub fn simulated_result(probability: f64, tie_margin: f64, draw: f64) -> MatchResult {
    let low = probability - tie_margin;
    let high = probability + tie_margin;

    if low <= draw && draw <= high {
        MatchResult::Tie
    } else if draw < low {
        MatchResult::Victory
    } else if draw > high {
        MatchResult::Loss
    } else {
        unreachable!("simulated result outside every band: p={probability}, m={tie_margin}, r={draw}")
    }
}

fn record(table: &mut SimulationRun, m: &Match, result: MatchResult, goal_difference: i32) {
    let home = table.entry(m.home.clone()).or_insert_with(|| TeamPerformance::new(m.home.as_str()));
    match result {
        MatchResult::Victory => home.record_win(),
        MatchResult::Tie => home.record_tie(),
        MatchResult::Loss => home.record_loss()
    }
    home.add_goals(goal_difference);

    let away = table.entry(m.away.clone()).or_insert_with(|| TeamPerformance::new(m.away.as_str()));
    match result.reversed() {
        MatchResult::Victory => away.record_win(),
        MatchResult::Tie => away.record_tie(),
        MatchResult::Loss => away.record_loss()
    }
    away.add_goals(-goal_difference);
}

fn simulated_match(fixture: &Match, goal_difference: i32) -> Match {
    let simulated = Match::new(
        fixture.home.as_str(),
        fixture.away.as_str(),
        goal_difference.max(0),
        (-goal_difference).max(0),
        fixture.date
    );

    match fixture.custom_k() {
        Some(k) => simulated.with_custom_k(k),
        None => simulated
    }
}
