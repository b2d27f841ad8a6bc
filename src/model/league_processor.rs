use tracing::{info, warn};

use crate::{
    config::{EloConfig, SimulationOptions},
    model::{
        elo_model::EloModel,
        rating_tracker::RatingTracker,
        simulation::Simulator,
        structures::{
            fixture::{flatten_matches, sort_leagues, League, Match},
            team::Team
        }
    }
};

/// Entry point wiring loaded leagues into the rating engine and the simulator.
///
/// Leagues are queued with `add_*` and consumed by one of the `calculate_*` calls.
pub struct LeagueProcessor {
    leagues: Vec<League>,
    model: EloModel
}

impl LeagueProcessor {
    pub fn new(config: EloConfig) -> LeagueProcessor {
        LeagueProcessor::with_teams(config, RatingTracker::new())
    }

    /// Starts from previously computed ratings
    pub fn with_teams(config: EloConfig, tracker: RatingTracker) -> LeagueProcessor {
        LeagueProcessor {
            leagues: Vec::new(),
            model: EloModel::new(config, tracker)
        }
    }

    pub fn add_league(&mut self, league: League) {
        self.leagues.push(league);
        sort_leagues(&mut self.leagues);
    }

    pub fn add_leagues(&mut self, leagues: impl IntoIterator<Item = League>) {
        self.leagues.extend(leagues);
        sort_leagues(&mut self.leagues);
    }

    /// Adds leagues whose every match carries `k` as its own K factor
    pub fn add_leagues_with_k(&mut self, leagues: impl IntoIterator<Item = League>, k: f64) {
        self.add_leagues(leagues.into_iter().map(|mut league| {
            league.matches = league.matches.into_iter().map(|m| m.with_custom_k(k)).collect();
            league
        }));
    }

    pub fn has_leagues(&self) -> bool {
        !self.leagues.is_empty()
    }

    pub fn leagues(&self) -> &[League] {
        &self.leagues
    }

    /// Pending matches, either by date or in league order
    pub fn matches(&self, sorted: bool) -> Vec<Match> {
        if sorted {
            flatten_matches(&self.leagues)
        } else {
            self.leagues.iter().flat_map(|l| l.matches.iter().cloned()).collect()
        }
    }

    /// Applies every pending match in date order as one continuous history,
    /// without regression. Returns `false` when nothing was pending.
    pub fn calculate_ratings(&mut self) -> bool {
        if !self.has_leagues() {
            warn!("No leagues to calculate ratings from");
            return false;
        }

        let leagues = std::mem::take(&mut self.leagues);
        let (played, unplayed): (Vec<Match>, Vec<Match>) =
            flatten_matches(&leagues).into_iter().partition(Match::is_played);
        if !unplayed.is_empty() {
            info!(skipped = unplayed.len(), "Skipping unplayed fixtures");
        }

        self.model.process(&played);
        true
    }

    /// Applies pending leagues season by season, regressing between seasons when
    /// configured. Returns `false` when nothing was pending.
    pub fn calculate_seasons(&mut self) -> bool {
        if !self.has_leagues() {
            warn!("No leagues to calculate ratings from");
            return false;
        }

        let mut leagues = std::mem::take(&mut self.leagues);
        for league in &mut leagues {
            league.matches.retain(Match::is_played);
        }

        self.model.apply_season(&leagues);
        true
    }

    /// Home win probability in percent
    pub fn win_probability(&self, match_: &Match) -> f64 {
        self.model.win_probability(match_)
    }

    pub fn teams_sorted(&self, descending: bool) -> Vec<&Team> {
        self.model.rating_tracker.teams_sorted(descending)
    }

    pub fn rating_tracker(&self) -> &RatingTracker {
        &self.model.rating_tracker
    }

    pub fn config(&self) -> EloConfig {
        self.model.config
    }

    /// A simulator over `fixtures` starting from a snapshot of the current ratings
    pub fn simulator(&self, fixtures: Vec<Match>, options: SimulationOptions) -> Simulator {
        Simulator::new(self.model.rating_tracker.clone(), fixtures, self.model.config, options)
    }

    pub fn into_tracker(self) -> RatingTracker {
        self.model.into_tracker()
    }
}
