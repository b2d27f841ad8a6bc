use tracing::{debug, info, warn};

use crate::{
    config::EloConfig,
    model::{
        constants::{ELO_SCALE, GOAL_INDEX_BASE, GOAL_INDEX_DIVISOR, GOAL_INDEX_INTERCEPT, GOAL_INDEX_TWO},
        rating_tracker::RatingTracker,
        regression::regress_all,
        structures::{
            fixture::{sort_leagues, League, Match},
            match_result::{MatchResult, Side},
            rating_source::RatingSource,
            team::RatingPoint
        }
    },
    utils::progress_utils::progress_bar
};

pub struct EloModel {
    pub config: EloConfig,
    pub rating_tracker: RatingTracker
}

impl EloModel {
    pub fn new(config: EloConfig, rating_tracker: RatingTracker) -> EloModel {
        EloModel { config, rating_tracker }
    }

    /// Applies a chronologically ordered history of matches.
    ///
    /// Rating updates are path dependent, so the order given is the order applied.
    /// Out-of-order input is reported but not reordered.
    pub fn process(&mut self, matches: &[Match]) {
        if matches.windows(2).any(|w| w[0].date > w[1].date) {
            warn!("Matches are not in chronological order, ratings depend on the order given");
        }

        let progress_bar = progress_bar(matches.len() as u64, "Processing match data".to_string());
        for m in matches {
            self.apply_match(m);
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        info!(matches = matches.len(), teams = self.rating_tracker.len(), "Processed match history");
    }

    /// Alias of [`EloModel::process`]
    pub fn apply_matches(&mut self, matches: &[Match]) {
        self.process(matches);
    }

    /// # Season processing
    ///
    /// Leagues are applied in year order. Within a league, matches are applied by date.
    /// After each league, when the configuration asks for it, every team in the
    /// tracker is regressed toward the mean (see [`crate::model::regression`]).
    pub fn apply_season(&mut self, leagues: &[League]) {
        self.apply_season_with(leagues, self.config.regress_toward_mean());
    }

    pub fn apply_season_with(&mut self, leagues: &[League], regress_toward_mean: bool) {
        let mut ordered = leagues.to_vec();
        sort_leagues(&mut ordered);

        for league in &ordered {
            for m in league.sorted_matches() {
                self.apply_match(m);
            }

            if regress_toward_mean {
                regress_all(&mut self.rating_tracker, league.end_date());
            }

            debug!(league = %league.name, year = league.year, "Applied league");
        }

        info!(leagues = ordered.len(), teams = self.rating_tracker.len(), "Processed seasons");
    }

    /// # Match processing
    ///
    /// Both deltas are computed from the pre-match ratings, then one point dated at
    /// the match is appended to each team. Unknown teams start at the default rating.
    ///
    /// Unplayed fixtures must be filtered out by the caller.
    pub fn apply_match(&mut self, match_: &Match) {
        debug_assert!(match_.is_played(), "unplayed fixture reached the rating engine");

        let home_rating = self.rating_tracker.rating(&match_.home) + self.points_delta(match_, Side::Home);
        let away_rating = self.rating_tracker.rating(&match_.away) + self.points_delta(match_, Side::Away);

        self.rating_tracker
            .team_entry(&match_.home)
            .push(RatingPoint::new(match_.date, home_rating, RatingSource::Match));
        self.rating_tracker
            .team_entry(&match_.away)
            .push(RatingPoint::new(match_.date, away_rating, RatingSource::Match));
    }

    /// `K * goal_difference_index * (result - expectancy)` for the given side.
    /// A non-zero per-match K takes precedence over the configured one.
    pub fn points_delta(&self, match_: &Match, side: Side) -> f64 {
        let k = match_.custom_k().unwrap_or(self.config.k());
        let rating = self.rating_tracker.rating(match_.team(side));
        let opponent = self.rating_tracker.rating(match_.team(side.opponent()));

        k * goal_difference_index(match_) * (match_result_value(match_, side) - win_expectancy(rating, opponent))
    }

    /// Probability, in percent, of the home team winning. Score and date are ignored.
    pub fn win_probability(&self, match_: &Match) -> f64 {
        100.0 * win_expectancy(
            self.rating_tracker.rating(&match_.home),
            self.rating_tracker.rating(&match_.away)
        )
    }

    pub fn into_tracker(self) -> RatingTracker {
        self.rating_tracker
    }
}

/// Scales an update by the margin of victory:
/// `1.0` for a difference of 0 or 1, `1.5` for 2, `(11 + d) / 8` beyond.
pub fn goal_difference_index(match_: &Match) -> f64 {
    match match_.goal_difference().unsigned_abs() {
        0 | 1 => GOAL_INDEX_BASE,
        2 => GOAL_INDEX_TWO,
        d => (GOAL_INDEX_INTERCEPT + d as f64) / GOAL_INDEX_DIVISOR
    }
}

/// Actual score of `side`: 1 for a win, 0.5 for a tie, 0 for a loss
pub fn match_result_value(match_: &Match, side: Side) -> f64 {
    let result = match side {
        Side::Home => match_.result(),
        Side::Away => match_.result().reversed()
    };

    match result {
        MatchResult::Victory => 1.0,
        MatchResult::Tie => 0.5,
        MatchResult::Loss => 0.0
    }
}

/// Logistic Elo expectancy of a team rated `rating` against one rated `opponent`
pub fn win_expectancy(rating: f64, opponent: f64) -> f64 {
    1.0 / (10f64.powf(-(rating - opponent) / ELO_SCALE) + 1.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use crate::{
        config::EloConfig,
        model::{
            elo_model::{goal_difference_index, match_result_value, win_expectancy, EloModel},
            rating_tracker::RatingTracker,
            structures::{
                fixture::League,
                match_result::Side,
                rating_source::RatingSource
            }
        },
        utils::test_utils::{date, generate_match, generate_team}
    };

    fn model(teams: &[(&str, f64)]) -> EloModel {
        let tracker = RatingTracker::from_teams(teams.iter().map(|(name, rating)| generate_team(name, *rating)));
        EloModel::new(EloConfig::default(), tracker)
    }

    #[test]
    fn test_goal_difference_index_table() {
        assert_abs_diff_eq!(goal_difference_index(&generate_match("A", "B", 0, 0, 1)), 1.0);
        assert_abs_diff_eq!(goal_difference_index(&generate_match("A", "B", 1, 0, 1)), 1.0);
        assert_abs_diff_eq!(goal_difference_index(&generate_match("A", "B", 0, 2, 1)), 1.5);
        assert_abs_diff_eq!(goal_difference_index(&generate_match("A", "B", 3, 0, 1)), 1.75);
        assert_abs_diff_eq!(goal_difference_index(&generate_match("A", "B", 6, 0, 1)), 2.125);
    }

    #[test]
    fn test_match_result_value() {
        let tie = generate_match("A", "B", 0, 0, 1);
        let home_win = generate_match("A", "B", 6, 0, 1);
        let home_loss = generate_match("A", "B", 0, 2, 1);

        assert_abs_diff_eq!(match_result_value(&tie, Side::Home), 0.5);
        assert_abs_diff_eq!(match_result_value(&tie, Side::Away), 0.5);
        assert_abs_diff_eq!(match_result_value(&home_win, Side::Home), 1.0);
        assert_abs_diff_eq!(match_result_value(&home_win, Side::Away), 0.0);
        assert_abs_diff_eq!(match_result_value(&home_loss, Side::Home), 0.0);
        assert_abs_diff_eq!(match_result_value(&home_loss, Side::Away), 1.0);
    }

    #[test]
    fn test_win_expectancy_symmetry() {
        let pairs = [(1500.0, 1500.0), (1620.0, 1380.0), (2100.0, 900.0), (1499.9, 1500.1)];
        for (a, b) in pairs {
            assert_abs_diff_eq!(win_expectancy(a, b) + win_expectancy(b, a), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_win_expectancy_monotonic() {
        let mut previous = 0.0;
        for rating in (1000..=2000).step_by(50) {
            let expectancy = win_expectancy(rating as f64, 1500.0);
            assert!(expectancy > previous);
            previous = expectancy;
        }
    }

    #[test]
    fn test_equal_ratings_win_probability() {
        let model = model(&[("A", 1500.0), ("B", 1500.0)]);
        let m = generate_match("A", "B", 0, 0, 1);

        assert_abs_diff_eq!(model.win_probability(&m), 50.0);
    }

    #[test]
    fn test_unknown_teams_win_probability() {
        let model = EloModel::new(EloConfig::default(), RatingTracker::new());
        let m = generate_match("X", "Y", 0, 0, 1);

        assert_abs_diff_eq!(model.win_probability(&m), 50.0);
    }

    #[test]
    fn test_apply_match_six_nil() {
        let mut model = model(&[("A", 1500.0), ("B", 1500.0)]);
        let m = generate_match("A", "B", 6, 0, 3);

        assert_abs_diff_eq!(model.points_delta(&m, Side::Home), 21.25);
        assert_abs_diff_eq!(model.points_delta(&m, Side::Away), -21.25);

        model.apply_match(&m);

        assert_abs_diff_eq!(model.rating_tracker.rating("A"), 1521.25);
        assert_abs_diff_eq!(model.rating_tracker.rating("B"), 1478.75);

        let last = model.rating_tracker.get_team("A").unwrap().last_point().unwrap();
        assert_eq!(last.timestamp, date(3));
        assert_eq!(last.source, RatingSource::Match);
    }

    #[test]
    fn test_apply_match_synthesises_unknown_teams() {
        let mut model = EloModel::new(EloConfig::default(), RatingTracker::new());
        model.apply_match(&generate_match("A", "B", 1, 1, 1));

        assert_eq!(model.rating_tracker.len(), 2);
        assert_abs_diff_eq!(model.rating_tracker.rating("A"), 1500.0);
        assert_abs_diff_eq!(model.rating_tracker.rating("B"), 1500.0);
        assert_eq!(model.rating_tracker.rating_history("A").unwrap().len(), 1);
    }

    #[test]
    fn test_custom_k_takes_precedence() {
        let model = model(&[("A", 1500.0), ("B", 1500.0)]);
        let m = generate_match("A", "B", 1, 0, 1).with_custom_k(40.0);

        assert_abs_diff_eq!(model.points_delta(&m, Side::Home), 20.0);
    }

    #[test]
    fn test_tie_between_unequal_teams_moves_ratings() {
        let mut model = model(&[("Strong", 1700.0), ("Weak", 1300.0)]);
        model.apply_match(&generate_match("Strong", "Weak", 2, 2, 1));

        assert!(model.rating_tracker.rating("Strong") < 1700.0);
        assert!(model.rating_tracker.rating("Weak") > 1300.0);
    }

    #[test]
    fn test_order_changes_result() {
        let first = generate_match("A", "B", 4, 0, 1);
        let second = generate_match("B", "A", 1, 0, 2);

        let mut forward = model(&[("A", 1500.0), ("B", 1500.0)]);
        forward.apply_match(&first);
        forward.apply_match(&second);

        let mut backward = model(&[("A", 1500.0), ("B", 1500.0)]);
        backward.apply_match(&second);
        backward.apply_match(&first);

        assert!((forward.rating_tracker.rating("A") - backward.rating_tracker.rating("A")).abs() > 1e-9);
    }

    #[test]
    fn test_apply_season_regresses_every_team() {
        let mut model = model(&[("A", 1500.0), ("B", 1500.0), ("Idle", 1805.0)]);
        let league = League::new("Serie A", 2017, vec![generate_match("A", "B", 6, 0, 5)]);

        model.apply_season(&[league]);

        assert_abs_diff_eq!(model.rating_tracker.rating("A"), 1521.25 - (1521.25 - 1505.0) / 3.0);
        assert_abs_diff_eq!(model.rating_tracker.rating("Idle"), 1705.0);

        let idle = model.rating_tracker.get_team("Idle").unwrap();
        assert_eq!(idle.last_point().unwrap().source, RatingSource::Regression);

        let a = model.rating_tracker.get_team("A").unwrap();
        assert_eq!(a.last_point().unwrap().timestamp, date(6));
    }

    #[test]
    fn test_apply_season_without_regression() {
        let config = EloConfig::new(20.0, false, 5).unwrap();
        let mut model = EloModel::new(config, RatingTracker::new());
        let league = League::new("Serie A", 2017, vec![generate_match("A", "B", 6, 0, 5)]);

        model.apply_season(&[league]);

        assert_abs_diff_eq!(model.rating_tracker.rating("A"), 1521.25);
        assert_eq!(model.rating_tracker.rating_history("A").unwrap().len(), 1);
    }

    #[test]
    fn test_apply_season_with_overrides_config() {
        let mut model = model(&[("A", 1805.0)]);
        model.apply_season_with(&[League::new("Empty", 2017, vec![])], false);
        assert_abs_diff_eq!(model.rating_tracker.rating("A"), 1805.0);

        model.apply_season_with(&[League::new("Empty", 2018, vec![])], true);
        assert_abs_diff_eq!(model.rating_tracker.rating("A"), 1705.0);
    }

    #[test]
    fn test_apply_season_orders_leagues_by_year() {
        let late = League::new("2018", 2018, vec![generate_match("A", "B", 0, 3, 40)]);
        let early = League::new("2017", 2017, vec![generate_match("A", "B", 3, 0, 10)]);

        let config = EloConfig::new(20.0, false, 5).unwrap();
        let mut shuffled = EloModel::new(config, RatingTracker::new());
        shuffled.apply_season(&[late.clone(), early.clone()]);

        let mut ordered = EloModel::new(config, RatingTracker::new());
        ordered.apply_matches(&[early.matches[0].clone(), late.matches[0].clone()]);

        assert_abs_diff_eq!(shuffled.rating_tracker.rating("A"), ordered.rating_tracker.rating("A"));
        let dates: Vec<_> = shuffled
            .rating_tracker
            .rating_history("A")
            .unwrap()
            .iter()
            .map(|p| p.timestamp)
            .collect();
        assert_eq!(dates, vec![date(10), date(40)]);
    }
}
