use chrono::{DateTime, FixedOffset};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::model::{
    constants::UNPLAYED_GOALS,
    structures::match_result::{MatchResult, Side}
};

/// A played or scheduled match between two teams.
///
/// A goal count of [`UNPLAYED_GOALS`] marks a fixture that has not been played yet.
/// Such fixtures are simulation input only and never reach the rating engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub home: String,
    pub away: String,
    pub home_goals: i32,
    pub away_goals: i32,
    #[serde(with = "crate::persistence::date_format")]
    pub date: DateTime<FixedOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_k: Option<f64>
}

impl Match {
    pub fn new(
        home: impl Into<String>,
        away: impl Into<String>,
        home_goals: i32,
        away_goals: i32,
        date: DateTime<FixedOffset>
    ) -> Match {
        Match {
            home: home.into(),
            away: away.into(),
            home_goals,
            away_goals,
            date,
            custom_k: None
        }
    }

    /// A fixture to be simulated
    pub fn unplayed(home: impl Into<String>, away: impl Into<String>, date: DateTime<FixedOffset>) -> Match {
        Match::new(home, away, UNPLAYED_GOALS, UNPLAYED_GOALS, date)
    }

    pub fn with_custom_k(mut self, k: f64) -> Match {
        self.custom_k = Some(k);
        self
    }

    /// A per-match K override. Zero counts as no override.
    pub fn custom_k(&self) -> Option<f64> {
        self.custom_k.filter(|k| *k != 0.0)
    }

    /// True only when both goal counts are real (non-negative)
    pub fn is_played(&self) -> bool {
        self.home_goals >= 0 && self.away_goals >= 0
    }

    pub fn is_tie(&self) -> bool {
        self.home_goals == self.away_goals
    }

    /// Signed goal difference from the home side
    pub fn goal_difference(&self) -> i32 {
        self.home_goals - self.away_goals
    }

    pub fn winner(&self) -> Option<&str> {
        match self.result() {
            MatchResult::Victory => Some(&self.home),
            MatchResult::Loss => Some(&self.away),
            MatchResult::Tie => None
        }
    }

    pub fn result(&self) -> MatchResult {
        match self.home_goals.cmp(&self.away_goals) {
            std::cmp::Ordering::Greater => MatchResult::Victory,
            std::cmp::Ordering::Equal => MatchResult::Tie,
            std::cmp::Ordering::Less => MatchResult::Loss
        }
    }

    pub fn team(&self, side: Side) -> &str {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away
        }
    }
}

/// One season of a competition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct League {
    pub name: String,
    pub year: i32,
    #[serde(default)]
    pub champion: Option<String>,
    #[serde(default)]
    pub matches: Vec<Match>
}

impl League {
    pub fn new(name: impl Into<String>, year: i32, matches: Vec<Match>) -> League {
        League {
            name: name.into(),
            year,
            champion: None,
            matches
        }
    }

    /// Matches of this league in non-decreasing date order
    pub fn sorted_matches(&self) -> Vec<&Match> {
        self.matches.iter().sorted_by_key(|m| m.date).collect()
    }

    /// The date of the last match in the league, if any
    pub fn end_date(&self) -> Option<DateTime<FixedOffset>> {
        self.matches.iter().map(|m| m.date).max()
    }
}

/// Sorts leagues by year, ascending. Leagues of the same year keep their order.
pub fn sort_leagues(leagues: &mut [League]) {
    leagues.sort_by_key(|l| l.year);
}

/// All matches of every league, stably sorted by date
pub fn flatten_matches(leagues: &[League]) -> Vec<Match> {
    leagues
        .iter()
        .flat_map(|l| l.matches.iter().cloned())
        .sorted_by_key(|m| m.date)
        .collect()
}
