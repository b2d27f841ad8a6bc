use indexmap::IndexMap;
use itertools::Itertools;

use crate::model::{
    constants::DEFAULT_RATING,
    structures::team::{RatingPoint, Team}
};

/// Registry of teams keyed by exact name.
///
/// The tracker exclusively owns every [`Team`]. Lookups of unknown names never fail:
/// read access reports [`DEFAULT_RATING`] and write access synthesises a fresh team.
/// Insertion order is preserved so exports and reports are stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingTracker {
    teams: IndexMap<String, Team>
}

impl RatingTracker {
    pub fn new() -> RatingTracker {
        RatingTracker { teams: IndexMap::new() }
    }

    pub fn from_teams(teams: impl IntoIterator<Item = Team>) -> RatingTracker {
        let mut tracker = RatingTracker::new();
        for team in teams {
            tracker.insert(team);
        }

        tracker
    }

    /// Inserts or replaces the team stored under its name
    pub fn insert(&mut self, team: Team) {
        self.teams.insert(team.name().to_owned(), team);
    }

    pub fn get_team(&self, name: &str) -> Option<&Team> {
        self.teams.get(name)
    }

    /// Returns the team, or a new team with an empty history if it is unknown.
    /// The new team is not registered.
    pub fn team_or_default(&self, name: &str) -> Team {
        self.get_team(name).cloned().unwrap_or_else(|| Team::new(name))
    }

    /// Mutable access, registering a new default team when the name is unknown
    pub fn team_entry(&mut self, name: &str) -> &mut Team {
        self.teams
            .entry(name.to_owned())
            .or_insert_with(|| Team::new(name))
    }

    /// Current rating for the team
    pub fn rating(&self, name: &str) -> f64 {
        self.get_team(name).map_or(DEFAULT_RATING, Team::last_rating)
    }

    pub fn rating_history(&self, name: &str) -> Option<&[RatingPoint]> {
        self.get_team(name).map(Team::ratings)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.teams.contains_key(name)
    }

    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }

    pub(crate) fn teams_mut(&mut self) -> impl Iterator<Item = &mut Team> {
        self.teams.values_mut()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.teams.keys().map(String::as_str)
    }

    /// Teams ordered by their last rating
    pub fn teams_sorted(&self, descending: bool) -> Vec<&Team> {
        let sorted = self
            .teams
            .values()
            .sorted_by(|a, b| a.last_rating().total_cmp(&b.last_rating()));

        if descending {
            sorted.rev().collect()
        } else {
            sorted.collect()
        }
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn into_teams(self) -> IndexMap<String, Team> {
        self.teams
    }
}
