use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::model::{constants::DEFAULT_RATING, structures::rating_source::RatingSource};

const COMBINING_DIACRITICS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// A single entry in a team's rating history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingPoint {
    #[serde(rename = "date", with = "crate::persistence::date_format")]
    pub timestamp: DateTime<FixedOffset>,
    pub rating: f64,
    #[serde(default)]
    pub source: RatingSource
}

impl RatingPoint {
    pub(crate) fn new(timestamp: DateTime<FixedOffset>, rating: f64, source: RatingSource) -> RatingPoint {
        RatingPoint {
            timestamp,
            rating,
            source
        }
    }
}

/// A team and its chronological, append-only rating history.
///
/// The `name` is the registry key and never changes once the team exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    name: String,
    #[serde(default)]
    ratings: Vec<RatingPoint>
}

impl Team {
    pub fn new(name: impl Into<String>) -> Team {
        Team {
            name: name.into(),
            ratings: Vec::new()
        }
    }

    /// Creates a team whose history starts with an `Initial` point
    pub fn with_rating(name: impl Into<String>, rating: f64, timestamp: DateTime<FixedOffset>) -> Team {
        let mut team = Team::new(name);
        team.push(RatingPoint::new(timestamp, rating, RatingSource::Initial));

        team
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ratings(&self) -> &[RatingPoint] {
        &self.ratings
    }

    pub fn last_point(&self) -> Option<&RatingPoint> {
        self.ratings.last()
    }

    /// The most recent rating, or [`DEFAULT_RATING`] for a team without history
    pub fn last_rating(&self) -> f64 {
        self.last_point().map_or(DEFAULT_RATING, |p| p.rating)
    }

    pub fn peak_rating(&self) -> Option<&RatingPoint> {
        self.ratings.iter().max_by(|a, b| a.rating.total_cmp(&b.rating))
    }

    /// Name with whitespace, hyphens and accents stripped, suitable as a file name.
    /// Accents are removed by decomposing to NFD and dropping combining diacritics.
    pub fn file_stem(&self) -> String {
        self.name
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .nfd()
            .filter(|c| !COMBINING_DIACRITICS.contains(c))
            .collect()
    }

    pub(crate) fn push(&mut self, point: RatingPoint) {
        self.ratings.push(point);
    }
}
