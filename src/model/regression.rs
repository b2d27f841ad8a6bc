use chrono::{DateTime, Duration, FixedOffset};
use tracing::debug;

use crate::model::{
    constants::{REGRESSION_DIVISOR, REGRESSION_OFFSET_DAYS, REGRESSION_TARGET},
    rating_tracker::RatingTracker,
    structures::{
        rating_source::RatingSource,
        team::{RatingPoint, Team}
    }
};

/// # How this works
/// - Called once after every match of a season has been applied.
/// - Every team's rating is pulled a third of the way toward [`REGRESSION_TARGET`].
/// - The new point is dated one day after the team's most recent point.
///
/// A team without any history has no date to anchor to, so `fallback` is used
/// instead (the end of the season that was just applied). When neither exists
/// the team is left untouched and `None` is returned.
pub fn regress(team: &mut Team, fallback: Option<DateTime<FixedOffset>>) -> Option<&RatingPoint> {
    let anchor = team.last_point().map(|p| p.timestamp).or(fallback)?;
    let rating = regressed_rating(team.last_rating());

    team.push(RatingPoint::new(
        anchor + Duration::days(REGRESSION_OFFSET_DAYS),
        rating,
        RatingSource::Regression
    ));

    team.last_point()
}

/// Regresses every team in the tracker, participants of the season or not
pub fn regress_all(tracker: &mut RatingTracker, fallback: Option<DateTime<FixedOffset>>) {
    let mut regressed = 0;
    for team in tracker.teams_mut() {
        if regress(team, fallback).is_some() {
            regressed += 1;
        }
    }

    debug!(regressed, total = tracker.len(), "Regressed ratings toward the mean");
}

/// `r - (r - 1505) / 3`
pub fn regressed_rating(rating: f64) -> f64 {
    rating - (rating - REGRESSION_TARGET) / REGRESSION_DIVISOR
}
