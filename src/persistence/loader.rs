use std::{fs, path::Path};

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::{
    error::PersistenceError,
    model::{
        rating_tracker::RatingTracker,
        structures::{
            fixture::{sort_leagues, League},
            team::Team
        }
    }
};

pub(crate) fn read_file(path: &Path) -> Result<String, PersistenceError> {
    fs::read_to_string(path).map_err(|source| PersistenceError::Io {
        path: path.display().to_string(),
        source
    })
}

/// Reads a JSON array of leagues, ordered by year
pub fn load_leagues(path: impl AsRef<Path>) -> Result<Vec<League>, PersistenceError> {
    let path = path.as_ref();
    let leagues = leagues_from_json(&read_file(path)?)?;

    info!(
        path = %path.display(),
        leagues = leagues.len(),
        matches = leagues.iter().map(|l| l.matches.len()).sum::<usize>(),
        "Loaded leagues"
    );

    Ok(leagues)
}

pub fn leagues_from_json(json: &str) -> Result<Vec<League>, PersistenceError> {
    let mut leagues: Vec<League> = serde_json::from_str(json)?;
    sort_leagues(&mut leagues);

    Ok(leagues)
}

/// Reads a JSON object of name -> team into a registry
pub fn load_teams(path: impl AsRef<Path>) -> Result<RatingTracker, PersistenceError> {
    let path = path.as_ref();
    let tracker = teams_from_json(&read_file(path)?)?;

    info!(path = %path.display(), teams = tracker.len(), "Loaded teams");

    Ok(tracker)
}

/// The team's own name is the registry key. A differing map key is ignored.
pub fn teams_from_json(json: &str) -> Result<RatingTracker, PersistenceError> {
    let teams: IndexMap<String, Team> = serde_json::from_str(json)?;
    for (key, team) in &teams {
        if key != team.name() {
            debug!(key = %key, name = team.name(), "Team stored under a different key");
        }
    }

    Ok(RatingTracker::from_teams(teams.into_values()))
}
