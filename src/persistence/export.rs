use std::{
    fs,
    path::{Path, PathBuf}
};

use indexmap::IndexMap;
use tracing::info;

use crate::{
    error::PersistenceError,
    model::{
        rating_tracker::RatingTracker,
        structures::{fixture::League, team::Team}
    },
    utils::progress_utils::progress_bar
};

const CSV_DATE_FORMAT: &str = "%d/%m/%Y";

fn write_file(path: &Path, contents: &str) -> Result<(), PersistenceError> {
    let io_error = |source| PersistenceError::Io {
        path: path.display().to_string(),
        source
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    fs::write(path, contents).map_err(io_error)
}

/// The registry as a JSON object of name -> team, in insertion order
pub fn teams_to_json(tracker: &RatingTracker) -> Result<String, PersistenceError> {
    let teams: IndexMap<&str, &Team> = tracker.teams().map(|t| (t.name(), t)).collect();

    Ok(serde_json::to_string_pretty(&teams)?)
}

pub fn save_teams(path: impl AsRef<Path>, tracker: &RatingTracker) -> Result<(), PersistenceError> {
    let path = path.as_ref();
    write_file(path, &teams_to_json(tracker)?)?;

    info!(path = %path.display(), teams = tracker.len(), "Saved teams");
    Ok(())
}

pub fn save_leagues(path: impl AsRef<Path>, leagues: &[League]) -> Result<(), PersistenceError> {
    let path = path.as_ref();
    write_file(path, &serde_json::to_string_pretty(leagues)?)?;

    info!(path = %path.display(), leagues = leagues.len(), "Saved leagues");
    Ok(())
}

/// `date,rating` followed by one `dd/mm/YYYY,<rating>` row per point.
/// Ratings are truncated to integers.
pub fn rating_history_csv(team: &Team) -> String {
    let mut csv = String::from("date,rating\n");
    for point in team.ratings() {
        csv.push_str(&format!(
            "{},{}\n",
            point.timestamp.format(CSV_DATE_FORMAT),
            point.rating.trunc() as i64
        ));
    }

    csv
}

/// Writes `<file_stem>.csv` for every team into `dir`, returning the written paths
pub fn export_csv(dir: impl AsRef<Path>, tracker: &RatingTracker) -> Result<Vec<PathBuf>, PersistenceError> {
    let dir = dir.as_ref();
    let bar = progress_bar(tracker.len() as u64, "Exporting rating histories".to_string());

    let mut written = Vec::with_capacity(tracker.len());
    for team in tracker.teams() {
        let path = dir.join(format!("{}.csv", team.file_stem()));
        write_file(&path, &rating_history_csv(team))?;
        written.push(path);
        bar.inc(1);
    }
    bar.finish_and_clear();

    info!(dir = %dir.display(), files = written.len(), "Exported rating histories");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use approx::assert_abs_diff_eq;
    use tempfile::TempDir;

    use crate::{
        model::{elo_model::EloModel, rating_tracker::RatingTracker, structures::fixture::League},
        persistence::{
            export::{export_csv, rating_history_csv, save_leagues, save_teams, teams_to_json},
            loader::{load_leagues, load_teams, teams_from_json}
        },
        utils::test_utils::{generate_match, generate_team}
    };

    fn processed_tracker() -> RatingTracker {
        let mut model = EloModel::new(Default::default(), RatingTracker::new());
        model.apply_matches(&[generate_match("São Paulo", "Athletico-PR", 6, 0, 3)]);
        model.into_tracker()
    }

    #[test]
    fn test_rating_history_csv() {
        let tracker = processed_tracker();
        let csv = rating_history_csv(tracker.get_team("Athletico-PR").unwrap());

        assert_eq!(csv, "date,rating\n04/01/2017,1478\n");
    }

    #[test]
    fn test_rating_history_csv_empty_team() {
        let csv = rating_history_csv(&crate::model::structures::team::Team::new("Nobody"));
        assert_eq!(csv, "date,rating\n");
    }

    #[test]
    fn test_teams_json_round_trip() {
        let tracker = RatingTracker::from_teams(vec![generate_team("B", 1600.0), generate_team("A", 1400.0)]);
        let parsed = teams_from_json(&teams_to_json(&tracker).unwrap()).unwrap();

        assert_eq!(parsed, tracker);
        assert_eq!(parsed.names().collect::<Vec<_>>(), vec!["B", "A"]);
    }

    #[test]
    fn test_save_and_load_files() {
        let dir = TempDir::new().unwrap();
        let teams_path = dir.path().join("out").join("teams.json");
        let leagues_path = dir.path().join("leagues.json");

        let tracker = processed_tracker();
        let leagues = vec![League::new("Série A", 2017, vec![generate_match("A", "B", 2, 1, 1)])];

        save_teams(&teams_path, &tracker).unwrap();
        save_leagues(&leagues_path, &leagues).unwrap();

        let loaded = load_teams(&teams_path).unwrap();
        assert_abs_diff_eq!(loaded.rating("São Paulo"), 1521.25);
        assert_eq!(load_leagues(&leagues_path).unwrap(), leagues);
    }

    #[test]
    fn test_export_csv_uses_file_stem() {
        let dir = TempDir::new().unwrap();
        let written = export_csv(dir.path(), &processed_tracker()).unwrap();

        assert_eq!(written.len(), 2);
        assert!(dir.path().join("SaoPaulo.csv").exists());
        let contents = fs::read_to_string(dir.path().join("AthleticoPR.csv")).unwrap();
        assert!(contents.starts_with("date,rating\n"));
    }
}
