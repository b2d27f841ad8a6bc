use crate::model::structures::{
    fixture::{League, Match},
    team::Team
};
use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Midnight UTC, `day` days after the start of 2017
pub fn date(day: i64) -> DateTime<FixedOffset> {
    let base = Utc
        .with_ymd_and_hms(2017, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
        .fixed_offset();

    base + Duration::days(day)
}

/// A team whose history is a single `Initial` point dated [`date(0)`](date)
pub fn generate_team(name: &str, rating: f64) -> Team {
    Team::with_rating(name, rating, date(0))
}

pub fn generate_teams(n: usize) -> Vec<Team> {
    (0..n).map(|i| generate_team(&format!("Team {}", i), 1500.0)).collect()
}

pub fn generate_match(home: &str, away: &str, home_goals: i32, away_goals: i32, day: i64) -> Match {
    Match::new(home, away, home_goals, away_goals, date(day))
}

/// Double round robin between `teams`, one match per day starting at `date(1)`.
/// Every fixture is unplayed.
pub fn generate_round_robin(teams: &[&str]) -> Vec<Match> {
    let mut fixtures = Vec::new();
    let mut day = 1;
    for home in teams {
        for away in teams {
            if home == away {
                continue;
            }

            fixtures.push(Match::unplayed(*home, *away, date(day)));
            day += 1;
        }
    }

    fixtures
}

/// A league of `n` random played matches between `teams`
pub fn generate_league(name: &str, year: i32, teams: &[&str], n: usize) -> League {
    League::new(name, year, generate_matches(n, teams))
}

/// `n` played matches between random pairs of `teams`, one per day, with random scorelines.
/// Output is identical across calls with the same arguments.
pub fn generate_matches(n: usize, teams: &[&str]) -> Vec<Match> {
    if teams.len() < 2 {
        panic!("At least two teams are required to generate matches");
    }

    // Initialize seeded RNG for reproducible results
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    (0..n)
        .map(|i| {
            let home = rng.random_range(0..teams.len());
            let mut away = rng.random_range(0..teams.len() - 1);
            if away >= home {
                away += 1;
            }

            generate_match(
                teams[home],
                teams[away],
                rng.random_range(0..=5),
                rng.random_range(0..=5),
                i as i64 + 1
            )
        })
        .collect()
}
