use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::constants::{POINTS_PER_TIE, POINTS_PER_WIN};

/// Standing of one team over a single simulated league.
///
/// `goals` is a signed goal-difference accumulator, not goals scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPerformance {
    pub team: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points: u32,
    pub goals: i32
}

impl TeamPerformance {
    pub fn new(team: impl Into<String>) -> TeamPerformance {
        TeamPerformance {
            team: team.into(),
            wins: 0,
            losses: 0,
            ties: 0,
            points: 0,
            goals: 0
        }
    }

    pub fn record_win(&mut self) {
        self.wins += 1;
        self.points += POINTS_PER_WIN;
    }

    pub fn record_loss(&mut self) {
        self.losses += 1;
    }

    pub fn record_tie(&mut self) {
        self.ties += 1;
        self.points += POINTS_PER_TIE;
    }

    pub fn add_goals(&mut self, n: i32) {
        self.goals += n;
    }

    pub fn matches_played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    /// # Standing order
    ///
    /// Ascending: points first, then wins, then the goal accumulator.
    /// Team names take no part in the comparison.
    pub fn cmp_standing(&self, other: &TeamPerformance) -> Ordering {
        self.points
            .cmp(&other.points)
            .then_with(|| self.wins.cmp(&other.wins))
            .then_with(|| self.goals.cmp(&other.goals))
    }
}

#[cfg(test)]
mod tests {
    use crate::model::structures::team_performance::TeamPerformance;
    use std::cmp::Ordering;

    fn performance(team: &str, wins: u32, ties: u32, goals: i32) -> TeamPerformance {
        let mut p = TeamPerformance::new(team);
        for _ in 0..wins {
            p.record_win();
        }
        for _ in 0..ties {
            p.record_tie();
        }
        p.add_goals(goals);
        p
    }

    #[test]
    fn test_points_accumulate() {
        let mut p = TeamPerformance::new("A");
        p.record_win();
        p.record_tie();
        p.record_loss();

        assert_eq!(p.points, 4);
        assert_eq!(p.wins, 1);
        assert_eq!(p.ties, 1);
        assert_eq!(p.losses, 1);
        assert_eq!(p.matches_played(), 3);
    }

    #[test]
    fn test_points_decide_first() {
        let a = performance("A", 2, 0, -5);
        let b = performance("B", 1, 2, 10);

        assert_eq!(a.cmp_standing(&b), Ordering::Greater);
    }

    #[test]
    fn test_wins_break_equal_points() {
        // 6 points each: two wins versus one win and three ties
        let a = performance("A", 2, 0, 0);
        let b = performance("B", 1, 3, 9);

        assert_eq!(a.points, b.points);
        assert_eq!(a.cmp_standing(&b), Ordering::Greater);
        assert_eq!(b.cmp_standing(&a), Ordering::Less);
    }

    #[test]
    fn test_goals_break_equal_points_and_wins() {
        let a = performance("A", 1, 1, 3);
        let b = performance("B", 1, 1, -1);
        let c = performance("C", 1, 1, 0);

        let mut table = vec![a, b, c];
        table.sort_by(|x, y| x.cmp_standing(y));

        let order: Vec<&str> = table.iter().map(|p| p.team.as_str()).collect();
        assert_eq!(order, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_identical_standings_are_equal() {
        let a = performance("A", 1, 1, 1);
        let b = performance("B", 1, 1, 1);

        assert_eq!(a.cmp_standing(&b), Ordering::Equal);
    }
}
