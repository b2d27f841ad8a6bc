use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Outcome of a match from the home team's point of view
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum MatchResult {
    Victory,
    Tie,
    Loss
}

impl MatchResult {
    /// The same outcome seen from the other side
    pub fn reversed(self) -> MatchResult {
        match self {
            MatchResult::Victory => MatchResult::Loss,
            MatchResult::Tie => MatchResult::Tie,
            MatchResult::Loss => MatchResult::Victory
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Side {
    Home,
    Away
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home
        }
    }
}
