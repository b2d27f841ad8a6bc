// Rating constants
pub const DEFAULT_RATING: f64 = 1500.0;
pub const DEFAULT_K: f64 = 20.0;
pub const ELO_SCALE: f64 = 400.0;
// Regression toward the mean, applied once per season
pub const REGRESSION_TARGET: f64 = 1505.0;
pub const REGRESSION_DIVISOR: f64 = 3.0;
pub const REGRESSION_OFFSET_DAYS: i64 = 1;
// Goal difference index
pub const GOAL_INDEX_BASE: f64 = 1.0;
pub const GOAL_INDEX_TWO: f64 = 1.5;
pub const GOAL_INDEX_INTERCEPT: f64 = 11.0;
pub const GOAL_INDEX_DIVISOR: f64 = 8.0;
// Simulation
pub const DEFAULT_TIE_MARGIN: i32 = 5;
pub const MAX_TIE_MARGIN: i32 = 50;
pub const MAX_DRAW: u32 = 100;
pub const DEFAULT_RUNS: usize = 10_000;
pub const DEFAULT_SEED: u64 = 42;
pub const UNPLAYED_GOALS: i32 = -1;
// Standings
pub const POINTS_PER_WIN: u32 = 3;
pub const POINTS_PER_TIE: u32 = 1;
pub const PLACEMENT_BAND: usize = 4;
