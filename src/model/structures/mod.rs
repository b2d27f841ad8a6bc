pub mod fixture;
pub mod match_result;
pub mod rating_source;
pub mod team;
pub mod team_performance;
