pub mod constants;
pub mod elo_model;
pub mod league_processor;
pub mod rating_tracker;
pub mod regression;
pub mod simulation;
pub mod statistics;
pub mod structures;
