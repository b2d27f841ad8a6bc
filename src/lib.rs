pub mod args;
pub mod config;
pub mod error;
pub mod model;
pub mod persistence;
pub mod utils;
