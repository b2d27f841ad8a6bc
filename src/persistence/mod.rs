pub mod date_format;
pub mod export;
pub mod loader;
