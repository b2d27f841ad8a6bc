use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("K factor must be a positive number, got {0}")]
    InvalidK(f64),

    #[error("Tie margin must be between 0 and 50 percentage points, got {0}")]
    InvalidTieMargin(i32),

    #[error("At least one simulation run is required")]
    NoRuns
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error
    },

    #[error("Failed to (de)serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unrecognized date '{0}'")]
    InvalidDate(String)
}

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError)
}
