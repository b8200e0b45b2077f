use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Concurrency must be greater than 0, got: {value}")]
    ZeroConcurrency { value: usize },

    #[error("Invalid canvas settings: {0}")]
    InvalidCanvas(#[from] canvaskit::StandardizeError),

    #[error("Conflicting arguments: {0}")]
    Conflict(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Library(#[from] canvaskit::Error),
}
