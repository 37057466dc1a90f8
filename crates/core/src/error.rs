// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Throttled: {0}")]
    Throttled(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
