use std::path::PathBuf;

use thiserror::Error as ThisError;

/// Errors that can occur when opening or configuring a logger
#[derive(ThisError, Debug)]
pub enum Error {
    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The log directory does not exist or is not a directory.
    #[error("The path {} does not exist", .0.display())]
    PathNotFound(PathBuf),
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
    /// Diagnostics initialization failed.
    #[error("Initialization error: {0}")]
    Init(String),
    /// A custom timestamp description could not be parsed.
    #[error("Timestamp format error: {0}")]
    TimestampFormat(String),
    /// The writer loop is no longer accepting messages.
    #[error("logger is closed")]
    Closed,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
