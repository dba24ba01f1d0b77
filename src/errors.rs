use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BundleError {
    #[error("Directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("IO Error: {0}")]
    IoError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Clipboard initialization failed: {0}")]
    ClipboardInitError(String),

    #[error("Clipboard write failed: {0}")]
    ClipboardWriteError(String),

    #[error("Failed to write output to {}: {1}", .0.display())]
    OutputError(PathBuf, String),

    #[error("Background task failed: {0}")]
    TaskError(String),
}

impl From<std::io::Error> for BundleError {
    fn from(err: std::io::Error) -> Self {
        BundleError::IoError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for BundleError {
    fn from(err: tokio::task::JoinError) -> Self {
        BundleError::TaskError(err.to_string())
    }
}
