//! Error types for the photo census

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for photo census operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the photo census
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot open {path} as an image: {message}")]
    Unreadable { path: PathBuf, message: String },

    #[error("Failed to read EXIF data from {path}: {message}")]
    ExifRead { path: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Directory traversal error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

impl Error {
    /// Path of the file this error refers to, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Error::Unreadable { path, .. } | Error::ExifRead { path, .. } => Some(path),
            Error::WalkDir(e) => e.path(),
            _ => None,
        }
    }
}
