//! Errors raised while resolving or locating a secrets store

use std::path::PathBuf;
use thiserror::Error;
use usersecrets_core::{PathsError, PlatformError};

pub type Result<T> = std::result::Result<T, UserSecretsError>;

#[derive(Error, Debug)]
pub enum UserSecretsError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No <PropertyGroup> or <Project> element to hold a UserSecretsId in {0}")]
    NoInsertionAnchor(PathBuf),

    #[error("Invalid UserSecretsId '{0}': must be usable as a single directory name")]
    InvalidIdentifier(String),

    #[error("Could not determine the home directory")]
    NoHomeDirectory,

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("No project file found in {0}")]
    NoDescriptor(PathBuf),

    #[error("Found {1} project files in {0} - pass one explicitly")]
    AmbiguousDescriptor(PathBuf, usize),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Config error in {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl UserSecretsError {
    /// Attach a path to an IO error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<PathsError> for UserSecretsError {
    fn from(err: PathsError) -> Self {
        match err {
            PathsError::NoHome => Self::NoHomeDirectory,
        }
    }
}
