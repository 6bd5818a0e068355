use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a banner operation. Nothing is retried.
#[derive(Debug, Error)]
pub enum SplashError {
    /// The installation could not be located in the registry
    #[error("could not resolve installation from `{key}`: {reason}")]
    Resolution { key: String, reason: String },

    /// Granting filesystem rights on the banner failed
    #[error("failed to grant permissions on {}: {reason}", path.display())]
    Permission { path: PathBuf, reason: String },

    /// The elevated relaunch could not be started
    #[error("failed to relaunch with elevation: {0}")]
    Elevation(String),

    #[error("failed to {action} {}", path.display())]
    FileSystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SplashError {
    pub(crate) fn fs(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        SplashError::FileSystem {
            action,
            path: path.into(),
            source,
        }
    }

    /// Underlying io error kind, if this is a filesystem failure
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            SplashError::FileSystem { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SplashError>;
