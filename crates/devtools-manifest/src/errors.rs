use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while walking the component directory
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Symlink cycle detected: {path} points back to {ancestor}")]
    Cycle { path: PathBuf, ancestor: PathBuf },

    #[error("Scan root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to resolve {path}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors that can occur while building or writing the manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error("Failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ManifestError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        ManifestError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
