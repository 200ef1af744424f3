//! Error type shared by every command
//!
//! Library errors are wrapped transparently so their messages reach the user
//! unchanged.

use devtools_config::ConfigError;
use devtools_manifest::ManifestError;
use devtools_pattern::PatternError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("'{command}' failed with exit code {}", .status.map_or_else(|| "unknown".to_string(), |c| c.to_string()))]
    Git {
        command: String,
        status: Option<i32>,
    },

    #[error("File watcher failed: {0}")]
    Watch(#[from] notify::Error),

    #[error("Failed to install Ctrl+C handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("git executable not found in PATH")]
    GitNotFound,

    #[error("Failed to read input: {0}")]
    Prompt(#[source] io::Error),

    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),
}

#[cfg(test)]
mod tests {
    use crate::errors::*;

    #[test]
    fn test_git_error_display() {
        let err = CliError::Git {
            command: "git commit -m update".to_string(),
            status: Some(1),
        };
        assert_eq!(
            err.to_string(),
            "'git commit -m update' failed with exit code 1"
        );

        let err = CliError::Git {
            command: "git add .".to_string(),
            status: None,
        };
        assert_eq!(err.to_string(), "'git add .' failed with exit code unknown");
    }

    #[test]
    fn test_wrapped_errors_are_transparent() {
        let inner = ConfigError::Invalid("no pattern rules defined under 'patterns'".to_string());
        let expected = inner.to_string();
        let err = CliError::from(inner);
        assert_eq!(err.to_string(), expected);
    }
}
