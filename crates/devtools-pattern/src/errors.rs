use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while compiling or running pattern rules
#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Invalid pattern '{pattern}': {source}")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid include glob '{glob}': {source}")]
    Glob {
        glob: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
