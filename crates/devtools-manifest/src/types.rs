//! Core types for the component manifest
//!
//! Everything here is recomputed from scratch on every run; the only durable
//! state is the JSON file and the copied template on disk.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default suffix that marks a component file
pub const DEFAULT_EXTENSION: &str = ".vue";

/// Default route namespace prepended to every manifest URL
pub const DEFAULT_ROUTE_PREFIX: &str = "/dev/";

/// Default JSON indentation width
pub const DEFAULT_INDENT: usize = 4;

// =============================================================================
// COMPONENT FILE
// =============================================================================

/// A discovered component file, identified only by its path relative to the scan root
///
/// The path always uses `/` as separator, whatever the host convention is.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentFile {
    relative_path: String,
}

impl ComponentFile {
    pub fn new(relative_path: impl Into<String>) -> Self {
        ComponentFile {
            relative_path: relative_path.into(),
        }
    }

    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Path segments from the scan root, the last one still carrying its extension
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.relative_path.split('/').filter(|s| !s.is_empty())
    }
}

// =============================================================================
// MANIFEST ENTRY
// =============================================================================

/// One navigation entry in the generated manifest
///
/// Field order matters: it is the order the keys appear in the JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub url: String,
}

impl ManifestEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        ManifestEntry {
            name: name.into(),
            url: url.into(),
        }
    }
}

// =============================================================================
// OPTIONS AND JOB
// =============================================================================

/// Knobs for discovery, naming and serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestOptions {
    /// File-name suffix selecting component files (e.g. ".vue")
    pub extension: String,
    /// Route namespace, e.g. "/dev/"
    pub route_prefix: String,
    /// Spaces per JSON indentation level
    pub indent: usize,
}

impl Default for ManifestOptions {
    fn default() -> Self {
        ManifestOptions {
            extension: DEFAULT_EXTENSION.to_string(),
            route_prefix: DEFAULT_ROUTE_PREFIX.to_string(),
            indent: DEFAULT_INDENT,
        }
    }
}

/// All paths the writer needs for one run
#[derive(Debug, Clone)]
pub struct ManifestJob {
    pub scan_root: PathBuf,
    pub template_source: PathBuf,
    pub template_target: PathBuf,
    pub manifest_path: PathBuf,
    pub options: ManifestOptions,
}

/// Outcome of a manifest write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    Written,
    Unchanged,
}
