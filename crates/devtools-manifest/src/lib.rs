//! Component Manifest Builder
//!
//! This crate discovers component files under a directory tree, derives a
//! human-readable title and a route URL for each of them, and writes a sorted
//! JSON navigation manifest next to a copied HTML template.
//!
//! The pipeline is split into pure stages so each can be tested on its own:
//! - [`discovery`]: walk the scan root and collect component files
//! - [`naming`]: turn a relative path into a [`ManifestEntry`]
//! - [`manifest`]: sort entries and render canonical JSON text
//! - [`manifest_writer`]: copy the template and write the manifest only on change

pub mod discovery;
pub mod errors;
pub mod manifest;
pub mod manifest_writer;
pub mod naming;
pub mod types;

pub use discovery::discover;
pub use errors::{DiscoveryError, ManifestError};
pub use manifest::{build_entries, serialize};
pub use manifest_writer::write_manifest;
pub use naming::format_entry;
pub use types::{ComponentFile, ManifestEntry, ManifestJob, ManifestOptions, WriteResult};
