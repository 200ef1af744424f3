//! Manifest building and canonical serialization
//!
//! The serialized text must be byte-identical for the same logical input on
//! every run and every platform, so entries are always sorted by name with a
//! plain ordinal comparison (no locale, no case folding) and written with a
//! fixed indentation.

use crate::errors::ManifestError;
use crate::naming::format_entry;
use crate::types::{ComponentFile, ManifestEntry, ManifestOptions};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Format every discovered file into a manifest entry, in discovery order
pub fn build_entries<'a, I>(files: I, options: &ManifestOptions) -> Vec<ManifestEntry>
where
    I: IntoIterator<Item = &'a ComponentFile>,
{
    files
        .into_iter()
        .map(|file| format_entry(file, options))
        .collect()
}

/// Sort entries by name, ordinal and stable
pub fn sort_entries(entries: &mut [ManifestEntry]) {
    entries.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
}

/// Render entries as the canonical JSON manifest text
///
/// The output is a JSON array of `{ "name", "url" }` objects indented with
/// `indent` spaces and terminated by a newline.
pub fn serialize(entries: &[ManifestEntry], indent: usize) -> Result<String, ManifestError> {
    let mut sorted = entries.to_vec();
    sort_entries(&mut sorted);

    let indent_bytes = vec![b' '; indent];
    let formatter = PrettyFormatter::with_indent(&indent_bytes);
    let mut buffer = Vec::with_capacity(64 * (sorted.len() + 1));
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    sorted.serialize(&mut serializer)?;
    buffer.push(b'\n');

    // serde_json only ever emits valid UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
