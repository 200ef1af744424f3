//! Naming utilities for turning component paths into display titles and routes
//!
//! Titles are built segment by segment:
//! - `_` and `-` become word breaks
//! - camelCase and PascalCase are split into words, keeping acronyms together
//!   (`HTTPStatusBadge` -> `HTTP Status Badge`)
//! - the first letter of every word is uppercased, the rest is left as is
//! - segments are joined with ` - `, directories first
//!
//! URLs come from the raw path, never from the formatted title.

use crate::types::{ComponentFile, ManifestEntry, ManifestOptions};

/// Name used when a component file has no usable stem
pub const UNNAMED_COMPONENT: &str = "Unnamed Component";

/// Separator between formatted path segments in a title
pub const SEGMENT_SEPARATOR: &str = " - ";

/// Build the manifest entry for one discovered component file
pub fn format_entry(file: &ComponentFile, options: &ManifestOptions) -> ManifestEntry {
    ManifestEntry {
        name: format_title(file, &options.extension),
        url: format_url(file, options),
    }
}

/// Derive the display title of a component file
pub fn format_title(file: &ComponentFile, extension: &str) -> String {
    let segments: Vec<&str> = file.segments().collect();
    let Some((file_name, directories)) = segments.split_last() else {
        return UNNAMED_COMPONENT.to_string();
    };

    let mut parts: Vec<String> = directories
        .iter()
        .map(|dir| format_segment(dir))
        .filter(|title| !title.is_empty())
        .collect();

    let file_title = format_segment(strip_extension(file_name, extension));
    if file_title.is_empty() {
        parts.push(UNNAMED_COMPONENT.to_string());
    } else {
        parts.push(file_title);
    }

    parts.join(SEGMENT_SEPARATOR)
}

/// Derive the route URL of a component file from its raw relative path
pub fn format_url(file: &ComponentFile, options: &ManifestOptions) -> String {
    let segments: Vec<&str> = file.segments().collect();
    let mut route: Vec<&str> = Vec::with_capacity(segments.len());
    if let Some((file_name, directories)) = segments.split_last() {
        route.extend_from_slice(directories);
        route.push(strip_extension(file_name, &options.extension));
    }

    format!(
        "{}/{}",
        options.route_prefix.trim_end_matches('/'),
        route.join("/")
    )
}

/// Format a single path segment as title-cased words
pub fn format_segment(segment: &str) -> String {
    split_words(segment)
        .iter()
        .map(|word| capitalize(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a segment into words on `_`, `-`, whitespace and case boundaries
pub fn split_words(segment: &str) -> Vec<String> {
    let mut words = Vec::new();
    for part in segment
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|part| !part.is_empty())
    {
        split_case_boundaries(part, &mut words);
    }
    words
}

/// Split camelCase / PascalCase text, keeping runs of capitals together
///
/// A new word starts at an uppercase letter when:
/// 1. the previous character is lowercase or a digit (`avatarUpload`, `v2Beta`)
/// 2. the previous character is uppercase and the next one is lowercase,
///    i.e. the end of an acronym (`HTTPStatus` -> `HTTP` + `Status`)
fn split_case_boundaries(part: &str, words: &mut Vec<String>) {
    let chars: Vec<char> = part.chars().collect();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if i > 0 && ch.is_uppercase() {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());

            let start_new_word = prev.is_lowercase() || prev.is_numeric();
            let end_of_acronym = prev.is_uppercase() && next_lower;

            if (start_new_word || end_of_acronym) && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(ch);
    }

    if !current.is_empty() {
        words.push(current);
    }
}

/// Uppercase the first character, leave the rest untouched
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn strip_extension<'a>(file_name: &'a str, extension: &str) -> &'a str {
    file_name.strip_suffix(extension).unwrap_or(file_name)
}
