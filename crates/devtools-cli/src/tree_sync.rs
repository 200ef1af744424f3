//! Recursive copy of a tooling folder into a project

use crate::errors::CliError;
use crate::logger;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directory names never copied
const SKIPPED_DIRS: &[&str] = &[".git"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub files_copied: usize,
    pub dirs_created: usize,
}

/// Copy every file under `source` into `dest`, keeping relative paths
///
/// Existing files in `dest` are overwritten; files only in `dest` are kept.
pub fn copy_tree(source: &Path, dest: &Path) -> Result<SyncReport, CliError> {
    if !source.is_dir() {
        return Err(CliError::InvalidArgs(format!(
            "source '{}' is not a directory",
            source.display()
        )));
    }

    let mut report = SyncReport::default();
    let walker = WalkDir::new(source)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped(entry));

    for entry in walker {
        let entry = entry.map_err(|source_err| CliError::Walk {
            path: source_err
                .path()
                .map_or_else(|| source.to_path_buf(), Path::to_path_buf),
            source: source_err,
        })?;
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            if !target.is_dir() {
                create_dir(&target)?;
                report.dirs_created += 1;
            }
            continue;
        }

        if let Some(parent) = target.parent() {
            if !parent.is_dir() {
                create_dir(parent)?;
                report.dirs_created += 1;
            }
        }
        fs::copy(entry.path(), &target).map_err(|source_err| CliError::Io {
            path: target.clone(),
            source: source_err,
        })?;
        logger::debug(&format!("Copied {}", relative.display()));
        report.files_copied += 1;
    }

    Ok(report)
}

/// Default destination: `._dev_tools` next to the source folder
pub fn default_destination(source: &Path) -> Option<PathBuf> {
    source.parent().map(|parent| parent.join("._dev_tools"))
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && SKIPPED_DIRS
            .iter()
            .any(|name| entry.file_name() == std::ffi::OsStr::new(name))
}

fn create_dir(path: &Path) -> Result<(), CliError> {
    fs::create_dir_all(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}
