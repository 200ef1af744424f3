//! Component file discovery
//!
//! Walks the scan root once, following symlinks, and collects every file whose
//! name ends with the component extension. Paths are reported relative to the
//! root with `/` separators so the manifest never leaks host conventions.

use crate::errors::DiscoveryError;
use crate::types::ComponentFile;
use std::collections::{BTreeSet, HashSet};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Find all component files under `root`
///
/// A missing root is not an error: it yields an empty set so a fresh project
/// can build before any component exists. A directory symlink whose target
/// contains the link fails with [`DiscoveryError::Cycle`]. Links into the
/// scanned tree are not followed, so every component keeps its real path;
/// links leaving the tree are walked once, under the first link name.
pub fn discover(root: &Path, extension: &str) -> Result<BTreeSet<ComponentFile>, DiscoveryError> {
    let start = Instant::now();
    let mut files = BTreeSet::new();

    if !root.exists() {
        debug!("Component directory {:?} does not exist, nothing to discover", root);
        return Ok(files);
    }
    if !root.is_dir() {
        return Err(DiscoveryError::NotADirectory(root.to_path_buf()));
    }

    let real_dirs = real_directories(root)?;
    let mut visited_dirs = HashSet::new();
    let mut walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter();

    while let Some(next) = walker.next() {
        let entry = match next {
            Ok(entry) => entry,
            Err(err) => {
                if let Some(ancestor) = err.loop_ancestor() {
                    return Err(DiscoveryError::Cycle {
                        path: err.path().unwrap_or(root).to_path_buf(),
                        ancestor: ancestor.to_path_buf(),
                    });
                }
                if err
                    .io_error()
                    .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
                {
                    warn!("Skipping dangling path {:?}", err.path().unwrap_or(root));
                    continue;
                }
                return Err(DiscoveryError::Walk {
                    path: err.path().unwrap_or(root).to_path_buf(),
                    source: err,
                });
            }
        };

        if entry.file_type().is_dir() {
            let physical = canonical(entry.path())?;
            if entry.depth() > 0 && entry.path_is_symlink() {
                check_link_cycle(entry.path(), &physical)?;
                if real_dirs.contains(&physical) {
                    debug!("{:?} links into the scanned tree, skipping", entry.path());
                    walker.skip_current_dir();
                    continue;
                }
            }
            if !visited_dirs.insert(physical) {
                debug!("Already visited {:?}, skipping", entry.path());
                walker.skip_current_dir();
            }
            continue;
        }

        if !entry.file_name().to_string_lossy().ends_with(extension) {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        files.insert(ComponentFile::new(to_forward_slashes(relative)));
    }

    debug!(
        "discover: found {} component files under {:?} in {:.2}ms",
        files.len(),
        root,
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(files)
}

/// Canonical paths of the directories reachable without following links
fn real_directories(root: &Path) -> Result<HashSet<PathBuf>, DiscoveryError> {
    let mut dirs = HashSet::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|err| DiscoveryError::Walk {
            path: err.path().unwrap_or(root).to_path_buf(),
            source: err,
        })?;
        if entry.file_type().is_dir() {
            dirs.insert(canonical(entry.path())?);
        }
    }
    Ok(dirs)
}

/// A link is a cycle when its own directory lies inside its target
fn check_link_cycle(link: &Path, target: &Path) -> Result<(), DiscoveryError> {
    let Some(parent) = link.parent() else {
        return Ok(());
    };
    if canonical(parent)?.starts_with(target) {
        return Err(DiscoveryError::Cycle {
            path: link.to_path_buf(),
            ancestor: target.to_path_buf(),
        });
    }
    Ok(())
}

fn canonical(path: &Path) -> Result<PathBuf, DiscoveryError> {
    path.canonicalize().map_err(|source| {
        warn!("Cannot resolve {:?}: {}", path, source);
        DiscoveryError::Resolve {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn to_forward_slashes(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
