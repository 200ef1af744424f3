//! Manifest writer: the driver that ties discovery, naming and serialization
//!
//! The template is copied on every run. The manifest itself is only written
//! when its content actually changed, so file watchers downstream do not see a
//! fresh modification time on every build.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::discovery::discover;
use crate::errors::ManifestError;
use crate::manifest::{build_entries, serialize};
use crate::types::{ManifestJob, WriteResult};

/// Copy the template, rebuild the manifest, and write it if it differs
pub fn write_manifest(job: &ManifestJob) -> Result<WriteResult, ManifestError> {
    copy_template(&job.template_source, &job.template_target)?;

    let files = discover(&job.scan_root, &job.options.extension)?;
    let entries = build_entries(&files, &job.options);
    let content = serialize(&entries, job.options.indent)?;

    let result = write_if_changed(&job.manifest_path, &content)?;
    info!(
        "Manifest {:?}: {} entries, {:?}",
        job.manifest_path,
        entries.len(),
        result
    );
    Ok(result)
}

/// Copy the static template over its target, creating parent directories
///
/// A template that already is its own target is left untouched.
pub fn copy_template(source: &Path, target: &Path) -> Result<(), ManifestError> {
    if same_file(source, target) {
        debug!("Template {:?} is already in place", target);
        return Ok(());
    }
    debug!("Copying template {:?} -> {:?}", source, target);
    create_parent_dir(target)?;
    fs::copy(source, target).map_err(|e| ManifestError::io("copy template", source, e))?;
    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Write `content` to `path` unless the file already holds exactly these bytes
pub fn write_if_changed(path: &Path, content: &str) -> Result<WriteResult, ManifestError> {
    match fs::read(path) {
        Ok(existing) if existing == content.as_bytes() => {
            debug!("No changes detected in {:?}", path);
            return Ok(WriteResult::Unchanged);
        }
        Ok(_) => debug!("Manifest content changed: {:?}", path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Manifest does not exist yet: {:?}", path);
        }
        Err(e) => return Err(ManifestError::io("read manifest", path, e)),
    }

    create_parent_dir(path)?;
    atomic_write(path, content.as_bytes())?;
    Ok(WriteResult::Written)
}

fn create_parent_dir(path: &Path) -> Result<(), ManifestError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| ManifestError::io("create directory", parent, e))?;
    }
    Ok(())
}

/// Atomic write: write to a sibling temp file then rename over the target
fn atomic_write(path: &Path, bytes: &[u8]) -> Result<(), ManifestError> {
    let temp_path = temp_path_for(path);
    if let Err(e) = write_file(&temp_path, bytes) {
        let _ = fs::remove_file(&temp_path);
        return Err(ManifestError::io("write", &temp_path, e));
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ManifestError::io("replace", path, e)
    })
}

fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = io::BufWriter::with_capacity(64 * 1024, file);
    writer.write_all(bytes)?;
    writer.flush()
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("manifest"));
    name.push(".tmp");
    path.with_file_name(name)
}
