use crate::common::{canonicalize_existing_prefix, resolve_dir};
use crate::errors::CliError;
use crate::git::Git;
use crate::logger;
use crate::prompt::Prompt;
use crate::tree_sync::{copy_tree, default_destination, SyncReport};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct SyncCommand {
    /// Folder holding the shared dev tools
    pub source: PathBuf,

    /// Destination folder (default: ._dev_tools next to SOURCE)
    pub dest: Option<PathBuf>,

    /// Commit message; asked interactively when omitted
    #[arg(short, long)]
    pub message: Option<String>,

    /// Copy only, without staging or committing
    #[arg(long)]
    pub no_commit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Copied(SyncReport),
    Committed(SyncReport),
    CommitSkipped(SyncReport),
}

/// Copy the tools folder into the destination and commit the result there
pub fn handle_sync(cmd: SyncCommand, prompt: &mut dyn Prompt) -> Result<SyncOutcome, CliError> {
    let source = resolve_dir(Some(cmd.source.as_path()))?;
    let dest = match cmd.dest.as_deref() {
        Some(dest) => resolve_dir(Some(dest))?,
        None => default_destination(&source).ok_or_else(|| {
            CliError::InvalidArgs(format!(
                "cannot derive a destination for '{}'",
                source.display()
            ))
        })?,
    };
    let real_source = source.canonicalize().map_err(|source_err| CliError::Io {
        path: source.clone(),
        source: source_err,
    })?;
    if canonicalize_existing_prefix(&dest)?.starts_with(&real_source) {
        return Err(CliError::InvalidArgs(format!(
            "destination '{}' is inside source '{}'",
            dest.display(),
            source.display()
        )));
    }

    logger::step(&format!("Copying {} to {}", source.display(), dest.display()));
    let report = copy_tree(&source, &dest)?;
    logger::success(&format!(
        "Copied {} file(s) to {}",
        report.files_copied,
        dest.display()
    ));

    if cmd.no_commit {
        return Ok(SyncOutcome::Copied(report));
    }

    let git = Git::locate()?;
    git.add_all(&dest)?;

    let message = match cmd.message {
        Some(message) => message,
        None => prompt
            .input("Enter a commit message")
            .map_err(CliError::Prompt)?,
    };
    let message = message.trim();
    if message.is_empty() {
        logger::warn("Empty commit message; changes are staged but not committed");
        return Ok(SyncOutcome::CommitSkipped(report));
    }

    git.commit(&dest, message)?;
    logger::success(&format!("Committed: {}", message));
    Ok(SyncOutcome::Committed(report))
}

#[cfg(test)]
mod tests {
    use crate::commands::sync::*;
    use crate::prompt::ScriptedPrompt;
    use std::fs;
    use tempfile::TempDir;

    fn tools() -> Option<TempDir> {
        let temp_dir = TempDir::new().ok()?;
        let source = temp_dir.path().join("shared-tools");
        fs::create_dir_all(source.join("vue/template/public")).ok()?;
        fs::write(source.join("vue/template/public/dev.html"), "<html></html>").ok()?;
        Some(temp_dir)
    }

    #[test]
    fn test_sync_without_commit_uses_default_destination() {
        let Some(temp_dir) = tools() else {
            return;
        };
        let cmd = SyncCommand {
            source: temp_dir.path().join("shared-tools"),
            no_commit: true,
            ..SyncCommand::default()
        };
        let mut prompt = ScriptedPrompt::default();

        let outcome = handle_sync(cmd, &mut prompt);
        assert!(matches!(
            outcome,
            Ok(SyncOutcome::Copied(SyncReport {
                files_copied: 1,
                ..
            }))
        ));
        assert!(temp_dir
            .path()
            .join("._dev_tools/vue/template/public/dev.html")
            .exists());
        assert!(prompt.asked.is_empty());
    }

    #[test]
    fn test_sync_rejects_destination_inside_source() {
        let Some(temp_dir) = tools() else {
            return;
        };
        let source = temp_dir.path().join("shared-tools");
        let cmd = SyncCommand {
            dest: Some(source.join("copy")),
            source,
            no_commit: true,
            ..SyncCommand::default()
        };
        let result = handle_sync(cmd, &mut ScriptedPrompt::default());
        assert!(matches!(result, Err(CliError::InvalidArgs(_))));
    }

    #[test]
    fn test_sync_rejects_destination_hidden_behind_dot_dot() {
        let Some(temp_dir) = tools() else {
            return;
        };
        let source = temp_dir.path().join("shared-tools");
        let cmd = SyncCommand {
            dest: Some(source.join("..").join("shared-tools").join("copy")),
            source,
            no_commit: true,
            ..SyncCommand::default()
        };
        let result = handle_sync(cmd, &mut ScriptedPrompt::default());
        assert!(matches!(result, Err(CliError::InvalidArgs(_))));
        assert!(!temp_dir.path().join("shared-tools/copy").exists());
    }

    #[test]
    fn test_sync_empty_message_skips_commit() {
        if Git::locate().is_err() {
            return;
        }
        let Some(temp_dir) = tools() else {
            return;
        };
        let dest = temp_dir.path().join("project");
        let _ = fs::create_dir_all(&dest);
        if !std::process::Command::new("git")
            .args(["init", "-q"])
            .current_dir(&dest)
            .status()
            .is_ok_and(|s| s.success())
        {
            return;
        }

        let cmd = SyncCommand {
            source: temp_dir.path().join("shared-tools"),
            dest: Some(dest.clone()),
            ..SyncCommand::default()
        };
        let mut prompt = ScriptedPrompt::new(&["   "]);
        let outcome = handle_sync(cmd, &mut prompt);
        assert!(matches!(outcome, Ok(SyncOutcome::CommitSkipped(_))), "{:?}", outcome);
        assert_eq!(prompt.asked, ["Enter a commit message"]);
        assert!(dest.join("vue/template/public/dev.html").exists());
    }
}
