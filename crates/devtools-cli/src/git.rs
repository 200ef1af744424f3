//! Minimal git runner for committing synced tooling

use crate::errors::CliError;
use crate::logger;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

#[derive(Debug, Clone)]
pub struct Git {
    binary: PathBuf,
}

impl Git {
    /// Find `git` on `PATH`
    pub fn locate() -> Result<Self, CliError> {
        let binary = which::which("git").map_err(|_| CliError::GitNotFound)?;
        logger::debug(&format!("Using git at {}", binary.display()));
        Ok(Git { binary })
    }

    /// Stage everything in the repository
    pub fn add_all(&self, repo: &Path) -> Result<(), CliError> {
        self.run(repo, &["add", "."]).map(|_| ())
    }

    pub fn commit(&self, repo: &Path, message: &str) -> Result<(), CliError> {
        self.run(repo, &["commit", "-m", message]).map(|_| ())
    }

    fn run(&self, repo: &Path, args: &[&str]) -> Result<Output, CliError> {
        let command = format!("git {}", args.join(" "));
        logger::debug(&format!("Running: {} in {}", command, repo.display()));

        let output = Command::new(&self.binary)
            .args(args)
            .current_dir(repo)
            .output()
            .map_err(|source| CliError::Io {
                path: self.binary.clone(),
                source,
            })?;
        logger::capture_output(&command, &output);

        if !output.status.success() {
            return Err(CliError::Git {
                command,
                status: output.status.code(),
            });
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use crate::git::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_add_and_commit() {
        let Ok(git) = Git::locate() else {
            return;
        };
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let repo = temp_dir.path();
        for args in [
            &["init", "-q"][..],
            &["config", "user.email", "dev@example.com"],
            &["config", "user.name", "Dev"],
            &["config", "commit.gpgsign", "false"],
        ] {
            if git.run(repo, args).is_err() {
                return;
            }
        }
        let _ = fs::write(repo.join("dev.html"), "<html></html>");

        assert!(git.add_all(repo).is_ok());
        assert!(git.commit(repo, "Sync dev tools").is_ok());

        let log = git.run(repo, &["log", "--format=%s"]);
        assert!(log.is_ok_and(|o| String::from_utf8_lossy(&o.stdout).trim() == "Sync dev tools"));
    }

    #[test]
    fn test_failed_command_is_git_error() {
        let Ok(git) = Git::locate() else {
            return;
        };
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let result = git.run(temp_dir.path(), &["not-a-git-subcommand"]);
        assert!(matches!(result, Err(CliError::Git { .. })));
    }
}
