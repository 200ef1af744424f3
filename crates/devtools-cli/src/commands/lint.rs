use crate::common::resolve_dir;
use crate::errors::CliError;
use crate::lint::{is_ignored, lint_plan, run_plan, LintReport, ToolStatus};
use crate::logger;
use crate::watch::watch_dir;
use crate::GlobalOpts;
use clap::Args;
use colored::Colorize;
use devtools_config::{config_path, DevConfig};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Args, Debug, Clone, Default)]
pub struct LintCommand {
    /// Path to dev.config.yaml (default: <DIRECTORY>/dev.config.yaml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Project directory (default: current directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Keep running and lint again whenever a file changes
    #[arg(short, long)]
    pub watch: bool,
}

/// Run mypy, flake8 and pylint once, then optionally on every change
pub fn handle_lint(cmd: LintCommand, _opts: &GlobalOpts) -> Result<LintReport, CliError> {
    let base_dir = resolve_dir(cmd.directory.as_deref())?;
    let config_file = config_path(&base_dir, cmd.config.as_deref());
    logger::debug(&format!("Using config {}", config_file.display()));

    let config = DevConfig::load(&config_file)?;
    let plan = lint_plan(&config.python);
    let report = run_plan(&plan, &base_dir)?;
    print_summary(&report);

    if !cmd.watch {
        return Ok(report);
    }

    let running = Arc::new(AtomicBool::new(true));
    let running_handler = Arc::clone(&running);
    ctrlc::set_handler(move || {
        running_handler.store(false, Ordering::SeqCst);
    })?;

    let ignore_paths = config.python.normalized_ignore_paths();
    println!("Watching for file changes. Press Ctrl+C to stop.");
    watch_dir(
        &base_dir,
        &running,
        |path: &Path| !path.is_dir() && !is_ignored(path, &base_dir, &ignore_paths),
        |changes| {
            for path in changes {
                println!("Detected changes in: {}", path.display());
            }
            let report = run_plan(&plan, &base_dir)?;
            print_summary(&report);
            Ok(())
        },
    )?;

    Ok(report)
}

fn print_summary(report: &LintReport) {
    for outcome in &report.outcomes {
        match outcome.status {
            ToolStatus::Passed => println!("{} {}", "✔".green().bold(), outcome.name),
            ToolStatus::Failed(code) => println!(
                "{} {} (exit code {})",
                "✗".red().bold(),
                outcome.name,
                code.map_or_else(|| "unknown".to_string(), |c| c.to_string())
            ),
            ToolStatus::Skipped => println!("{} {} (not installed)", "-".dimmed(), outcome.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::lint::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_lint_requires_config() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let cmd = LintCommand {
            directory: Some(temp_dir.path().to_path_buf()),
            config: Some(temp_dir.path().join("dev.config.yaml")),
            watch: false,
        };
        let result = handle_lint(cmd, &GlobalOpts::default());
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_lint_runs_configured_plan() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let config = temp_dir.path().join("dev.config.yaml");
        let _ = fs::write(&config, "python:\n  ignore_paths: [build]\n");
        let cmd = LintCommand {
            directory: Some(temp_dir.path().to_path_buf()),
            config: Some(config),
            watch: false,
        };
        let report = handle_lint(cmd, &GlobalOpts::default());
        assert!(report.is_ok(), "{:?}", report.err());
        let names: Vec<String> = report
            .map(|r| r.outcomes.into_iter().map(|o| o.name).collect())
            .unwrap_or_default();
        assert_eq!(names, ["mypy", "flake8"]);
    }
}
