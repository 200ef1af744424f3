//! Python linters run by `devtools lint`

use crate::errors::CliError;
use crate::logger;
use colored::Colorize;
use devtools_config::PythonSettings;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Directory names never worth re-linting for
pub const ALWAYS_IGNORED: &[&str] = &[".mypy_cache", "__pycache__", ".git", "venv"];

/// One linter invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintTool {
    pub name: String,
    pub program: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolStatus {
    Passed,
    /// The tool ran and reported problems
    Failed(Option<i32>),
    /// The program is not on `PATH`
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
    pub name: String,
    pub status: ToolStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintReport {
    pub outcomes: Vec<ToolOutcome>,
}

impl LintReport {
    pub fn has_failures(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| matches!(o.status, ToolStatus::Failed(_)))
    }
}

impl LintTool {
    fn new(name: &str, args: Vec<String>) -> Self {
        LintTool {
            name: name.to_string(),
            program: name.to_string(),
            args,
        }
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the tool in `dir`, echoing stdout line by line as it arrives
    pub fn run(&self, dir: &Path) -> Result<ToolOutcome, CliError> {
        let Ok(binary) = which::which(&self.program) else {
            logger::warn(&format!("{} not found in PATH, skipping", self.program));
            return Ok(self.outcome(ToolStatus::Skipped));
        };
        println!("{}", format!("Running {}...", self.name).bold());
        logger::debug(&format!("Running: {} in {}", self.command_line(), dir.display()));

        let io_error = |source: std::io::Error| CliError::Io {
            path: binary.clone(),
            source,
        };
        let mut child = Command::new(&binary)
            .args(&self.args)
            .current_dir(dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(io_error)?;

        let stderr = child.stderr.take();
        let stderr_reader = std::thread::spawn(move || {
            let mut buffer = Vec::new();
            if let Some(mut stderr) = stderr {
                let _ = stderr.read_to_end(&mut buffer);
            }
            buffer
        });

        let mut stdout = Vec::new();
        if let Some(out) = child.stdout.take() {
            for line in BufReader::new(out).lines() {
                let line = line.map_err(io_error)?;
                println!("{}", line);
                stdout.extend_from_slice(line.as_bytes());
                stdout.push(b'\n');
            }
        }
        let status = child.wait().map_err(io_error)?;
        let stderr = stderr_reader.join().unwrap_or_default();
        if !stderr.is_empty() {
            eprintln!("{}", String::from_utf8_lossy(&stderr).trim_end());
        }

        let output = Output {
            status,
            stdout,
            stderr,
        };
        logger::capture_output(&self.command_line(), &output);

        if status.success() {
            Ok(self.outcome(ToolStatus::Passed))
        } else {
            Ok(self.outcome(ToolStatus::Failed(status.code())))
        }
    }

    fn outcome(&self, status: ToolStatus) -> ToolOutcome {
        ToolOutcome {
            name: self.name.clone(),
            status,
        }
    }
}

/// mypy, flake8 and pylint with the configured ignore paths
///
/// pylint is left out when no entrance is configured.
pub fn lint_plan(settings: &PythonSettings) -> Vec<LintTool> {
    let ignored = settings.normalized_ignore_paths();

    let mut mypy = vec![".".to_string()];
    let mut flake8 = vec![".".to_string()];
    let mut pylint = settings.pylint.entrance.clone();
    if !ignored.is_empty() {
        let escaped: Vec<String> = ignored.iter().map(|p| regex::escape(p)).collect();
        mypy.push(format!("--exclude=({})", escaped.join("|")));
        flake8.push(format!("--exclude={}", ignored.join(",")));
        pylint.push(format!("--ignore={}", ignored.join(",")));
    }

    let mut plan = vec![LintTool::new("mypy", mypy), LintTool::new("flake8", flake8)];
    if settings.pylint.entrance.is_empty() {
        logger::debug("No pylint entrance configured, pylint skipped");
    } else {
        plan.push(LintTool::new("pylint", pylint));
    }
    plan
}

/// Run every tool in order; a tool reporting problems does not stop the rest
pub fn run_plan(plan: &[LintTool], dir: &Path) -> Result<LintReport, CliError> {
    let outcomes = plan
        .iter()
        .map(|tool| tool.run(dir))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(LintReport { outcomes })
}

/// Whether a changed path should be ignored by the watcher
pub fn is_ignored(path: &Path, base_dir: &Path, ignore_paths: &[String]) -> bool {
    let relative = path.strip_prefix(base_dir).unwrap_or(path);
    if relative
        .components()
        .any(|c| ALWAYS_IGNORED.iter().any(|name| c.as_os_str() == *name))
    {
        return true;
    }
    ignore_paths
        .iter()
        .any(|ignored| relative.starts_with(PathBuf::from(ignored)))
}
