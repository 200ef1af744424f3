use crate::common::resolve_dir;
use crate::errors::CliError;
use crate::logger;
use crate::GlobalOpts;
use clap::Args;
use colored::Colorize;
use devtools_config::{config_path, DevConfig};
use devtools_pattern::{CheckReport, PatternChecker, PatternRule};
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct CheckCommand {
    /// Path to dev.config.yaml (default: <DIRECTORY>/dev.config.yaml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory to search (default: current directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,
}

/// Run every configured pattern rule and print the matches
pub fn handle_check(cmd: CheckCommand, _opts: &GlobalOpts) -> Result<CheckReport, CliError> {
    let base_dir = resolve_dir(cmd.directory.as_deref())?;
    let config_file = config_path(&base_dir, cmd.config.as_deref());
    logger::debug(&format!("Using config {}", config_file.display()));

    let config = DevConfig::load(&config_file)?;
    let rules = config
        .require_patterns()?
        .iter()
        .map(|rule| PatternRule::new(&rule.pattern, &rule.include, &rule.exclude))
        .collect::<Result<Vec<_>, _>>()?;

    logger::spinner_start(&format!("Checking {} pattern(s)...", rules.len()));
    let report = match PatternChecker::new(&base_dir).run(&rules) {
        Ok(report) => report,
        Err(e) => {
            logger::spinner_error("Pattern check failed");
            return Err(e.into());
        }
    };
    logger::spinner_stop();

    print_report(&report);
    Ok(report)
}

fn print_report(report: &CheckReport) {
    for outcome in &report.outcomes {
        if outcome.is_match() {
            println!(
                "{} Pattern '{}' found in:",
                "✗".red().bold(),
                outcome.pattern
            );
            for file in &outcome.matched_files {
                println!("  - {}", file.display());
            }
        } else {
            println!(
                "{} No matches for '{}' ({} files searched)",
                "✔".green().bold(),
                outcome.pattern,
                outcome.files_searched
            );
        }
    }

    if report.any_match() {
        logger::warn(&format!(
            "{} match(es) found. Remove them before committing.",
            report.total_matches()
        ));
    }
}
