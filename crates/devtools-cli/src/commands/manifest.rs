use crate::common::resolve_dir;
use crate::errors::CliError;
use crate::logger;
use crate::GlobalOpts;
use clap::Args;
use colored::Colorize;
use devtools_config::{config_path, DevConfig};
use devtools_manifest::{write_manifest, WriteResult};
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct ManifestCommand {
    /// Project directory (default: current directory)
    pub target: Option<PathBuf>,

    /// Template copied into the project, overriding the configured one
    #[arg(long, env = "DEVTOOLS_TEMPLATE")]
    pub template: Option<PathBuf>,

    /// Path to dev.config.yaml (default: <TARGET>/dev.config.yaml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Copy the page template and regenerate the component manifest
pub fn handle_manifest(cmd: ManifestCommand, _opts: &GlobalOpts) -> Result<WriteResult, CliError> {
    let target = resolve_dir(cmd.target.as_deref())?;
    let config_file = config_path(&target, cmd.config.as_deref());
    logger::debug(&format!("Using config {}", config_file.display()));

    let config = DevConfig::load_or_default(&config_file)?;
    let template = cmd
        .template
        .as_deref()
        .map(|path| resolve_dir(Some(path)))
        .transpose()?;
    let job = config.manifest.job(&target, template.as_deref());

    logger::step(&format!(
        "Scanning {} for *{} files",
        job.scan_root.display(),
        job.options.extension
    ));
    let result = write_manifest(&job)?;

    match result {
        WriteResult::Written => {
            logger::success(&format!("Manifest updated: {}", job.manifest_path.display()));
        }
        WriteResult::Unchanged => {
            println!(
                "{}",
                format!(
                    "No changes detected; {} not updated.",
                    job.manifest_path.display()
                )
                .dimmed()
            );
        }
    }
    Ok(result)
}
