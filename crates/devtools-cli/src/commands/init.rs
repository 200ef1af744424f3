use crate::common::resolve_dir;
use crate::errors::CliError;
use crate::logger;
use crate::prompt::Prompt;
use devtools_config::{CONFIG_FILE_NAME, STARTER_CONFIG};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Created(PathBuf),
    Overwritten(PathBuf),
    Cancelled,
}

/// Write a starter `dev.config.yaml` into `target`
///
/// An existing file is only replaced after confirmation, or when `yes` is set.
pub fn handle_init(
    target: Option<&Path>,
    yes: bool,
    prompt: &mut dyn Prompt,
) -> Result<InitOutcome, CliError> {
    logger::debug("Handling init command");

    let target_dir = resolve_dir(target)?;
    let target_path = target_dir.join(CONFIG_FILE_NAME);
    logger::debug(&format!("Target file: {}", target_path.display()));

    let existed = target_path.exists();
    if existed {
        if yes {
            logger::debug("Skipping confirmation (--yes)");
        } else {
            let question = format!("File '{}' already exists. Overwrite?", target_path.display());
            if !prompt.confirm(&question).map_err(CliError::Prompt)? {
                logger::info("Operation cancelled by user");
                println!("Operation cancelled.");
                return Ok(InitOutcome::Cancelled);
            }
        }
    }

    fs::create_dir_all(&target_dir).map_err(|source| CliError::Io {
        path: target_dir.clone(),
        source,
    })?;
    fs::write(&target_path, STARTER_CONFIG).map_err(|source| CliError::Io {
        path: target_path.clone(),
        source,
    })?;

    logger::success(&format!("Created {}", target_path.display()));
    if existed {
        Ok(InitOutcome::Overwritten(target_path))
    } else {
        Ok(InitOutcome::Created(target_path))
    }
}
