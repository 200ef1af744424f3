use clap::{Parser, Subcommand};
use devtools::{
    commands::{check, init, lint, manifest, sync},
    errors::CliError,
    init_tracing, logger,
    prompt::TerminalPrompt,
    GlobalOpts,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "devtools")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Developer productivity tools",
    long_about = "devtools builds the component navigation manifest, checks sources for forbidden patterns, runs Python linters and syncs shared tooling into projects."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy the page template and regenerate the component manifest
    Manifest(manifest::ManifestCommand),
    /// Search files for the patterns listed in dev.config.yaml
    Check(check::CheckCommand),
    /// Write a starter dev.config.yaml
    Init {
        /// Directory to write dev.config.yaml into (default: current directory)
        target: Option<PathBuf>,
        /// Overwrite an existing file without asking
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Run mypy, flake8 and pylint, optionally on every file change
    Lint(lint::LintCommand),
    /// Copy a shared dev tools folder into a project and commit it
    Sync(sync::SyncCommand),
}

/// Exit code when `check` finds matches or a linter reports problems
const EXIT_FINDINGS: i32 = 1;
/// Exit code when `check` or `lint` itself fails
const EXIT_TOOL_ERROR: i32 = 2;

fn main() {
    let cli = Cli::parse();
    let verbosity = cli.global.verbosity_level();

    if let Err(e) = logger::init_with_verbosity(verbosity) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    init_tracing(verbosity);

    let code = match cli.command {
        Commands::Manifest(cmd) => {
            logger::set_current_command(Some("manifest".to_string()));
            exit_code(manifest::handle_manifest(cmd, &cli.global), 1)
        }
        Commands::Check(cmd) => {
            logger::set_current_command(Some("check".to_string()));
            match check::handle_check(cmd, &cli.global) {
                Ok(report) if report.any_match() => EXIT_FINDINGS,
                Ok(_) => 0,
                Err(e) => report_error(&e, EXIT_TOOL_ERROR),
            }
        }
        Commands::Lint(cmd) => {
            logger::set_current_command(Some("lint".to_string()));
            match lint::handle_lint(cmd, &cli.global) {
                Ok(report) if report.has_failures() => EXIT_FINDINGS,
                Ok(_) => 0,
                Err(e) => report_error(&e, EXIT_TOOL_ERROR),
            }
        }
        Commands::Init { target, yes } => {
            logger::set_current_command(Some("init".to_string()));
            exit_code(
                init::handle_init(target.as_deref(), yes, &mut TerminalPrompt),
                1,
            )
        }
        Commands::Sync(cmd) => {
            logger::set_current_command(Some("sync".to_string()));
            exit_code(sync::handle_sync(cmd, &mut TerminalPrompt), 1)
        }
    };

    std::process::exit(code);
}

fn exit_code<T>(result: Result<T, CliError>, failure: i32) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => report_error(&e, failure),
    }
}

fn report_error(error: &CliError, code: i32) -> i32 {
    logger::error(&error.to_string());
    if logger::get_verbosity() > 0 {
        logger::show_log_path();
    }
    code
}
