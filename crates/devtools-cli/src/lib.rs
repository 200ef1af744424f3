//! devtools library - expose modules for testing
//!
//! The binary in `main.rs` is a thin clap front-end over these modules.

pub mod commands;
pub mod common;
pub mod errors;
pub mod git;
pub mod lint;
pub mod prompt;
pub mod tree_sync;
pub mod watch;

pub use common::GlobalOpts;
pub use devtools_logger as logger;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the tracing subscriber used by the library crates
///
/// `RUST_LOG` wins; otherwise the filter follows the verbosity level.
pub fn init_tracing(verbosity: u8) {
    let default_filter = match verbosity {
        0 => "warn",
        1 => "devtools=debug,devtools_manifest=debug,devtools_pattern=debug,devtools_config=debug",
        _ => "trace",
    };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init();
}
