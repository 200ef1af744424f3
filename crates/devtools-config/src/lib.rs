//! Configuration for the devtools CLI
//!
//! A project keeps its settings in `dev.config.yaml`. The file is optional for
//! manifest generation (every manifest setting has a default) and required for
//! the pattern checker, which needs at least one rule, and for the linters.

pub mod dev_config;
pub mod errors;
pub mod template;

pub use dev_config::{
    config_path, resolve_config_path, DevConfig, ManifestSettings, PatternRuleConfig,
    PylintSettings, PythonSettings, CONFIG_ENV_VAR, CONFIG_FILE_NAME,
};
pub use errors::ConfigError;
pub use template::STARTER_CONFIG;
