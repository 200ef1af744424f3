use crate::errors::ConfigError;
use devtools_manifest::types::{
    ManifestJob, ManifestOptions, DEFAULT_EXTENSION, DEFAULT_INDENT, DEFAULT_ROUTE_PREFIX,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the project directory
pub const CONFIG_FILE_NAME: &str = "dev.config.yaml";

/// Environment variable overriding the configuration file location
pub const CONFIG_ENV_VAR: &str = "DEVTOOLS_CONFIG";

/// Top-level `dev.config.yaml` model
///
/// Unknown keys are ignored so the file can be shared with other tools.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DevConfig {
    /// Pattern checker rules
    #[serde(default)]
    pub patterns: Vec<PatternRuleConfig>,

    /// Component manifest settings
    #[serde(default)]
    pub manifest: ManifestSettings,

    /// Python lint settings
    #[serde(default)]
    pub python: PythonSettings,
}

/// One pattern checker rule
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PatternRuleConfig {
    /// Regular expression searched in every selected file
    pub pattern: String,
    /// Globs, relative to the base directory, selecting files to search
    pub include: Vec<String>,
    /// Directory names pruned from the search
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Manifest generation settings; every path is relative to the target project
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ManifestSettings {
    pub components_dir: PathBuf,
    pub extension: String,
    pub route_prefix: String,
    pub indent: usize,
    pub template: PathBuf,
    pub template_target: PathBuf,
    pub output: PathBuf,
}

/// Settings for `devtools lint`
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PythonSettings {
    /// Paths, relative to the project, excluded from the linters and the watcher
    pub ignore_paths: Vec<String>,
    pub pylint: PylintSettings,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PylintSettings {
    /// Modules or packages handed to pylint; pylint is skipped when empty
    pub entrance: Vec<String>,
}

impl PythonSettings {
    /// Ignore paths without surrounding slashes, empty entries dropped
    pub fn normalized_ignore_paths(&self) -> Vec<String> {
        self.ignore_paths
            .iter()
            .map(|p| p.trim().trim_start_matches("./").trim_matches('/').to_string())
            .filter(|p| !p.is_empty())
            .collect()
    }
}

impl Default for ManifestSettings {
    fn default() -> Self {
        ManifestSettings {
            components_dir: PathBuf::from("pages/dev"),
            extension: DEFAULT_EXTENSION.to_string(),
            route_prefix: DEFAULT_ROUTE_PREFIX.to_string(),
            indent: DEFAULT_INDENT,
            template: PathBuf::from("._dev_tools/vue/template/public/dev.html"),
            template_target: PathBuf::from("public/dev.html"),
            output: PathBuf::from("public/dev_pages.json"),
        }
    }
}

impl ManifestSettings {
    pub fn options(&self) -> ManifestOptions {
        ManifestOptions {
            extension: self.extension.clone(),
            route_prefix: self.route_prefix.clone(),
            indent: self.indent,
        }
    }

    /// Build the writer job for a project directory
    ///
    /// `template_override` wins over the configured template and is used as
    /// given; the configured one is resolved against `target_dir`.
    pub fn job(&self, target_dir: &Path, template_override: Option<&Path>) -> ManifestJob {
        let template_source = match template_override {
            Some(path) => path.to_path_buf(),
            None => target_dir.join(&self.template),
        };

        ManifestJob {
            scan_root: target_dir.join(&self.components_dir),
            template_source,
            template_target: target_dir.join(&self.template_target),
            manifest_path: target_dir.join(&self.output),
            options: self.options(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.indent != 2 && self.indent != 4 {
            return Err(ConfigError::Invalid(format!(
                "manifest.indent must be 2 or 4, got {}",
                self.indent
            )));
        }
        if self.extension.is_empty() {
            return Err(ConfigError::Invalid(
                "manifest.extension must not be empty".to_string(),
            ));
        }
        if !self.route_prefix.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "manifest.route_prefix must start with '/', got '{}'",
                self.route_prefix
            )));
        }
        Ok(())
    }
}

impl DevConfig {
    /// Load configuration from a YAML file; a missing file is an error
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_yaml_str(&content, path)
    }

    /// Load configuration, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => Ok(DevConfig::default()),
            other => other,
        }
    }

    /// Parse and validate YAML content; `origin` is only used in error messages
    pub fn from_yaml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(DevConfig::default());
        }
        let config: DevConfig =
            serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the semantic constraints serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, rule) in self.patterns.iter().enumerate() {
            if rule.pattern.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "patterns[{}]: pattern must not be empty",
                    i
                )));
            }
            if rule.include.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "patterns[{}] ('{}'): include must list at least one glob",
                    i, rule.pattern
                )));
            }
        }
        if self.python.pylint.entrance.iter().any(|e| e.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "python.pylint.entrance must not contain empty entries".to_string(),
            ));
        }
        self.manifest.validate()
    }

    /// Pattern rules, or an error when none are configured
    pub fn require_patterns(&self) -> Result<&[PatternRuleConfig], ConfigError> {
        if self.patterns.is_empty() {
            return Err(ConfigError::Invalid(
                "no pattern rules defined under 'patterns'".to_string(),
            ));
        }
        Ok(&self.patterns)
    }
}

/// Resolve the configuration path for a project directory
///
/// Precedence: explicit path, then `DEVTOOLS_CONFIG`, then
/// `<base_dir>/dev.config.yaml`.
pub fn config_path(base_dir: &Path, explicit: Option<&Path>) -> PathBuf {
    resolve_config_path(base_dir, explicit, std::env::var(CONFIG_ENV_VAR).ok())
}

/// Same as [`config_path`] with the environment value passed in
pub fn resolve_config_path(
    base_dir: &Path,
    explicit: Option<&Path>,
    env_value: Option<String>,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Some(env_path) = env_value {
        let trimmed = env_path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    base_dir.join(CONFIG_FILE_NAME)
}
