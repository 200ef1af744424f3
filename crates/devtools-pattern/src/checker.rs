use crate::errors::PatternError;
use crate::rule::PatternRule;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Result of running one rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub pattern: String,
    /// Number of files selected by the include globs
    pub files_searched: usize,
    /// Matching files, relative to the base directory, sorted
    pub matched_files: Vec<PathBuf>,
}

impl RuleOutcome {
    pub fn is_match(&self) -> bool {
        !self.matched_files.is_empty()
    }
}

/// Result of running a set of rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub outcomes: Vec<RuleOutcome>,
}

impl CheckReport {
    /// True when at least one rule matched at least one file
    pub fn any_match(&self) -> bool {
        self.outcomes.iter().any(RuleOutcome::is_match)
    }

    pub fn total_matches(&self) -> usize {
        self.outcomes.iter().map(|o| o.matched_files.len()).sum()
    }
}

/// Runs pattern rules against files under a base directory
#[derive(Debug, Clone)]
pub struct PatternChecker {
    base_dir: PathBuf,
}

impl PatternChecker {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        PatternChecker {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Run every rule in order
    pub fn run(&self, rules: &[PatternRule]) -> Result<CheckReport, PatternError> {
        let outcomes = rules
            .iter()
            .map(|rule| self.check_rule(rule))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CheckReport { outcomes })
    }

    /// Search every file selected by `rule` for its pattern
    pub fn check_rule(&self, rule: &PatternRule) -> Result<RuleOutcome, PatternError> {
        let start = Instant::now();
        let files = self.find_files(rule)?;

        let mut matched_files = Vec::new();
        for relative in &files {
            let path = self.base_dir.join(relative);
            let content = fs::read(&path).map_err(|source| PatternError::Io {
                path: path.clone(),
                source,
            })?;
            if rule.is_match(&content) {
                matched_files.push(relative.clone());
            }
        }

        debug!(
            "Pattern '{}': {} of {} files matched in {:.2}ms",
            rule.pattern(),
            matched_files.len(),
            files.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(RuleOutcome {
            pattern: rule.pattern().to_string(),
            files_searched: files.len(),
            matched_files,
        })
    }

    /// Files under the base directory selected by the rule's globs
    ///
    /// Excluded directories are pruned before they are read.
    pub fn find_files(&self, rule: &PatternRule) -> Result<BTreeSet<PathBuf>, PatternError> {
        let mut files = BTreeSet::new();
        let walker = WalkDir::new(&self.base_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded_dir(rule, entry));

        for entry in walker {
            let entry = entry.map_err(|source| PatternError::Walk {
                path: source
                    .path()
                    .unwrap_or(self.base_dir.as_path())
                    .to_path_buf(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(relative) = self.relative_slash_path(entry.path()) else {
                continue;
            };
            if rule.includes(&relative) {
                files.insert(PathBuf::from(relative));
            }
        }

        Ok(files)
    }

    fn is_excluded_dir(&self, rule: &PatternRule, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        let relative = self
            .relative_slash_path(entry.path())
            .unwrap_or_default();
        rule.excludes_dir(&name, &relative)
    }

    fn relative_slash_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.base_dir).ok()?;
        let parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        Some(parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use crate::checker::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let _ = fs::write(path, content);
    }

    fn project() -> Option<TempDir> {
        let temp_dir = TempDir::new().ok()?;
        let root = temp_dir.path();
        write(root, "src/app.js", "console.log('debug');\n");
        write(root, "src/util/math.js", "export const add = (a, b) => a + b;\n");
        write(root, "src/util/log.js", "console.log(add(1, 2));\n");
        write(root, "src/style.css", "body { color: red; }\n");
        write(root, "node_modules/lib/index.js", "console.log('vendored');\n");
        write(root, "src/generated/api.js", "console.log('generated');\n");
        Some(temp_dir)
    }

    #[test]
    fn test_find_files_prunes_excluded_dirs() {
        let Some(temp_dir) = project() else {
            return;
        };
        let Ok(rule) = PatternRule::new("x", &["**/*.js"], &["node_modules", "src/generated"])
        else {
            return;
        };
        let checker = PatternChecker::new(temp_dir.path());
        let files = checker.find_files(&rule).unwrap_or_default();
        let files: Vec<String> = files
            .iter()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(files, ["src/app.js", "src/util/log.js", "src/util/math.js"]);
    }

    #[test]
    fn test_check_rule_reports_matches() {
        let Some(temp_dir) = project() else {
            return;
        };
        let Ok(rule) = PatternRule::new("console\\.log\\(", &["src/**/*.js"], &["node_modules"])
        else {
            return;
        };
        let outcome = PatternChecker::new(temp_dir.path()).check_rule(&rule);
        assert!(outcome.is_ok(), "{:?}", outcome.err());
        let Ok(outcome) = outcome else {
            return;
        };
        assert_eq!(outcome.files_searched, 4);
        assert_eq!(
            outcome.matched_files,
            [
                PathBuf::from("src/app.js"),
                PathBuf::from("src/generated/api.js"),
                PathBuf::from("src/util/log.js"),
            ]
        );
        assert!(outcome.is_match());
    }

    #[test]
    fn test_run_without_matches() {
        let Some(temp_dir) = project() else {
            return;
        };
        let Ok(rule) = PatternRule::new("debugger;", &["src/**/*.js"], &[]) else {
            return;
        };
        let Ok(css_rule) = PatternRule::new("!important", &["**/*.css"], &[]) else {
            return;
        };
        let report = PatternChecker::new(temp_dir.path()).run(&[rule, css_rule]);
        let Ok(report) = report else {
            return;
        };
        assert_eq!(report.outcomes.len(), 2);
        assert!(!report.any_match());
        assert_eq!(report.total_matches(), 0);
        assert_eq!(report.outcomes[1].files_searched, 1);
    }

    #[test]
    fn test_run_any_match() {
        let Some(temp_dir) = project() else {
            return;
        };
        let Ok(miss) = PatternRule::new("debugger;", &["src/**/*.js"], &[]) else {
            return;
        };
        let Ok(hit) = PatternRule::new("color: red", &["src/*.css"], &[]) else {
            return;
        };
        let report = PatternChecker::new(temp_dir.path()).run(&[miss, hit]);
        assert!(report.is_ok_and(|r| r.any_match() && r.total_matches() == 1));
    }

    #[test]
    fn test_missing_base_dir_is_walk_error() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let Ok(rule) = PatternRule::new("x", &["**/*"], &[]) else {
            return;
        };
        let checker = PatternChecker::new(temp_dir.path().join("missing"));
        assert!(matches!(
            checker.find_files(&rule),
            Err(PatternError::Walk { .. })
        ));
    }
}
