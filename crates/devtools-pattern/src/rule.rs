use crate::errors::PatternError;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use regex::bytes::Regex;

/// A compiled pattern rule
///
/// Include globs are matched against `/`-separated paths relative to the base
/// directory; `*` never crosses a `/`, `**` spans any number of directories.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pattern: String,
    regex: Regex,
    include: GlobSet,
    exclude: Vec<String>,
}

impl PatternRule {
    /// Compile a rule from its raw parts
    pub fn new<S: AsRef<str>>(
        pattern: &str,
        include: &[S],
        exclude: &[S],
    ) -> Result<Self, PatternError> {
        let regex = Regex::new(pattern).map_err(|source| PatternError::Regex {
            pattern: pattern.to_string(),
            source,
        })?;

        let mut builder = GlobSetBuilder::new();
        for glob in include {
            let glob = glob.as_ref();
            let compiled = GlobBuilder::new(glob)
                .literal_separator(true)
                .build()
                .map_err(|source| PatternError::Glob {
                    glob: glob.to_string(),
                    source,
                })?;
            builder.add(compiled);
        }
        let include = builder.build().map_err(|source| PatternError::Glob {
            glob: include
                .iter()
                .map(|g| g.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
            source,
        })?;

        let exclude = exclude
            .iter()
            .map(|dir| dir.as_ref().trim_matches('/').to_string())
            .filter(|dir| !dir.is_empty())
            .collect();

        Ok(PatternRule {
            pattern: pattern.to_string(),
            regex,
            include,
            exclude,
        })
    }

    /// The raw regular expression
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether a relative `/`-separated file path is selected by the include globs
    pub fn includes(&self, relative_path: &str) -> bool {
        self.include.is_match(relative_path)
    }

    /// Whether a directory is pruned, by bare name or by relative path
    pub fn excludes_dir(&self, name: &str, relative_path: &str) -> bool {
        self.exclude
            .iter()
            .any(|dir| dir == name || dir == relative_path)
    }

    /// Whether the content contains the pattern
    pub fn is_match(&self, content: &[u8]) -> bool {
        self.regex.is_match(content)
    }
}

#[cfg(test)]
mod tests {
    use crate::rule::*;

    fn rule(include: &[&str], exclude: &[&str]) -> Option<PatternRule> {
        PatternRule::new("console\\.log", include, exclude).ok()
    }

    #[test]
    fn test_include_globs() {
        let Some(rule) = rule(&["src/**/*.js", "*.md"], &[]) else {
            return;
        };
        assert!(rule.includes("src/app.js"));
        assert!(rule.includes("src/components/button/index.js"));
        assert!(rule.includes("README.md"));
        assert!(!rule.includes("docs/README.md"));
        assert!(!rule.includes("lib/app.js"));
        assert!(!rule.includes("src/app.ts"));
    }

    #[test]
    fn test_exclude_by_name_or_path() {
        let Some(rule) = rule(&["**/*.js"], &["node_modules", "/src/generated/"]) else {
            return;
        };
        assert!(rule.excludes_dir("node_modules", "web/node_modules"));
        assert!(rule.excludes_dir("generated", "src/generated"));
        assert!(!rule.excludes_dir("generated", "lib/generated"));
        assert!(!rule.excludes_dir("src", "src"));
    }

    #[test]
    fn test_regex_match_on_bytes() {
        let Some(rule) = rule(&["*.js"], &[]) else {
            return;
        };
        assert!(rule.is_match(b"function a() { console.log(1) }"));
        assert!(!rule.is_match(b"consoleXlog"));
        // Invalid UTF-8 does not prevent a match elsewhere in the file
        assert!(rule.is_match(b"\xff\xfe console.log"));
    }

    #[test]
    fn test_invalid_regex_and_glob() {
        let err = PatternRule::new("(unclosed", &["*.js"], &[]);
        assert!(matches!(err, Err(PatternError::Regex { .. })));

        let err = PatternRule::new("ok", &["src/[.js"], &[]);
        assert!(matches!(err, Err(PatternError::Glob { .. })));
    }
}
