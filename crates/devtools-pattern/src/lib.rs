//! Pattern checker
//!
//! Each rule pairs a regular expression with include globs and excluded
//! directory names. The checker selects files under a base directory, searches
//! them, and reports which files matched. A match anywhere means the check
//! fails, which makes the checker usable as a pre-commit or CI guard.

pub mod checker;
pub mod errors;
pub mod rule;

pub use checker::{CheckReport, PatternChecker, RuleOutcome};
pub use errors::PatternError;
pub use rule::PatternRule;
