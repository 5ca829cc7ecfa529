//! Git operations abstraction layer
//!
//! The core depends on the [GitRepository] trait rather than a concrete
//! git2 type so that deterministic unit tests can substitute an in-memory
//! fake. Two implementations exist:
//!
//! - [repository::Git2Repository]: production implementation using `git2`
//! - [mock::MockRepository]: setter-configured test double

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::{Result, SemverGenError};
use regex::Regex;

/// Read-only git queries the tag pipeline needs, plus nothing else.
pub trait GitRepository {
    /// Whether the opened location is a usable repository work tree.
    fn is_repo(&self) -> bool;

    /// Name of the currently checked-out branch. Failing to determine it is
    /// a fatal lookup error, there is no fallback.
    fn current_branch(&self) -> Result<String>;

    /// Full message of the given commit, or of HEAD when `sha` is absent.
    fn commit_message(&self, sha: Option<&str>) -> Result<String>;

    /// Most recently created tag reachable from the current position. A tag
    /// pointing exactly at the current commit is preferred over the nearest
    /// ancestor tag. `None` when the repository has no tags.
    fn latest_tag(&self) -> Result<Option<String>>;

    /// Nearest tag reachable from `branch` matching `include` and not
    /// matching `exclude` (glob patterns; empty `exclude` excludes nothing).
    fn ancestor_tag(&self, include: &str, exclude: &str, branch: &str) -> Result<Option<String>>;
}

/// Extract the source branch from a merged pull request commit message.
///
/// Recognizes `Merge pull request #<digits> from <owner>/<branch>` and
/// returns everything after the first `/` of the owner segment. A message
/// without that shape is a fatal lookup error.
pub fn source_branch_from_message(message: &str) -> Result<String> {
    let regex = Regex::new(r"Merge pull request #[0-9]+ from (\S+)")
        .map_err(|e| SemverGenError::lookup(format!("invalid merge pattern: {}", e)))?;

    let captures = regex
        .captures(message)
        .ok_or_else(|| SemverGenError::lookup("no source branch found in commit message"))?;

    let source = captures
        .get(1)
        .map(|m| m.as_str())
        .ok_or_else(|| SemverGenError::lookup("no source branch found in commit message"))?;

    let (_owner, branch) = source.split_once('/').ok_or_else(|| {
        SemverGenError::lookup(format!(
            "commit message does not contain expected format: {}",
            source
        ))
    })?;

    Ok(branch.to_string())
}

/// Convert a tag glob (`*`, `?`, `[0-9]` ranges) into an anchored regex.
pub(crate) fn glob_to_regex(glob: &str) -> Result<Regex> {
    let mut pattern = String::from("^");

    for ch in glob.chars() {
        match ch {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            '[' | ']' => pattern.push(ch),
            c if ".+(){}^$|\\".contains(c) => {
                pattern.push('\\');
                pattern.push(c);
            }
            c => pattern.push(c),
        }
    }

    pattern.push('$');

    Regex::new(&pattern)
        .map_err(|e| SemverGenError::lookup(format!("invalid tag pattern '{}': {}", glob, e)))
}

/// Whether a tag name passes the include/exclude glob pair.
pub(crate) fn tag_matches(name: &str, include: &Regex, exclude: Option<&Regex>) -> bool {
    include.is_match(name) && exclude.map_or(true, |re| !re.is_match(name))
}
