use crate::config::Conventions;
use crate::error::{Result, SemverGenError};
use regex::Regex;

/// Branch naming category derived from the convention set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Bugfix,
    Feature,
    Major,
    Hotfix,
    Docs,
    Misc,
    Resync,
    /// The branch name matched no convention. Not an error.
    None,
}

/// Classifies branch names against the configured naming conventions.
///
/// Patterns are compiled once at construction. Matching is case-insensitive,
/// anchored at the start, and requires a `/` followed by at least one
/// character after the prefix keyword.
pub struct BranchClassifier {
    patterns: Vec<(Category, Regex)>,
}

impl BranchClassifier {
    /// Compile one pattern per category from the convention set.
    pub fn new(conventions: &Conventions) -> Result<Self> {
        let sets = [
            (Category::Bugfix, &conventions.bugfix),
            (Category::Feature, &conventions.feature),
            (Category::Major, &conventions.major),
            (Category::Hotfix, &conventions.hotfix),
            (Category::Docs, &conventions.docs),
            (Category::Misc, &conventions.misc),
            (Category::Resync, &conventions.resync),
        ];

        let mut patterns = Vec::with_capacity(sets.len());

        for (category, prefixes) in sets {
            if prefixes.is_empty() {
                continue;
            }

            let alternation = prefixes
                .iter()
                .map(|p| regex::escape(p))
                .collect::<Vec<_>>()
                .join("|");

            let pattern = format!("(?i)^(?:{})/.+", alternation);
            let regex = Regex::new(&pattern).map_err(|e| {
                SemverGenError::config(format!(
                    "invalid branch prefix in convention set {:?}: {}",
                    category, e
                ))
            })?;

            patterns.push((category, regex));
        }

        Ok(BranchClassifier { patterns })
    }

    /// Classify a branch name. Unmatched names yield [Category::None].
    pub fn classify(&self, branch_name: &str) -> Category {
        for (category, regex) in &self.patterns {
            if regex.is_match(branch_name) {
                return *category;
            }
        }

        Category::None
    }
}
