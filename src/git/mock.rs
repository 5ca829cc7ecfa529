use crate::error::{Result, SemverGenError};
use crate::git::{glob_to_regex, tag_matches, GitRepository};
use std::collections::HashMap;

/// Mock repository for testing without actual git operations.
///
/// Ancestor tags are stored per branch in nearest-first order, mirroring a
/// walk from the branch tip backwards through history.
pub struct MockRepository {
    is_repo: bool,
    current_branch: Option<String>,
    head_message: Option<String>,
    messages: HashMap<String, String>,
    latest_tag: Option<String>,
    ancestor_tags: HashMap<String, Vec<String>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            is_repo: true,
            current_branch: None,
            head_message: None,
            messages: HashMap::new(),
            latest_tag: None,
            ancestor_tags: HashMap::new(),
        }
    }

    pub fn set_is_repo(&mut self, is_repo: bool) {
        self.is_repo = is_repo;
    }

    pub fn set_current_branch(&mut self, branch: impl Into<String>) {
        self.current_branch = Some(branch.into());
    }

    pub fn set_head_message(&mut self, message: impl Into<String>) {
        self.head_message = Some(message.into());
    }

    pub fn add_commit_message(&mut self, sha: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(sha.into(), message.into());
    }

    pub fn set_latest_tag(&mut self, tag: impl Into<String>) {
        self.latest_tag = Some(tag.into());
    }

    /// Append a tag to a branch's history, nearest-first.
    pub fn push_ancestor_tag(&mut self, branch: impl Into<String>, tag: impl Into<String>) {
        self.ancestor_tags
            .entry(branch.into())
            .or_default()
            .push(tag.into());
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl GitRepository for MockRepository {
    fn is_repo(&self) -> bool {
        self.is_repo
    }

    fn current_branch(&self) -> Result<String> {
        self.current_branch
            .clone()
            .ok_or_else(|| SemverGenError::lookup("could not get current branch"))
    }

    fn commit_message(&self, sha: Option<&str>) -> Result<String> {
        let message = match sha {
            Some(sha) => self.messages.get(sha).cloned(),
            None => self.head_message.clone(),
        };

        message.ok_or_else(|| SemverGenError::lookup("could not get message from commit"))
    }

    fn latest_tag(&self) -> Result<Option<String>> {
        Ok(self.latest_tag.clone())
    }

    fn ancestor_tag(&self, include: &str, exclude: &str, branch: &str) -> Result<Option<String>> {
        let include_re = glob_to_regex(include)?;
        let exclude_re = if exclude.is_empty() {
            None
        } else {
            Some(glob_to_regex(exclude)?)
        };

        let tags = match self.ancestor_tags.get(branch) {
            Some(tags) => tags,
            None => return Ok(None),
        };

        Ok(tags
            .iter()
            .find(|n| tag_matches(n, &include_re, exclude_re.as_ref()))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_defaults() {
        let repo = MockRepository::default();
        assert!(repo.is_repo());
        assert!(repo.latest_tag().unwrap().is_none());
        assert!(repo.current_branch().is_err());
    }

    #[test]
    fn test_mock_repository_branch_and_messages() {
        let mut repo = MockRepository::new();
        repo.set_current_branch("develop");
        repo.set_head_message("head commit");
        repo.add_commit_message("abc123", "merge commit");

        assert_eq!(repo.current_branch().unwrap(), "develop");
        assert_eq!(repo.commit_message(None).unwrap(), "head commit");
        assert_eq!(repo.commit_message(Some("abc123")).unwrap(), "merge commit");
        assert!(repo.commit_message(Some("missing")).is_err());
    }

    #[test]
    fn test_mock_repository_latest_tag() {
        let mut repo = MockRepository::new();
        repo.set_latest_tag("v1.0.0");
        assert_eq!(repo.latest_tag().unwrap(), Some("v1.0.0".to_string()));
    }

    #[test]
    fn test_mock_repository_ancestor_nearest_first() {
        let mut repo = MockRepository::new();
        repo.push_ancestor_tag("develop", "v1.2.3-pre.4");
        repo.push_ancestor_tag("develop", "v1.2.2");

        let found = repo
            .ancestor_tag("v[0-9]*-pre*", "", "develop")
            .unwrap();
        assert_eq!(found, Some("v1.2.3-pre.4".to_string()));

        let released = repo
            .ancestor_tag("v[0-9]*", "v[0-9]*-pre*", "develop")
            .unwrap();
        assert_eq!(released, Some("v1.2.2".to_string()));
    }

    #[test]
    fn test_mock_repository_ancestor_unknown_branch() {
        let repo = MockRepository::new();
        assert_eq!(repo.ancestor_tag("v[0-9]*", "", "develop").unwrap(), None);
    }
}
