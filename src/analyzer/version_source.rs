//! Resolves tags from repository history into parsed versions.
//!
//! A missing tag is an explicit `None` (the computer substitutes the default
//! base version); a tag that exists but will not parse is always fatal.

use crate::domain::version;
use crate::error::Result;
use crate::git::GitRepository;
use semver::Version;

/// The most recently created tag reachable from the current position,
/// prefix-stripped and parsed. `None` when the repository has no tags yet.
pub fn latest_version(repo: &dyn GitRepository, prefix: &str) -> Result<Option<Version>> {
    match repo.latest_tag()? {
        Some(raw) => Ok(Some(version::parse_tag(&raw, prefix)?)),
        None => Ok(None),
    }
}

/// The nearest tag reachable from `branch` matching the include/exclude
/// glob pair, parsed. `None` when nothing matches.
pub fn ancestor_version(
    repo: &dyn GitRepository,
    prefix: &str,
    include: &str,
    exclude: &str,
    branch: &str,
) -> Result<Option<Version>> {
    match repo.ancestor_tag(include, exclude, branch)? {
        Some(raw) => Ok(Some(version::parse_tag(&raw, prefix)?)),
        None => Ok(None),
    }
}

/// Glob matching prerelease build tags, e.g. `v[0-9]*-pre*`.
pub fn prerelease_glob(prefix: &str, prerelease_id: &str) -> String {
    format!("{}[0-9]*-{}*", prefix, prerelease_id)
}

/// Glob matching any version tag, e.g. `v[0-9]*`.
pub fn release_glob(prefix: &str) -> String {
    format!("{}[0-9]*", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;

    #[test]
    fn test_latest_version_none_without_tags() {
        let repo = MockRepository::new();
        assert_eq!(latest_version(&repo, "v").unwrap(), None);
    }

    #[test]
    fn test_latest_version_parses_and_strips_prefix() {
        let mut repo = MockRepository::new();
        repo.set_latest_tag("v1.4.17-alpha.1");

        let version = latest_version(&repo, "v").unwrap().unwrap();
        assert_eq!(version.to_string(), "1.4.17-alpha.1");
    }

    #[test]
    fn test_latest_version_malformed_tag_is_fatal() {
        let mut repo = MockRepository::new();
        repo.set_latest_tag("vNext");

        assert!(latest_version(&repo, "v").is_err());
    }

    #[test]
    fn test_ancestor_version_respects_globs() {
        let mut repo = MockRepository::new();
        repo.push_ancestor_tag("develop", "v2.0.0-pre.3");
        repo.push_ancestor_tag("develop", "v1.9.0");

        let pre = ancestor_version(&repo, "v", &prerelease_glob("v", "pre"), "", "develop")
            .unwrap()
            .unwrap();
        assert_eq!(pre.to_string(), "2.0.0-pre.3");

        let released = ancestor_version(
            &repo,
            "v",
            &release_glob("v"),
            &prerelease_glob("v", "pre"),
            "develop",
        )
        .unwrap()
        .unwrap();
        assert_eq!(released.to_string(), "1.9.0");
    }

    #[test]
    fn test_glob_shapes() {
        assert_eq!(prerelease_glob("v", "alpha"), "v[0-9]*-alpha*");
        assert_eq!(release_glob("v"), "v[0-9]*");
    }
}
