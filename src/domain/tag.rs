use crate::domain::version;
use semver::Version;

/// The output of one run. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    /// Tag the repository was at before this run, prefix included.
    pub previous_tag: String,
    /// Nearest matching ancestor tag on the destination branch; empty when
    /// none could be determined.
    pub ancestor_tag: String,
    /// The newly computed tag, prefix included.
    pub semver_tag: String,
    /// Whether the computed tag is a prerelease build.
    pub is_prerelease: bool,
}

/// Render a version with the configured prefix.
pub fn format_tag(prefix: &str, version: &Version) -> String {
    format!("{}{}", prefix, version)
}

/// Render the finalized form (prerelease and build metadata stripped).
pub fn format_finalized(prefix: &str, version: &Version) -> String {
    format!("{}{}", prefix, version::finalized(version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tag() {
        let v = Version::parse("1.2.3-pre.1").unwrap();
        assert_eq!(format_tag("v", &v), "v1.2.3-pre.1");
    }

    #[test]
    fn test_format_tag_empty_prefix() {
        let v = Version::new(1, 2, 3);
        assert_eq!(format_tag("", &v), "1.2.3");
    }

    #[test]
    fn test_format_finalized_strips_prerelease() {
        let v = Version::parse("1.2.3-pre.1+meta").unwrap();
        assert_eq!(format_finalized("v", &v), "v1.2.3");
    }

    #[test]
    fn test_round_trip() {
        let v = Version::parse("2.0.1-alpha.4").unwrap();
        let rendered = format_tag("v", &v);
        let reparsed = version::parse_tag(&rendered, "v").unwrap();
        assert_eq!(reparsed, v);
    }
}
