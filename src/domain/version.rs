//! Helpers over `semver::Version` for tag parsing and increments.
//!
//! The `semver` crate gives us parsing, ordering and prerelease precedence;
//! this module adds the increment and finalize operations the tag pipeline
//! needs, plus prefix-aware tag parsing.

use crate::error::{Result, SemverGenError};
use semver::{BuildMetadata, Prerelease, Version};

/// Parse a tag string into a version, stripping `prefix` when it is anchored
/// at the start. A tag that exists but does not parse is a hard error.
pub fn parse_tag(raw: &str, prefix: &str) -> Result<Version> {
    let stripped = raw.strip_prefix(prefix).unwrap_or(raw);

    Version::parse(stripped).map_err(|e| {
        SemverGenError::parse(format!(
            "tag '{}' is not valid semantic version text: {}",
            raw, e
        ))
    })
}

/// Increment the major component; minor and patch reset, prerelease and
/// build metadata are cleared.
pub fn increment_major(version: &mut Version) {
    version.major += 1;
    version.minor = 0;
    version.patch = 0;
    version.pre = Prerelease::EMPTY;
    version.build = BuildMetadata::EMPTY;
}

/// Increment the minor component; patch resets, prerelease and build
/// metadata are cleared.
pub fn increment_minor(version: &mut Version) {
    version.minor += 1;
    version.patch = 0;
    version.pre = Prerelease::EMPTY;
    version.build = BuildMetadata::EMPTY;
}

/// Increment the patch component; prerelease and build metadata are cleared.
pub fn increment_patch(version: &mut Version) {
    version.patch += 1;
    version.pre = Prerelease::EMPTY;
    version.build = BuildMetadata::EMPTY;
}

/// The finalized form: prerelease and build metadata stripped.
pub fn finalized(version: &Version) -> Version {
    Version::new(version.major, version.minor, version.patch)
}

/// Numeric build counter from a `<id>.<counter>` prerelease sequence.
///
/// Returns `None` when the sequence has fewer than two identifiers. A
/// non-numeric second identifier counts as zero, matching how numeric
/// prerelease precedence treats alphanumeric identifiers.
pub fn build_counter(version: &Version) -> Option<u64> {
    let mut parts = version.pre.split('.');
    parts.next()?;
    let counter = parts.next()?;

    Some(counter.parse::<u64>().unwrap_or(0))
}

/// Replace the prerelease sequence with `<id>.<counter>` and clear build
/// metadata. The numeric triple is left untouched.
pub fn with_build_prerelease(version: &Version, id: &str, counter: u64) -> Result<Version> {
    let mut next = version.clone();

    next.pre = Prerelease::new(&format!("{}.{}", id, counter)).map_err(|e| {
        SemverGenError::parse(format!("invalid prerelease identifier '{}': {}", id, e))
    })?;
    next.build = BuildMetadata::EMPTY;

    Ok(next)
}
