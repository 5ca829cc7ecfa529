//! Applies a bump decision to the repository's base version and produces
//! the run's [TagRecord].

use crate::analyzer::version_source;
use crate::domain::branch::{BranchClassifier, Category};
use crate::domain::strategy::{BumpComponent, BumpDecision, BumpMethod};
use crate::domain::tag::{self, TagRecord};
use crate::domain::version;
use crate::error::{Result, SemverGenError};
use crate::git::GitRepository;
use crate::params::Params;
use crate::ui;
use semver::Version;

/// Compute the next tag for one run.
///
/// `previous_tag` always reflects the git-derived base, even when a base
/// version override replaces the working version afterwards. Only the
/// ancestor-tag lookup is allowed to fail softly; every other error aborts.
pub fn compute_tag(
    repo: &dyn GitRepository,
    classifier: &BranchClassifier,
    decision: &BumpDecision,
    source_branch: &str,
    dest_branch: &str,
    params: &Params,
) -> Result<TagRecord> {
    let base = version_source::latest_version(repo, &params.prefix)?
        .unwrap_or_else(|| Version::new(0, 0, 0));

    let previous_tag = tag::format_tag(&params.prefix, &base);

    let from_git = params.base_version.is_none();
    let mut working = match &params.base_version {
        Some(explicit) => explicit.clone(),
        None => base,
    };

    let mut bumped = false;

    if from_git && wants(decision, BumpComponent::Major, BumpMethod::Major) {
        version::increment_major(&mut working);
        bumped = true;
    }

    if from_git && wants(decision, BumpComponent::Minor, BumpMethod::Minor) {
        version::increment_minor(&mut working);
        bumped = true;
    }

    // Hotfixes always land on the next patch, even over an explicit base.
    if (from_git && wants(decision, BumpComponent::Patch, BumpMethod::Patch))
        || decision.method == BumpMethod::Hotfix
    {
        version::increment_patch(&mut working);
        bumped = true;
    }

    working = reconcile_with_ancestor(repo, classifier, source_branch, dest_branch, params, working)?;

    let (semver_tag, is_prerelease) = match decision.method {
        BumpMethod::Build => {
            // Continue the build counter only when nothing numeric moved
            // this round; otherwise the counter restarts at 1.
            let counter = if bumped {
                0
            } else {
                version::build_counter(&working).unwrap_or(0)
            };

            let next =
                version::with_build_prerelease(&working, &params.prerelease_id, counter + 1)?;

            (tag::format_tag(&params.prefix, &next), true)
        }
        BumpMethod::Major | BumpMethod::Minor | BumpMethod::Patch => (
            tag::format_tag(&params.prefix, &working),
            !working.pre.is_empty(),
        ),
        BumpMethod::Hotfix | BumpMethod::Final => {
            (tag::format_finalized(&params.prefix, &working), false)
        }
    };

    let ancestor_tag = ancestor_output_tag(repo, dest_branch, params, is_prerelease)?;

    Ok(TagRecord {
        previous_tag,
        ancestor_tag,
        semver_tag,
        is_prerelease,
    })
}

fn wants(decision: &BumpDecision, component: BumpComponent, method: BumpMethod) -> bool {
    decision.component == Some(component) || decision.method == method
}

/// Doc and misc merges into develop must not re-increment the build counter
/// when the develop tip has since been finalized: if the nearest prerelease
/// ancestor finalizes to the same version, pick up where it left off.
fn reconcile_with_ancestor(
    repo: &dyn GitRepository,
    classifier: &BranchClassifier,
    source_branch: &str,
    dest_branch: &str,
    params: &Params,
    working: Version,
) -> Result<Version> {
    let category = classifier.classify(source_branch);
    if !matches!(category, Category::Docs | Category::Misc) || dest_branch != params.develop_branch
    {
        return Ok(working);
    }

    let include = version_source::prerelease_glob(&params.prefix, &params.prerelease_id);

    match version_source::ancestor_version(repo, &params.prefix, &include, "", dest_branch) {
        Ok(Some(ancestor)) if version::finalized(&ancestor) == version::finalized(&working) => {
            Ok(ancestor)
        }
        Ok(_) => Ok(working),
        Err(err @ SemverGenError::Parse(_)) => Err(err),
        Err(err) => {
            ui::display_debug(
                params.debug,
                &format!("ancestor reconciliation skipped: {}", err),
            );
            Ok(working)
        }
    }
}

/// Nearest ancestor tag on the destination branch matching the run's
/// prerelease class. A failed lookup is logged and yields an empty tag.
fn ancestor_output_tag(
    repo: &dyn GitRepository,
    dest_branch: &str,
    params: &Params,
    is_prerelease: bool,
) -> Result<String> {
    let pre_glob = version_source::prerelease_glob(&params.prefix, &params.prerelease_id);
    let (include, exclude) = if is_prerelease {
        (pre_glob, String::new())
    } else {
        (version_source::release_glob(&params.prefix), pre_glob)
    };

    match repo.ancestor_tag(&include, &exclude, dest_branch) {
        Ok(Some(raw)) => {
            // A found tag must still be valid semantic version text.
            version::parse_tag(&raw, &params.prefix)?;
            Ok(raw)
        }
        Ok(None) => Ok(String::new()),
        Err(err) => {
            ui::display_status(&format!("could not determine ancestor tag: {}", err));
            Ok(String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Conventions;
    use crate::domain::strategy::{determine_bump_strategy, Bump};
    use crate::git::MockRepository;
    use crate::params::{Params, RawInputs};

    fn params() -> Params {
        Params::from_inputs(RawInputs {
            dry_run: Some("true".to_string()),
            ..RawInputs::default()
        })
        .unwrap()
    }

    fn classifier() -> BranchClassifier {
        BranchClassifier::new(&Conventions::default()).unwrap()
    }

    fn compute(
        repo: &MockRepository,
        bump: Bump,
        source: &str,
        dest: &str,
        params: &Params,
    ) -> TagRecord {
        let classifier = classifier();
        let decision = determine_bump_strategy(
            bump,
            source,
            dest,
            &params.main_branch,
            &params.develop_branch,
            &classifier,
        );
        compute_tag(repo, &classifier, &decision, source, dest, params).unwrap()
    }

    #[test]
    fn test_no_tags_defaults_to_zero_base() {
        let repo = MockRepository::new();
        let record = compute(&repo, Bump::Auto, "feature/x", "develop", &params());

        assert_eq!(record.previous_tag, "v0.0.0");
        assert_eq!(record.semver_tag, "v0.1.0-pre.1");
        assert!(record.is_prerelease);
    }

    #[test]
    fn test_build_counter_continuation() {
        let mut repo = MockRepository::new();
        repo.set_latest_tag("v1.0.0-pre.1");

        let record = compute(&repo, Bump::Auto, "random", "develop", &params());
        assert_eq!(record.semver_tag, "v1.0.0-pre.2");
    }

    #[test]
    fn test_build_counter_resets_on_numeric_bump() {
        let mut repo = MockRepository::new();
        repo.set_latest_tag("v1.0.0-pre.7");

        let record = compute(&repo, Bump::Auto, "feature/x", "develop", &params());
        assert_eq!(record.semver_tag, "v1.1.0-pre.1");
    }

    #[test]
    fn test_finalize_strips_prerelease_without_bumping() {
        let mut repo = MockRepository::new();
        repo.set_latest_tag("v1.4.17-alpha.1");

        let record = compute(&repo, Bump::Auto, "develop", "master", &params());
        assert_eq!(record.previous_tag, "v1.4.17-alpha.1");
        assert_eq!(record.semver_tag, "v1.4.17");
        assert!(!record.is_prerelease);
    }

    #[test]
    fn test_hotfix_increments_patch_and_finalizes() {
        let mut repo = MockRepository::new();
        repo.set_latest_tag("v2.3.4");

        let record = compute(&repo, Bump::Auto, "hotfix/crash", "master", &params());
        assert_eq!(record.semver_tag, "v2.3.5");
        assert!(!record.is_prerelease);
    }

    #[test]
    fn test_explicit_patch_override_goes_through_build_pipeline() {
        let mut repo = MockRepository::new();
        repo.set_latest_tag("v0.2.1");

        let record = compute(&repo, Bump::Patch, "random", "somewhere", &params());
        assert_eq!(record.semver_tag, "v0.2.2-pre.1");
        assert!(record.is_prerelease);
    }

    #[test]
    fn test_major_bump_resets_lower_components() {
        let mut repo = MockRepository::new();
        repo.set_latest_tag("v1.2.3");

        let record = compute(&repo, Bump::Auto, "major/rewrite", "develop", &params());
        assert_eq!(record.semver_tag, "v2.0.0-pre.1");
    }

    #[test]
    fn test_base_version_override_decoupled_from_previous_tag() {
        let mut repo = MockRepository::new();
        repo.set_latest_tag("v1.0.0");

        let mut p = params();
        p.base_version = Some(Version::new(3, 0, 0));

        let record = compute(&repo, Bump::Auto, "feature/x", "develop", &p);
        assert_eq!(record.previous_tag, "v1.0.0");
        // Override is used as-is; numeric increments are skipped.
        assert_eq!(record.semver_tag, "v3.0.0-pre.1");
    }

    #[test]
    fn test_docs_reconciliation_picks_up_ancestor_counter() {
        let mut repo = MockRepository::new();
        repo.set_latest_tag("v1.2.3");
        repo.push_ancestor_tag("develop", "v1.2.3-pre.4");

        let record = compute(&repo, Bump::Auto, "docs/readme", "develop", &params());
        assert_eq!(record.semver_tag, "v1.2.3-pre.5");
    }

    #[test]
    fn test_docs_reconciliation_requires_equal_finalized_form() {
        let mut repo = MockRepository::new();
        repo.set_latest_tag("v1.2.3");
        repo.push_ancestor_tag("develop", "v1.2.2-pre.9");

        let record = compute(&repo, Bump::Auto, "docs/readme", "develop", &params());
        assert_eq!(record.semver_tag, "v1.2.3-pre.1");
    }

    #[test]
    fn test_reconciliation_not_applied_to_other_categories() {
        let mut repo = MockRepository::new();
        repo.set_latest_tag("v1.2.3");
        repo.push_ancestor_tag("develop", "v1.2.3-pre.4");

        let record = compute(&repo, Bump::Auto, "random", "develop", &params());
        assert_eq!(record.semver_tag, "v1.2.3-pre.1");
    }

    #[test]
    fn test_ancestor_output_for_prerelease_run() {
        let mut repo = MockRepository::new();
        repo.set_latest_tag("v1.0.0");
        repo.push_ancestor_tag("develop", "v0.9.0-pre.2");

        let record = compute(&repo, Bump::Auto, "feature/x", "develop", &params());
        assert!(record.is_prerelease);
        assert_eq!(record.ancestor_tag, "v0.9.0-pre.2");
    }

    #[test]
    fn test_ancestor_output_for_final_run_excludes_prereleases() {
        let mut repo = MockRepository::new();
        repo.set_latest_tag("v1.4.17-pre.1");
        repo.push_ancestor_tag("master", "v1.4.16-pre.3");
        repo.push_ancestor_tag("master", "v1.4.16");

        let record = compute(&repo, Bump::Auto, "develop", "master", &params());
        assert!(!record.is_prerelease);
        assert_eq!(record.ancestor_tag, "v1.4.16");
    }

    #[test]
    fn test_missing_ancestor_is_empty_not_error() {
        let repo = MockRepository::new();
        let record = compute(&repo, Bump::Auto, "feature/x", "develop", &params());
        assert_eq!(record.ancestor_tag, "");
    }

    #[test]
    fn test_malformed_latest_tag_is_fatal() {
        let mut repo = MockRepository::new();
        repo.set_latest_tag("vbroken");

        let classifier = classifier();
        let decision = BumpDecision::new(BumpMethod::Build, None);
        let result = compute_tag(&repo, &classifier, &decision, "x", "develop", &params());
        assert!(matches!(result, Err(SemverGenError::Parse(_))));
    }

    #[test]
    fn test_custom_prefix_and_prerelease_id() {
        let repo = MockRepository::new();
        let mut p = params();
        p.prefix = String::new();
        p.prerelease_id = "alpha".to_string();

        let record = compute(&repo, Bump::Auto, "bugfix/x", "develop", &p);
        assert_eq!(record.semver_tag, "0.0.1-alpha.1");
    }
}
