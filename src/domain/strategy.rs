use crate::domain::branch::{BranchClassifier, Category};
use crate::error::SemverGenError;
use std::fmt;
use std::str::FromStr;

/// Explicit bump override accepted from the CI inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bump {
    #[default]
    Auto,
    Major,
    Minor,
    Patch,
}

impl FromStr for Bump {
    type Err = SemverGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Bump::Auto),
            "major" => Ok(Bump::Major),
            "minor" => Ok(Bump::Minor),
            "patch" => Ok(Bump::Patch),
            other => Err(SemverGenError::config(format!(
                "invalid bump value: {}",
                other
            ))),
        }
    }
}

/// Coarse action applied to the version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpMethod {
    Build,
    Major,
    Minor,
    Patch,
    Hotfix,
    Final,
}

impl fmt::Display for BumpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpMethod::Build => "build",
            BumpMethod::Major => "major",
            BumpMethod::Minor => "minor",
            BumpMethod::Patch => "patch",
            BumpMethod::Hotfix => "hotfix",
            BumpMethod::Final => "final",
        };
        write!(f, "{}", name)
    }
}

/// Which numeric field to increment, independent of the method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpComponent {
    Major,
    Minor,
    Patch,
}

/// The resolved bump strategy for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BumpDecision {
    pub method: BumpMethod,
    pub component: Option<BumpComponent>,
}

impl BumpDecision {
    pub fn new(method: BumpMethod, component: Option<BumpComponent>) -> Self {
        BumpDecision { method, component }
    }
}

/// Decide the bump strategy from the explicit override and the branch pair.
///
/// Explicit major/minor/patch overrides flow through the build pipeline with
/// the matching component, so the result still carries a fresh prerelease
/// counter. In auto mode the rules are evaluated in fixed priority order and
/// the first match wins. Pure function: no I/O, no randomness.
pub fn determine_bump_strategy(
    bump: Bump,
    source_branch: &str,
    dest_branch: &str,
    main_branch: &str,
    develop_branch: &str,
    classifier: &BranchClassifier,
) -> BumpDecision {
    match bump {
        Bump::Major => return BumpDecision::new(BumpMethod::Build, Some(BumpComponent::Major)),
        Bump::Minor => return BumpDecision::new(BumpMethod::Build, Some(BumpComponent::Minor)),
        Bump::Patch => return BumpDecision::new(BumpMethod::Build, Some(BumpComponent::Patch)),
        Bump::Auto => {}
    }

    let category = classifier.classify(source_branch);
    let into_develop = dest_branch == develop_branch;
    let into_main = dest_branch == main_branch;

    match category {
        Category::Bugfix if into_develop => {
            BumpDecision::new(BumpMethod::Build, Some(BumpComponent::Patch))
        }
        Category::Docs if into_develop => BumpDecision::new(BumpMethod::Build, None),
        Category::Feature if into_develop => {
            BumpDecision::new(BumpMethod::Build, Some(BumpComponent::Minor))
        }
        Category::Major if into_develop => {
            BumpDecision::new(BumpMethod::Build, Some(BumpComponent::Major))
        }
        Category::Misc if into_develop => BumpDecision::new(BumpMethod::Build, None),
        Category::Hotfix if into_main => BumpDecision::new(BumpMethod::Hotfix, None),
        Category::Resync if into_develop => {
            BumpDecision::new(BumpMethod::Build, Some(BumpComponent::Patch))
        }
        _ if source_branch == develop_branch && into_main => {
            BumpDecision::new(BumpMethod::Final, None)
        }
        _ => BumpDecision::new(BumpMethod::Build, None),
    }
}
