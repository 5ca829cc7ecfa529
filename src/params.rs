use crate::domain::strategy::Bump;
use crate::error::{Result, SemverGenError};
use regex::Regex;
use semver::{Prerelease, Version};
use std::fmt;

/// Raw, unvalidated inputs as read from the CLI flags and the GitHub
/// Actions environment. `None` means the input was not provided.
#[derive(Debug, Default, Clone)]
pub struct RawInputs {
    pub commit_sha: Option<String>,
    pub bump: Option<String>,
    pub base_version: Option<String>,
    pub prefix: Option<String>,
    pub prerelease_id: Option<String>,
    pub main_branch: Option<String>,
    pub develop_branch: Option<String>,
    pub tag_message: Option<String>,
    pub auth_token: Option<String>,
    pub repository: Option<String>,
    pub dry_run: Option<String>,
    pub debug: Option<String>,
}

/// Validated run parameters. All validation happens before any git access.
#[derive(Debug, Clone)]
pub struct Params {
    pub commit_sha: Option<String>,
    pub bump: Bump,
    pub base_version: Option<Version>,
    pub prefix: String,
    pub prerelease_id: String,
    pub main_branch: String,
    pub develop_branch: String,
    pub tag_message: String,
    pub auth_token: Option<String>,
    pub owner: String,
    pub repository: String,
    pub dry_run: bool,
    pub debug: bool,
}

impl Params {
    pub fn from_inputs(inputs: RawInputs) -> Result<Self> {
        let commit_sha = match non_empty(inputs.commit_sha) {
            Some(sha) => {
                let valid = Regex::new(r"^[0-9a-f]{5,40}$")
                    .map(|re| re.is_match(&sha))
                    .unwrap_or(false);
                if !valid {
                    return Err(SemverGenError::config(format!(
                        "invalid commit-sha format: {}",
                        sha
                    )));
                }
                Some(sha)
            }
            None => None,
        };

        let bump = match non_empty(inputs.bump) {
            Some(raw) => raw.parse::<Bump>()?,
            None => Bump::Auto,
        };

        let base_version = match non_empty(inputs.base_version) {
            Some(raw) => Some(Version::parse(&raw).map_err(|e| {
                SemverGenError::config(format!("invalid base_version format '{}': {}", raw, e))
            })?),
            None => None,
        };

        let prerelease_id = non_empty(inputs.prerelease_id).unwrap_or_else(|| "pre".to_string());
        if Prerelease::new(&prerelease_id).is_err() || prerelease_id.contains('.') {
            return Err(SemverGenError::config(format!(
                "invalid prerelease_id: {}",
                prerelease_id
            )));
        }

        let dry_run = parse_bool(inputs.dry_run, "dry_run")?;
        let debug = parse_bool(inputs.debug, "debug")?;

        let auth_token = match non_empty(inputs.auth_token) {
            Some(token) => {
                let valid = Regex::new(r"^[0-9a-fA-F]{40}$")
                    .map(|re| re.is_match(&token))
                    .unwrap_or(false);
                if !valid {
                    return Err(SemverGenError::config(format!(
                        "invalid auth_token format: {}",
                        token
                    )));
                }
                Some(token)
            }
            None => None,
        };

        if auth_token.is_none() && !dry_run {
            return Err(SemverGenError::config(
                "auth_token is required when dry_run is false",
            ));
        }

        let (owner, repository) = match non_empty(inputs.repository) {
            Some(full) => {
                let (owner, name) = full.split_once('/').ok_or_else(|| {
                    SemverGenError::config(format!("invalid repository format: {}", full))
                })?;
                (owner.to_string(), name.to_string())
            }
            None if dry_run => (String::new(), String::new()),
            None => {
                return Err(SemverGenError::config(
                    "repository is required when dry_run is false",
                ))
            }
        };

        Ok(Params {
            commit_sha,
            bump,
            base_version,
            prefix: non_empty(inputs.prefix).unwrap_or_else(|| "v".to_string()),
            prerelease_id,
            main_branch: non_empty(inputs.main_branch).unwrap_or_else(|| "master".to_string()),
            develop_branch: non_empty(inputs.develop_branch)
                .unwrap_or_else(|| "develop".to_string()),
            tag_message: non_empty(inputs.tag_message).unwrap_or_else(|| "auto tag".to_string()),
            auth_token,
            owner,
            repository,
            dry_run,
            debug,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_bool(value: Option<String>, name: &str) -> Result<bool> {
    match non_empty(value) {
        Some(raw) => raw
            .parse::<bool>()
            .map_err(|_| SemverGenError::config(format!("invalid {} argument: {}", name, raw))),
        None => Ok(false),
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base_version = self
            .base_version
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_default();

        // Token deliberately omitted.
        write!(
            f,
            "commit sha: {:?}, bump: {:?}, base version: {:?}, prefix: {:?}, \
             prerelease id: {:?}, main branch: {:?}, develop branch: {:?}, \
             tag message: {:?}, owner: {}, repository: {}, dry run: {}, debug: {}",
            self.commit_sha.as_deref().unwrap_or(""),
            self.bump,
            base_version,
            self.prefix,
            self.prerelease_id,
            self.main_branch,
            self.develop_branch,
            self.tag_message,
            self.owner,
            self.repository,
            self.dry_run,
            self.debug,
        )
    }
}
