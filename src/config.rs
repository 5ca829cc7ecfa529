use crate::error::{Result, SemverGenError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Represents the complete configuration for semver-gen.
///
/// Currently this only holds the branch naming convention set; CI inputs
/// (prefix, branch names, tokens) come from the environment, not this file.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub conventions: Conventions,
}

/// Branch prefixes recognized per category.
///
/// The accepted prefix set has varied across teams (some use `hotfixes/`,
/// some `hotfix/`), so it is data rather than hard-coded patterns. The
/// defaults accept both singular and pluralized forms.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Conventions {
    #[serde(default = "default_bugfix_prefixes")]
    pub bugfix: Vec<String>,

    #[serde(default = "default_feature_prefixes")]
    pub feature: Vec<String>,

    #[serde(default = "default_major_prefixes")]
    pub major: Vec<String>,

    #[serde(default = "default_hotfix_prefixes")]
    pub hotfix: Vec<String>,

    #[serde(default = "default_docs_prefixes")]
    pub docs: Vec<String>,

    #[serde(default = "default_misc_prefixes")]
    pub misc: Vec<String>,

    #[serde(default = "default_resync_prefixes")]
    pub resync: Vec<String>,
}

fn default_bugfix_prefixes() -> Vec<String> {
    vec!["bugfix".to_string(), "bugfixes".to_string()]
}

fn default_feature_prefixes() -> Vec<String> {
    vec!["feature".to_string(), "features".to_string()]
}

fn default_major_prefixes() -> Vec<String> {
    vec!["major".to_string()]
}

fn default_hotfix_prefixes() -> Vec<String> {
    vec!["hotfix".to_string(), "hotfixes".to_string()]
}

fn default_docs_prefixes() -> Vec<String> {
    vec!["doc".to_string(), "docs".to_string()]
}

fn default_misc_prefixes() -> Vec<String> {
    vec!["misc".to_string()]
}

fn default_resync_prefixes() -> Vec<String> {
    vec!["resync".to_string()]
}

impl Default for Conventions {
    fn default() -> Self {
        Conventions {
            bugfix: default_bugfix_prefixes(),
            feature: default_feature_prefixes(),
            major: default_major_prefixes(),
            hotfix: default_hotfix_prefixes(),
            docs: default_docs_prefixes(),
            misc: default_misc_prefixes(),
            resync: default_resync_prefixes(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            conventions: Conventions::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `semvergen.toml` in current directory
/// 3. `.semvergen.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./semvergen.toml").exists() {
        fs::read_to_string("./semvergen.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".semvergen.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str)
        .map_err(|e| SemverGenError::config(format!("invalid configuration file: {}", e)))
}
