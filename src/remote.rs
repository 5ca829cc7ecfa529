//! GitHub REST client for tag creation.
//!
//! Creating a tag is two calls: create the tag object, then push the ref
//! pointing at it. Either call failing is an overall failure; no retries.

use crate::error::{Result, SemverGenError};
use serde::{Deserialize, Serialize};

const DEFAULT_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("semver-gen/", env!("CARGO_PKG_VERSION"));

pub struct GitHubClient {
    http: reqwest::blocking::Client,
    api_url: String,
    token: String,
    owner: String,
    repository: String,
}

#[derive(Serialize)]
struct CreateTagRequest<'a> {
    tag: &'a str,
    message: &'a str,
    object: &'a str,
    #[serde(rename = "type")]
    object_type: &'a str,
}

#[derive(Deserialize)]
struct CreateTagResponse {
    sha: String,
}

#[derive(Serialize)]
struct CreateRefRequest<'a> {
    #[serde(rename = "ref")]
    reference: String,
    sha: &'a str,
}

impl GitHubClient {
    pub fn new(
        token: impl Into<String>,
        owner: impl Into<String>,
        repository: impl Into<String>,
    ) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SemverGenError::remote(format!("failed to build http client: {}", e)))?;

        Ok(GitHubClient {
            http,
            api_url: DEFAULT_API_URL.to_string(),
            token: token.into(),
            owner: owner.into(),
            repository: repository.into(),
        })
    }

    /// Point the client at a different API root, e.g. a GHES installation.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Create an annotated tag on `commit_sha` and push its ref.
    pub fn create_tag(&self, commit_sha: &str, tag: &str, message: &str) -> Result<()> {
        let created = self.create_tag_object(commit_sha, tag, message)?;
        self.create_tag_ref(tag, &created.sha)?;

        Ok(())
    }

    fn create_tag_object(
        &self,
        commit_sha: &str,
        tag: &str,
        message: &str,
    ) -> Result<CreateTagResponse> {
        let url = format!(
            "{}/repos/{}/{}/git/tags",
            self.api_url, self.owner, self.repository
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .json(&CreateTagRequest {
                tag,
                message,
                object: commit_sha,
                object_type: "commit",
            })
            .send()
            .map_err(|e| SemverGenError::remote(format!("failed to create tag '{}': {}", tag, e)))?;

        if response.status().as_u16() != 201 {
            return Err(SemverGenError::remote(format!(
                "failed to create tag '{}': status code {}",
                tag,
                response.status().as_u16()
            )));
        }

        response.json().map_err(|e| {
            SemverGenError::remote(format!("failed to read tag response for '{}': {}", tag, e))
        })
    }

    fn create_tag_ref(&self, tag: &str, object_sha: &str) -> Result<()> {
        let url = format!(
            "{}/repos/{}/{}/git/refs",
            self.api_url, self.owner, self.repository
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .json(&CreateRefRequest {
                reference: format!("refs/tags/{}", tag),
                sha: object_sha,
            })
            .send()
            .map_err(|e| SemverGenError::remote(format!("failed to push tag '{}': {}", tag, e)))?;

        if response.status().as_u16() != 201 {
            return Err(SemverGenError::remote(format!(
                "failed to push tag '{}': status code {}",
                tag,
                response.status().as_u16()
            )));
        }

        Ok(())
    }
}
