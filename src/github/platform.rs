//! GitHub API client.
use std::pin::Pin;

use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;

use super::{GITHUB_API_HEADER, GITHUB_API_URL, GITHUB_API_VERSION, GITHUB_URL};
use crate::config::MirrorConfig;
use crate::errors::{MirrorError, MirrorErrorKind};
use crate::github::repo::{CreatedRepo, NewRepo};

/// Result of a repository-creation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoCreation {
    /// The repository was freshly created.
    Created(String),

    /// A repository of that name already existed and is reused.
    Reused(String),
}

impl RepoCreation {
    /// Clone URL of the repository, created or reused.
    pub fn clone_url(&self) -> &str {
        match self {
            RepoCreation::Created(url) | RepoCreation::Reused(url) => url,
        }
    }
}

/// Future returned by [`Destination::create_repo`].
pub type CreateFuture<'a> =
    Pin<Box<dyn std::future::Future<Output = Result<RepoCreation, MirrorError>> + Send + 'a>>;

/// Destination host able to create (or reuse) repositories.
pub trait Destination: Send + Sync {
    /// Ensure a repository of this name exists and return its clone URL.
    fn create_repo(&self, name: &str, description: &str, private: bool) -> CreateFuture<'_>;
}

/// Client for the GitHub organization repositories API.
#[derive(Debug, Clone)]
pub struct GithubClient {
    /// API base, `https://api.github.com` in production.
    api_base: String,

    /// Organization receiving the mirrors.
    org: String,

    /// Bearer token.
    token: String,

    /// Reqwest client.
    client: reqwest::Client,
}

impl GithubClient {
    /// Create a new GithubClient from the process configuration.
    pub fn new(config: &MirrorConfig) -> Self {
        Self::with_api_base(
            format!("https://{GITHUB_API_URL}"),
            config.github_org.clone(),
            config.github_token.clone(),
        )
    }

    /// Create a new GithubClient against an explicit API base.
    pub(crate) fn with_api_base(api_base: String, org: String, token: String) -> Self {
        Self {
            api_base,
            org,
            token,
            client: reqwest::Client::new(),
        }
    }
}

impl Destination for GithubClient {
    fn create_repo(&self, name: &str, description: &str, private: bool) -> CreateFuture<'_> {
        let name = name.to_string();
        let description = description.to_string();
        let token = self.token.clone();
        let client = self.client.clone();
        Box::pin(async move {
            let url = format!("{}/orgs/{}/repos", self.api_base, self.org);
            let json_body = NewRepo {
                name: name.clone(),
                description,
                private,
                auto_init: false,
            };
            let request = client
                .post(&url)
                .header(AUTHORIZATION, format!("Bearer {token}"))
                .header(ACCEPT, "application/vnd.github+json")
                .header(USER_AGENT, "reqwest")
                .header(GITHUB_API_HEADER, GITHUB_API_VERSION)
                .json(&json_body)
                .send();

            let response = request.await?;
            let status = response.status();
            if status == StatusCode::UNPROCESSABLE_ENTITY {
                let text = response.text().await?;
                if text.contains("name already exists") {
                    // GitHub reports a name collision; the clone URL is
                    // deterministic, so reruns are idempotent.
                    return Ok(RepoCreation::Reused(format!(
                        "https://{}/{}/{}.git",
                        GITHUB_URL, self.org, name
                    )));
                }
                return Err(MirrorError::new(MirrorErrorKind::Http).with_text(&text));
            }
            if !status.is_success() {
                let text = response.text().await?;
                return Err(MirrorError::new(MirrorErrorKind::Http).with_text(&text));
            }
            let text = response.text().await?;
            let created: CreatedRepo = serde_json::from_str(&text)?;
            Ok(RepoCreation::Created(created.clone_url))
        })
    }
}
