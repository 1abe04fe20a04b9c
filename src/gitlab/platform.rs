//! GitLab API client.
use reqwest::header::ACCEPT;

use crate::config::MirrorConfig;
use crate::errors::{MirrorError, MirrorErrorKind};
use crate::gitlab::repo::GitlabProject;

/// Number of projects requested per listing page.
const PER_PAGE: usize = 100;

/// Client for the GitLab projects API.
#[derive(Debug, Clone)]
pub struct GitlabClient {
    /// GitLab base URL without trailing slash.
    base_url: String,

    /// Private token sent with every request.
    token: String,

    /// Reqwest client.
    client: reqwest::Client,
}

impl GitlabClient {
    /// Create a new GitlabClient from the process configuration.
    pub fn new(config: &MirrorConfig) -> Self {
        Self::with_base(config.gitlab_url.clone(), config.gitlab_token.clone())
    }

    /// Create a new GitlabClient against an explicit base URL.
    pub(crate) fn with_base(base_url: String, token: String) -> Self {
        Self {
            base_url,
            token,
            client: reqwest::Client::new(),
        }
    }

    /// List every project visible to the configured token.
    ///
    /// Iterates the page-numbered listing endpoint in ascending id
    /// order until a page comes back shorter than the page size. The
    /// returned order is the order the API produced.
    /// # Errors
    /// Error on the first non-success response; there is no
    /// partial-result tolerance at this stage.
    pub async fn list_all_projects(&self) -> Result<Vec<GitlabProject>, MirrorError> {
        let url = format!("{}/api/v4/projects", self.base_url);
        let per_page = PER_PAGE.to_string();
        let mut page: usize = 1;
        let mut all_projects = vec![];
        loop {
            let page_str = page.to_string();
            let response = self
                .client
                .get(&url)
                .header("PRIVATE-TOKEN", &self.token)
                .header(ACCEPT, "application/json")
                .query(&[
                    ("simple", "true"),
                    ("membership", "false"),
                    ("per_page", per_page.as_str()),
                    ("page", page_str.as_str()),
                    ("order_by", "id"),
                    ("sort", "asc"),
                ])
                .send()
                .await?;
            if !response.status().is_success() {
                let text = response.text().await?;
                return Err(MirrorError::new(MirrorErrorKind::Http).with_text(&text));
            }
            let text = response.text().await?;
            let batch: Vec<GitlabProject> = serde_json::from_str(&text)?;
            log::info!("requested gitlab (page {}): {} projects", page, batch.len());
            let batch_len = batch.len();
            all_projects.extend(batch);
            if batch_len < PER_PAGE {
                break;
            }
            page += 1;
        }
        Ok(all_projects)
    }
}
