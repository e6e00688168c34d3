use std::time::Duration;

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::types::{GitHubCommitDto, WorkflowRunsPage};
use crate::auth::Token;
use crate::error::{Result, ShadowOpsError};
use crate::models::WorkflowRun;

const USER_AGENT: &str = concat!("shadowops/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";

pub struct GitHubClient {
    client: Client,
    api_url: Url,
    token: Option<Token>,
}

impl GitHubClient {
    pub fn new(base_url: &str, token: Option<Token>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(API_VERSION),
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ShadowOpsError::Config(format!("Failed to create HTTP client: {e}")))?;

        let api_url = Url::parse(base_url)
            .map_err(|e| ShadowOpsError::Config(format!("Invalid base URL: {e}")))?;

        if api_url.cannot_be_a_base() {
            return Err(ShadowOpsError::Config(format!(
                "Invalid base URL: {base_url}"
            )));
        }

        Ok(Self {
            client,
            api_url,
            token,
        })
    }

    fn auth_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = &self.token {
            request.bearer_auth(token.as_str())
        } else {
            request
        }
    }

    /// `{api_url}/repos/{owner}/{repo}/{path...}` with each segment escaped.
    fn repo_url(&self, owner: &str, repo: &str, path: &[&str]) -> Result<Url> {
        if owner.is_empty() || repo.is_empty() {
            return Err(ShadowOpsError::Config(
                "Repository owner and name must not be empty".to_string(),
            ));
        }

        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| ShadowOpsError::Config("Invalid API base URL".to_string()))?
            .pop_if_empty()
            .extend(["repos", owner, repo])
            .extend(path);

        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, per_page: u32) -> Result<T> {
        debug!("GET {url}");

        let request = self
            .auth_request(self.client.get(url))
            .query(&[("per_page", per_page)]);
        let response = Self::check_status(request.send().await?).await?;

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ShadowOpsError::Api(format!(
            "GitHub returned {status}: {body}"
        )))
    }

    /// Fetch the first page of workflow runs, most recent first.
    pub async fn fetch_workflow_runs(
        &self,
        owner: &str,
        repo: &str,
        per_page: u32,
    ) -> Result<Vec<WorkflowRun>> {
        let url = self.repo_url(owner, repo, &["actions", "runs"])?;
        let page: WorkflowRunsPage = self.get_json(url, per_page).await?;

        debug!(
            "GitHub reports {} workflow runs, received {}",
            page.total_count,
            page.workflow_runs.len()
        );

        Ok(page.workflow_runs)
    }

    /// Fetch the first page of commits on the default branch.
    pub async fn fetch_commits(
        &self,
        owner: &str,
        repo: &str,
        per_page: u32,
    ) -> Result<Vec<GitHubCommitDto>> {
        let url = self.repo_url(owner, repo, &["commits"])?;
        self.get_json(url, per_page).await
    }
}
