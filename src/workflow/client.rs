//! A client of GitHub REST API and the calls made with it.

use std::{error::Error as _, fmt::Debug};

use reqwest::{RequestBuilder, Response, StatusCode, header};
use tracing::{debug, error, info};

use crate::{
    Error,
    framework::{StateError, StateResult},
    workflow::{Repository, WorkflowRun},
};

/// The public GitHub REST API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Talks to one GitHub REST API, optionally authenticated with a token.
#[derive(Clone)]
pub struct GitHubClient {
    api_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    /// Creates a client for `api_url`. One trailing `/` is ignored and an empty token counts as none.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(api_url: &str, token: Option<String>) -> Result<Self, Error> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_http_client(api_url, token, http))
    }

    /// Creates a client reusing a configured [`reqwest::Client`].
    pub fn with_http_client(api_url: &str, token: Option<String>, http: reqwest::Client) -> Self {
        Self {
            api_url: api_url.strip_suffix('/').unwrap_or(api_url).to_owned(),
            token: token.filter(|token| !token.is_empty()),
            http,
        }
    }

    /// The API base URL, with one trailing `/` removed.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Whether requests carry a token.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Builds a request for GitHub REST API.
    pub fn request_builder(&self, url: &str) -> RequestBuilder {
        let builder = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .header(header::USER_AGENT, USER_AGENT);

        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get(&self, url: &str) -> StateResult<Response> {
        debug!("requesting {url}…");

        self.request_builder(url).send().await.map_err(|err| {
            error!("failed to request {url}: {err}");
            StateError::classify(err.into())
        })
    }

    /// Fetches a workflow run of `repository`.
    ///
    /// # Errors
    ///
    /// Returns an error that instructs retrying or cancelling if the run cannot be fetched. Missing permissions,
    /// a missing repository and a missing run are told apart.
    pub async fn fetch_workflow_run(
        &self,
        repository: &Repository,
        run_id: u64,
    ) -> StateResult<WorkflowRun> {
        let url = format!("{}/repos/{repository}/actions/runs/{run_id}", self.api_url);
        debug!("fetching workflow run from {url}…");

        let response = self.get(&url).await?;
        match response.status() {
            status if status.is_success() => {}
            StatusCode::FORBIDDEN => {
                error!("forbidden to read workflow run at {url}");
                return Err(StateError::Cancelled(Error::Forbidden));
            }
            StatusCode::NOT_FOUND => {
                error!("workflow run not found at {url}");
                return Err(self.explain_missing_run(repository, run_id).await);
            }
            status => {
                error!("failed to fetch workflow run from {url}: {status}");
                return Err(StateError::classify(Error::Status { url, status }));
            }
        }

        match response.json::<WorkflowRun>().await {
            Ok(run) => {
                match run.referenced_workflows.len() {
                    1 => info!("fetched workflow run {run_id} referencing 1 workflow"),
                    count => info!("fetched workflow run {run_id} referencing {count} workflows"),
                }
                Ok(run)
            }
            Err(err) => {
                error!("failed to parse data from {url}: {err}");

                if let Some(source) = err.source() {
                    error!("{source}");
                }

                Err(StateError::classify(err.into()))
            }
        }
    }

    /// Tells a missing repository from a missing run, since the API answers 404 to both.
    async fn explain_missing_run(&self, repository: &Repository, run_id: u64) -> StateError {
        let url = format!("{}/repos/{repository}", self.api_url);
        debug!("checking whether {repository} is visible…");

        match self.get(&url).await {
            Ok(response) if response.status() == StatusCode::NOT_FOUND => {
                StateError::Cancelled(Error::RepositoryNotFound {
                    repository: repository.to_string(),
                    authenticated: self.is_authenticated(),
                })
            }
            Ok(_) => StateError::Cancelled(Error::RunNotFound(run_id)),
            Err(err) => err,
        }
    }
}
