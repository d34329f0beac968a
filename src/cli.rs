//! Command-line interface.

#![cfg(feature = "cli")]

use std::path::Path;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::debug;

use crate::{
    framework::Retrier,
    transactions::{Query, resolve_with_retries, write_output},
    workflow::{
        Repository, ReusableWorkflow,
        client::{DEFAULT_API_URL, GitHubClient},
    },
};

/// Get commit SHA that GitHub Actions reusable workflow was called with.
///
/// When a reusable workflow is called, the `github` context is always associated with the caller
/// workflow. A reusable workflow that checks out files from its own repository needs to know what
/// version it was called with.
///
/// Reads `GH_TOKEN` for authentication and appends `sha=<sha>` to `GITHUB_OUTPUT` when set.
#[derive(Debug, Parser)]
#[command(name = "get-workflow-version", version)]
pub struct Cli {
    /// Caller workflow GitHub repository (e.g. "octocat/Hello-World")
    pub caller_repository: Repository,

    /// GitHub workflow run ID (e.g. 8938022468)
    pub caller_run_id: u64,

    /// Reusable workflow GitHub repository (e.g. "canonical/data-platform-workflows")
    pub reusable_workflow_repository: String,

    /// Reusable workflow file name (e.g. "build_charm.yaml")
    pub reusable_workflow_file_name: String,

    /// GitHub REST API URL (e.g. "https://api.github.com")
    #[arg(default_value = DEFAULT_API_URL)]
    pub github_api_url: String,
}

impl Cli {
    /// The resolution this invocation asks for.
    pub fn query(&self) -> Query {
        Query {
            caller_repository: self.caller_repository.clone(),
            run_id: self.caller_run_id,
            repository: self.reusable_workflow_repository.clone(),
            file_name: self.reusable_workflow_file_name.clone(),
        }
    }

    /// Resolves the version and reports it on stdout and in the step output file.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be resolved or the step output cannot be written.
    pub async fn execute(
        self,
        token: Option<String>,
        output: Option<&Path>,
        retrier: Retrier,
    ) -> Result<ReusableWorkflow> {
        let client = GitHubClient::new(&self.github_api_url, token)
            .context("failed to initialize the GitHub client")?;
        debug!("using {client:?}");

        let query = self.query();
        let workflow = resolve_with_retries(&client, &query, &retrier).await?;
        println!(
            "Reusable workflow version: {} (ref: {})",
            workflow.sha, workflow.git_ref
        );

        if let Some(output) = output {
            write_output(output, &workflow)
                .await
                .with_context(|| format!("failed to write step output to {}", output.display()))?;
        }

        Ok(workflow)
    }
}
