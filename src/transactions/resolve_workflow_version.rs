use std::{collections::HashSet, fmt::Display};

use tracing::{debug, error, info};

use crate::{
    Error,
    framework::{Retrier, StateError, StateResult},
    workflow::{Repository, ReusableWorkflow, WorkflowRun, client::GitHubClient},
};

/// Asks which version of a reusable workflow a caller run was pinned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// The repository of the caller workflow, e.g. `octocat/Hello-World`.
    pub caller_repository: Repository,
    /// The caller workflow run, e.g. `8938022468`.
    pub run_id: u64,
    /// The repository of the reusable workflow, e.g. `canonical/data-platform-workflows`.
    pub repository: String,
    /// The file name of the reusable workflow, e.g. `build_charm.yaml`.
    pub file_name: String,
}

impl Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} in {}#{}",
            self.repository, self.file_name, self.caller_repository, self.run_id
        )
    }
}

/// Picks the only version of `file_name` in `repository` among the workflows a run references.
///
/// Identical references count once.
///
/// # Errors
///
/// Returns an error if a referenced path cannot be parsed, or if no version or more than one version is found.
pub fn select_workflow(
    run: WorkflowRun,
    repository: &str,
    file_name: &str,
) -> Result<ReusableWorkflow, Error> {
    let workflows = run
        .referenced_workflows
        .into_iter()
        .map(ReusableWorkflow::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    debug!(
        "run {} references {} workflows: {workflows:?}",
        run.id,
        workflows.len()
    );

    let mut candidates = workflows
        .into_iter()
        .filter(|workflow| workflow.is(repository, file_name))
        .collect::<HashSet<_>>()
        .into_iter()
        .collect::<Vec<_>>();

    match candidates.len() {
        0 => Err(Error::NoReference {
            repository: repository.to_owned(),
            file_name: file_name.to_owned(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => {
            candidates.sort_by(|a, b| (&a.git_ref, &a.sha).cmp(&(&b.git_ref, &b.sha)));
            Err(Error::MultipleVersions {
                repository: repository.to_owned(),
                file_name: file_name.to_owned(),
                candidates,
            })
        }
    }
}

/// Fetches the caller run once and resolves the reusable workflow version from it.
///
/// # Errors
///
/// Returns an error that instructs retrying or cancelling. Only failures to reach the API are retryable.
pub async fn resolve_workflow_version(
    client: &GitHubClient,
    query: &Query,
) -> StateResult<ReusableWorkflow> {
    let run = client
        .fetch_workflow_run(&query.caller_repository, query.run_id)
        .await?;

    match select_workflow(run, &query.repository, &query.file_name) {
        Ok(workflow) => {
            info!("resolved {query} to {workflow}");
            Ok(workflow)
        }
        Err(err) => {
            error!("failed to resolve {query}: {err}");
            Err(StateError::Cancelled(err))
        }
    }
}

/// Runs [`resolve_workflow_version`] inside a [`Retrier`].
///
/// # Errors
///
/// Returns the last error if resolution is cancelled or retried for too many times.
pub async fn resolve_with_retries(
    client: &GitHubClient,
    query: &Query,
    retrier: &Retrier,
) -> Result<ReusableWorkflow, Error> {
    retrier
        .run(query, move || resolve_workflow_version(client, query))
        .await
}
