//! Data models of GitHub Actions workflows.

use std::fmt::Display;

use regex::Regex;
use serde::Deserialize;

use crate::{Error, static_lazy_lock};

#[cfg(feature = "workflow")]
pub mod client;
mod repository;

pub use repository::Repository;

static_lazy_lock! {
    WORKFLOW_PATH: Regex = Regex::new(
        r"^(?<repository>.*?)/\.github/workflows/(?<file_name>.*?)@(?<ref>.*?)$"
    ).expect("workflow path pattern is valid");
}

/// Represents a GitHub Actions workflow run from GitHub REST API.
#[derive(Debug, Deserialize, Clone)]
pub struct WorkflowRun {
    pub id: u64,
    #[serde(default)]
    pub referenced_workflows: Vec<ReferencedWorkflow>,
}

/// Represents a reusable workflow referenced by a run, as GitHub REST API reports it.
#[derive(Debug, Deserialize, Clone)]
pub struct ReferencedWorkflow {
    /// Looks like `octo-org/workflows/.github/workflows/build.yaml@v1`.
    pub path: String,
    pub sha: String,
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
}

/// A reusable workflow pinned to a commit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReusableWorkflow {
    /// The commit the workflow was called at.
    pub sha: String,
    /// The repository the workflow lives in, e.g. `octo-org/workflows`.
    pub repository: String,
    /// The file name under `.github/workflows/`, e.g. `build.yaml`.
    pub file_name: String,
    /// The ref the caller wrote after `@`.
    pub git_ref: String,
}

impl ReusableWorkflow {
    /// Whether this is the workflow `file_name` in `repository`. Comparisons are exact.
    pub fn is(&self, repository: &str, file_name: &str) -> bool {
        self.repository == repository && self.file_name == file_name
    }
}

impl TryFrom<ReferencedWorkflow> for ReusableWorkflow {
    type Error = Error;

    fn try_from(referenced: ReferencedWorkflow) -> Result<Self, Self::Error> {
        let Some(captures) = WORKFLOW_PATH.captures(&referenced.path) else {
            return Err(Error::UnexpectedWorkflowPath(referenced.path));
        };

        Ok(Self {
            repository: captures["repository"].to_owned(),
            file_name: captures["file_name"].to_owned(),
            git_ref: captures["ref"].to_owned(),
            sha: referenced.sha,
        })
    }
}

impl Display for ReusableWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/.github/workflows/{}@{} ({})",
            self.repository, self.file_name, self.git_ref, self.sha
        )
    }
}
