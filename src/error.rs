use std::fmt::Write as _;

use reqwest::StatusCode;
use thiserror::Error;

use crate::workflow::ReusableWorkflow;

const PERMISSIONS_DOCS: &str = "https://docs.github.com/en/actions/security-guides/automatic-token-authentication#modifying-the-permissions-for-the-github_token";

/// Errors raised while resolving a reusable workflow version.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    /// The value is not an `owner/name` GitHub repository.
    #[error("'{0}' is not a valid GitHub repository name")]
    InvalidRepository(String),

    /// A referenced workflow path does not point into `.github/workflows/`.
    #[error("unexpected reusable workflow path '{0}'")]
    UnexpectedWorkflowPath(String),

    /// The token lacks `actions: read`.
    #[error(
        "Ensure that GitHub job has `permissions: actions: read`. GitHub API call 403 forbidden\n{}",
        PERMISSIONS_DOCS
    )]
    Forbidden,

    /// The caller repository cannot be seen with the current credentials.
    #[error("repository '{repository}' not found. {}", not_found_hint(.authenticated))]
    RepositoryNotFound {
        /// The repository that was looked up.
        repository: String,
        /// Whether a token was sent along.
        authenticated: bool,
    },

    /// The repository exists but the run does not.
    #[error("workflow run not found. Check if run ID {0} is valid")]
    RunNotFound(u64),

    /// The API answered with an unexpected status.
    #[error("{url} returned {status}")]
    Status {
        /// The requested URL.
        url: String,
        /// The status of the response.
        status: StatusCode,
    },

    /// The run references no matching reusable workflow.
    #[error("no reference found for file '{file_name}' in repository '{repository}'")]
    NoReference {
        /// The reusable workflow repository.
        repository: String,
        /// The reusable workflow file name.
        file_name: String,
    },

    /// The run references more than one version of the reusable workflow.
    #[error(
        "cannot resolve multiple versions found for file '{file_name}' in repository '{repository}':{}",
        list_candidates(.candidates)
    )]
    MultipleVersions {
        /// The reusable workflow repository.
        repository: String,
        /// The reusable workflow file name.
        file_name: String,
        /// Every distinct version found, ordered by ref then SHA.
        candidates: Vec<ReusableWorkflow>,
    },

    /// The request failed before a response arrived, or the body could not be decoded.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// Writing the step output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request(err) => err.is_connect() || err.is_timeout() || err.is_decode(),
            Self::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

fn not_found_hint(authenticated: &bool) -> &'static str {
    if *authenticated {
        "Check if `github-token` input has correct permissions"
    } else {
        "If repository is private, pass `github-token` input to authenticate to GitHub"
    }
}

fn list_candidates(candidates: &[ReusableWorkflow]) -> String {
    candidates
        .iter()
        .fold(String::new(), |mut message, workflow| {
            let _ = write!(message, "\n• {} ({})", workflow.git_ref, workflow.sha);
            message
        })
}
