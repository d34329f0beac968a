//! Defines the environment variables to use.

#![cfg(feature = "env")]

use std::{env, path::PathBuf};

use crate::static_lazy_lock;

/// Parses an environment variable from [`String`] to something else, wrapping any error in [`anyhow::Error`].
#[macro_export]
macro_rules! parse_env {
    ($key:expr => |$var:ident| $expr:expr) => {
        std::env::var($key)
            .map_err(|e| anyhow::anyhow!(e))
            .and_then(|$var| $expr)
    };
    ($key:expr => |$var:ident| $expr:expr; anyhow) => {
        $crate::parse_env!($key => |$var| $expr.map_err(|e| anyhow::anyhow!(e)))
    };
}

pub use parse_env;

/// The default retry limit when `MAX_RETRIES` is absent or unparsable.
pub const DEFAULT_MAX_RETRIES: u8 = 5;

#[cfg(feature = "env_github_token")]
static_lazy_lock! {
    /// The GitHub token, if any. An empty `GH_TOKEN` counts as unset.
    pub GH_TOKEN: Option<String> = env::var("GH_TOKEN").ok().filter(|token| !token.is_empty());
}

#[cfg(feature = "env_max_retries")]
static_lazy_lock! {
    /// The maximum retry limit for transactions.
    pub MAX_RETRIES: u8 = parse_env!("MAX_RETRIES" => |s| s.trim().parse::<u8>(); anyhow)
        .unwrap_or(DEFAULT_MAX_RETRIES);
}

static_lazy_lock! {
    /// The step output file provided by GitHub Actions, if any.
    pub GITHUB_OUTPUT: Option<PathBuf> = env::var_os("GITHUB_OUTPUT")
        .filter(|path| !path.is_empty())
        .map(PathBuf::from);
}

#[cfg(test)]
mod tests {
    #[test]
    fn parse_env_reports_missing_variables() {
        let parsed = parse_env!("GET_WORKFLOW_VERSION_SURELY_UNSET" => |s| s.parse::<u8>(); anyhow);
        assert!(parsed.is_err());
    }

    #[test]
    fn parse_env_reads_present_variables() {
        // `PATH` is set in every sane test environment.
        let parsed = parse_env!("PATH" => |s| Ok::<usize, anyhow::Error>(s.len()));
        assert!(parsed.is_ok());
    }
}
