use std::{fmt::Display, str::FromStr};

use regex::Regex;

use crate::{Error, static_lazy_lock};

static_lazy_lock! {
    REPOSITORY_NAME: Regex =
        Regex::new(r"^[a-zA-Z0-9\-]+/[a-zA-Z0-9.\-_]+$").expect("repository pattern is valid");
}

/// A GitHub repository in `owner/name` form, e.g. `octocat/Hello-World`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repository(String);

impl Repository {
    /// The `owner/name` string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Repository {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if REPOSITORY_NAME.is_match(value) {
            Ok(Self(value.to_owned()))
        } else {
            Err(Error::InvalidRepository(value.to_owned()))
        }
    }
}

impl Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
