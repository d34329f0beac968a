use tracing::{error, warn};

use crate::Error;

/// An error that controls the flow of a transaction.
#[non_exhaustive]
#[derive(Debug)]
pub enum StateError {
    /// The control flow should retry if possible.
    ///
    /// See: [`retry_if_possible`]
    Retry(Error),
    /// The control flow should exit immediately.
    Cancelled(Error),
}

/// The result of a transaction step.
pub type StateResult<T> = Result<T, StateError>;

impl StateError {
    /// Sorts an [`Error`] into [`StateError::Retry`] or [`StateError::Cancelled`] by [`Error::is_transient`].
    pub fn classify(err: Error) -> Self {
        if err.is_transient() {
            Self::Retry(err)
        } else {
            Self::Cancelled(err)
        }
    }
}

impl From<Error> for StateError {
    fn from(err: Error) -> Self {
        Self::classify(err)
    }
}

/// Decides whether retrying is allowed based on a provided retry times and a retry limit.
///
/// # Errors
///
/// Returns [`Err<()>`] if retrying is not allowed, otherwise [`Ok<()>`] is returned.
pub fn retry_if_possible(retry: &mut u8, max_retries: u8) -> Result<(), ()> {
    *retry = retry.saturating_add(1);
    if *retry > max_retries {
        error!("retried for too many times ({max_retries}), stopping!");
        Err(())
    } else {
        warn!("retrying… ({retry} / {max_retries})");
        Ok(())
    }
}
