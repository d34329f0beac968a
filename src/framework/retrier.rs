//! A framework that loops a transaction until the max retry times is reached, or it is cancelled, or a value is returned.

use std::{fmt::Display, time::Duration};

use tracing::{error, info};

use super::{StateError, StateResult, retry_if_possible};
use crate::{Error, env::MAX_RETRIES};

/// The pause between two attempts unless configured otherwise.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Loops a transaction until it succeeds, it is cancelled, or the retry budget runs out.
///
/// See: [`retry_if_possible`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retrier {
    max_retries: u8,
    delay: Duration,
}

impl Default for Retrier {
    /// Reads the retry budget from the `MAX_RETRIES` environment variable.
    fn default() -> Self {
        Self::new(*MAX_RETRIES)
    }
}

impl Retrier {
    /// Creates a [`Retrier`] allowing `max_retries` retries after the first attempt.
    pub const fn new(max_retries: u8) -> Self {
        Self {
            max_retries,
            delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Sets the pause between two attempts.
    #[must_use]
    pub const fn with_delay(self, delay: Duration) -> Self {
        Self { delay, ..self }
    }

    /// Runs a transaction, naming it in the logs.
    ///
    /// # Errors
    ///
    /// Returns the error of the last attempt if the transaction is cancelled or retried for too many times.
    pub async fn run<N, F, Fut, T>(&self, name: N, mut f: F) -> Result<T, Error>
    where
        N: Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = StateResult<T>>,
    {
        info!("starting transaction {name}…");
        let mut retry: u8 = 0;

        loop {
            match f().await {
                Ok(value) => {
                    info!("transaction {name} succeed!");
                    return Ok(value);
                }
                Err(StateError::Retry(err)) => {
                    error!("transaction {name} failed: {err}");
                    match retry_if_possible(&mut retry, self.max_retries) {
                        Ok(_) => tokio::time::sleep(self.delay).await,
                        Err(_) => return Err(err),
                    }
                }
                Err(StateError::Cancelled(err)) => {
                    error!("transaction {name} cancelled: {err}");
                    return Err(err);
                }
            }
        }
    }
}
