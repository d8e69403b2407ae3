//! Timeout enforcement for a single load attempt.
//!
//! The loader future runs as its own task and the attempt waits on its
//! `JoinHandle` under `tokio::time::timeout`. When the timer wins, the handle
//! is dropped, which detaches the task: the load keeps running but nobody
//! observes its result.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// Why one attempt did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    #[error("load timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("{0}")]
    Loader(String),
}

impl AttemptError {
    /// Label used for the attempt outcome metric.
    pub fn kind(&self) -> &'static str {
        match self {
            AttemptError::Timeout(_) => "timeout",
            AttemptError::Loader(_) => "error",
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, AttemptError::Timeout(_))
    }
}

/// Race `fut` against a timer of `limit`.
pub async fn race_attempt<T, E, F>(limit: Duration, fut: F) -> Result<T, AttemptError>
where
    T: Send + 'static,
    E: std::fmt::Display + Send + 'static,
    F: Future<Output = Result<T, E>> + Send + 'static,
{
    let handle = tokio::spawn(fut);
    match tokio::time::timeout(limit, handle).await {
        Ok(Ok(Ok(value))) => Ok(value),
        Ok(Ok(Err(e))) => Err(AttemptError::Loader(e.to_string())),
        Ok(Err(join_error)) => Err(AttemptError::Loader(format!(
            "loader task failed: {}",
            join_error
        ))),
        Err(_) => Err(AttemptError::Timeout(limit)),
    }
}
