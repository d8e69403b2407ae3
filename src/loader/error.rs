//! Errors surfaced by the loader.

use thiserror::Error;

/// Terminal load failures. Transient attempt failures never escape the loader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The name has no registered loader. Never retried.
    #[error("Resource {name} not found")]
    NotFound { name: String },

    /// Every attempt ran out of time.
    #[error(
        "Failed to load resource {name} after {attempts} attempts: timed out after {timeout_ms}ms"
    )]
    Timeout {
        name: String,
        attempts: u32,
        timeout_ms: u64,
    },

    /// All attempts failed; carries the last underlying error.
    #[error("Failed to load resource {name} after {attempts} attempts: {last_message}")]
    Exhausted {
        name: String,
        attempts: u32,
        last_message: String,
    },
}

impl LoadError {
    pub fn resource(&self) -> &str {
        match self {
            LoadError::NotFound { name }
            | LoadError::Timeout { name, .. }
            | LoadError::Exhausted { name, .. } => name,
        }
    }

    /// Number of attempts made before giving up (zero for `NotFound`).
    pub fn attempts(&self) -> u32 {
        match self {
            LoadError::NotFound { .. } => 0,
            LoadError::Timeout { attempts, .. } | LoadError::Exhausted { attempts, .. } => {
                *attempts
            }
        }
    }
}

/// Result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;
