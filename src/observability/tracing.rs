//! Spans for load operations.
//!
//! Every underlying load gets a `load_id` so that the attempts, retries and
//! coalesced waiters of one load can be correlated in the logs.

use tracing::Span;
use uuid::Uuid;

/// Create a fresh correlation ID for an underlying load.
pub fn new_load_id() -> Uuid {
    Uuid::new_v4()
}

/// Span wrapping all attempts of one load.
pub fn load_span(resource: &'static str, load_id: Uuid) -> Span {
    tracing::info_span!("load", resource, load_id = %load_id)
}
