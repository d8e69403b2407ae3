//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Load of a registered name:
//!     → timeouts.rs (race the loader against the attempt deadline)
//!     → On failure: retries.rs (attempts left? how long to wait?)
//!     → backoff.rs (exponential delay, capped, optional jitter)
//! ```
//!
//! # Design Decisions
//! - Every attempt has a deadline
//! - A timed-out load is detached, never awaited again
//! - Backoff timing and the attempt bound are policy, not constants

pub mod backoff;
pub mod retries;
pub mod timeouts;

pub use backoff::BackoffPolicy;
pub use retries::RetryPolicy;
pub use timeouts::{race_attempt, AttemptError};
