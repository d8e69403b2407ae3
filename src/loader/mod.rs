//! Loader subsystem.
//!
//! # Data Flow
//! ```text
//! load(name)
//!     → store cache (hit: return)
//!     → registry (miss: NotFound)
//!     → inflight.rs (join a running load or start one)
//!     → dynamic.rs attempt loop (timeout race, backoff, retry)
//!     → store cache + tracker, metrics
//! ```
//!
//! # Design Decisions
//! - Only `NotFound`, `Timeout` and `Exhausted` leave the loader
//! - One underlying load per name at a time
//! - A cached name is never loaded again until the cache is cleared

pub mod dynamic;
pub mod error;
pub(crate) mod inflight;
pub mod lazy;
pub mod options;

pub use dynamic::{DynamicLoader, PreloadReport};
pub use error::{LoadError, LoadResult};
pub use lazy::LazyResource;
pub use options::LoadOptions;
