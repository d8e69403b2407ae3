//! Resource registry subsystem.
//!
//! # Responsibilities
//! - Define the closed set of symbolic names a host application can load
//! - Map each name to a zero-argument loader
//!
//! # Design Decisions
//! - Names are enum variants, not free-form strings
//! - The table is built once and never mutated after it is handed to the loader
//! - Loader errors are boxed so hosts can use their own error types

pub mod name;
pub mod table;

pub use name::ResourceName;
pub use table::{BoxError, LoadFuture, LoaderFn, Registry};
