//! Dynamic resource loader with caching, retries and timeouts.

pub mod catalog;
pub mod config;
pub mod loader;
pub mod observability;
pub mod registry;
pub mod resilience;
pub mod store;

pub use config::schema::LoaderConfig;
pub use loader::{DynamicLoader, LoadError, LoadOptions, LoadResult};
pub use registry::{Registry, ResourceName};
pub use store::LoaderStore;
