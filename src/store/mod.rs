//! Shared loader state.
//!
//! # Responsibilities
//! - Hold the module cache and the load tracker
//! - Provide explicit reset points for test isolation
//!
//! # Design Decisions
//! - Constructed by the host and injected into the loader, never a global
//! - Cache and tracker have independent lifecycles (clearing one keeps the other)

pub mod cache;
pub mod tracker;

pub use cache::{CacheStats, ModuleCache};
pub use tracker::{LoadTracker, MetricsSnapshot};

use crate::registry::ResourceName;

/// Cache plus metrics, shared by every clone of a loader.
pub struct LoaderStore<K: ResourceName, T> {
    cache: ModuleCache<K, T>,
    tracker: LoadTracker<K>,
}

impl<K: ResourceName, T> LoaderStore<K, T> {
    pub fn new() -> Self {
        Self {
            cache: ModuleCache::new(),
            tracker: LoadTracker::new(),
        }
    }

    pub fn cache(&self) -> &ModuleCache<K, T> {
        &self.cache
    }

    pub fn tracker(&self) -> &LoadTracker<K> {
        &self.tracker
    }
}

impl<K: ResourceName, T> Default for LoaderStore<K, T> {
    fn default() -> Self {
        Self::new()
    }
}
