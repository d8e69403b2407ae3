//! Write-once module cache.

use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;

use crate::registry::ResourceName;

/// Size and contents of a [`ModuleCache`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub size: usize,
    pub resources: Vec<&'static str>,
}

/// A thread-safe cache of loaded values.
///
/// The first value stored for a name wins; later inserts for the same name
/// return the existing entry instead of replacing it.
pub struct ModuleCache<K: ResourceName, T> {
    inner: DashMap<K, Arc<T>>,
}

impl<K: ResourceName, T> ModuleCache<K, T> {
    pub fn new() -> Self {
        Self {
            inner: DashMap::new(),
        }
    }

    pub fn get(&self, name: &K) -> Option<Arc<T>> {
        self.inner.get(name).map(|r| Arc::clone(r.value()))
    }

    pub fn contains(&self, name: &K) -> bool {
        self.inner.contains_key(name)
    }

    /// Store `value` unless `name` already has an entry. Returns the entry
    /// that is in the cache afterwards.
    pub fn insert_once(&self, name: K, value: Arc<T>) -> Arc<T> {
        Arc::clone(self.inner.entry(name).or_insert(value).value())
    }

    pub fn clear(&self) {
        self.inner.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Cached names, in declaration order of `K::ALL`.
    pub fn stats(&self) -> CacheStats {
        let resources: Vec<&'static str> = K::ALL
            .iter()
            .filter(|name| self.inner.contains_key(name))
            .map(|name| name.as_str())
            .collect();
        CacheStats {
            size: resources.len(),
            resources,
        }
    }
}

impl<K: ResourceName, T> Default for ModuleCache<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Shader {
        Water,
        Sky,
    }

    impl ResourceName for Shader {
        const ALL: &'static [Self] = &[Shader::Water, Shader::Sky];

        fn as_str(&self) -> &'static str {
            match self {
                Shader::Water => "water",
                Shader::Sky => "sky",
            }
        }
    }

    #[test]
    fn test_first_insert_wins() {
        let cache = ModuleCache::new();
        let first = cache.insert_once(Shader::Water, Arc::new("v1"));
        let second = cache.insert_once(Shader::Water, Arc::new("v2"));

        assert_eq!(*first, "v1");
        assert_eq!(*second, "v1");
        assert_eq!(cache.get(&Shader::Water).as_deref(), Some(&"v1"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_stats_and_clear() {
        let cache = ModuleCache::new();
        cache.insert_once(Shader::Sky, Arc::new(1));
        cache.insert_once(Shader::Water, Arc::new(2));

        assert_eq!(
            cache.stats(),
            CacheStats {
                size: 2,
                resources: vec!["water", "sky"],
            }
        );

        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.contains(&Shader::Sky));
    }
}
