//! Loader table mapping names to loader callables.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};

use crate::registry::name::ResourceName;

/// Error type returned by loader callables.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Future produced by a single loader invocation.
pub type LoadFuture<T> = BoxFuture<'static, Result<T, BoxError>>;

/// A zero-argument loader. Each call starts a fresh load.
pub type LoaderFn<T> = Arc<dyn Fn() -> LoadFuture<T> + Send + Sync>;

/// Immutable mapping from name to loader, built once at startup.
pub struct Registry<K: ResourceName, T> {
    loaders: HashMap<K, LoaderFn<T>>,
}

impl<K: ResourceName, T: Send + 'static> Registry<K, T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            loaders: HashMap::new(),
        }
    }

    /// Register the loader for `name`, replacing any previous one.
    pub fn register<F, Fut, E>(mut self, name: K, loader: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Into<BoxError>,
    {
        let loader: LoaderFn<T> = Arc::new(move || {
            let fut = loader();
            async move { fut.await.map_err(Into::into) }.boxed()
        });

        if self.loaders.insert(name, loader).is_some() {
            tracing::warn!(resource = name.as_str(), "Replaced previously registered loader");
        }
        self
    }

    /// Get the loader for `name`.
    pub fn get(&self, name: K) -> Option<LoaderFn<T>> {
        self.loaders.get(&name).cloned()
    }

    pub fn contains(&self, name: K) -> bool {
        self.loaders.contains_key(&name)
    }

    /// Registered names, in declaration order of `K::ALL`.
    pub fn names(&self) -> Vec<K> {
        K::ALL
            .iter()
            .copied()
            .filter(|name| self.loaders.contains_key(name))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

impl<K: ResourceName, T: Send + 'static> Default for Registry<K, T> {
    fn default() -> Self {
        Self::new()
    }
}
