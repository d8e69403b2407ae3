//! Deferred handles to a single resource.

use std::sync::Arc;

use crate::loader::dynamic::DynamicLoader;
use crate::loader::error::LoadResult;
use crate::loader::options::LoadOptions;
use crate::registry::ResourceName;

/// A name bound to a loader, resolved on the first [`LazyResource::get`].
pub struct LazyResource<K: ResourceName, T> {
    loader: DynamicLoader<K, T>,
    name: K,
    options: LoadOptions,
}

impl<K: ResourceName, T> Clone for LazyResource<K, T> {
    fn clone(&self) -> Self {
        Self {
            loader: self.loader.clone(),
            name: self.name,
            options: self.options,
        }
    }
}

impl<K: ResourceName, T: Send + Sync + 'static> LazyResource<K, T> {
    pub(crate) fn new(loader: DynamicLoader<K, T>, name: K, options: LoadOptions) -> Self {
        Self { loader, name, options }
    }

    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    pub fn name(&self) -> K {
        self.name
    }

    /// The value, if it is already cached.
    pub fn peek(&self) -> Option<Arc<T>> {
        self.loader.store().cache().get(&self.name)
    }

    pub fn is_ready(&self) -> bool {
        self.loader.is_cached(self.name)
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_loading(self.name)
    }

    pub async fn get(&self) -> LoadResult<Arc<T>> {
        self.loader.load_with(self.name, self.options).await
    }
}
