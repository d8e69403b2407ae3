//! Dynamic loader with caching, retries and timeouts.
//!
//! # Responsibilities
//! - Serve cached values without touching the loader
//! - Reject unknown names immediately
//! - Run bounded, timed attempts with exponential backoff between them
//! - Coalesce concurrent requests for the same name
//! - Record load outcomes in the tracker and the metrics recorder

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::future::{join_all, BoxFuture, FutureExt};
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::LoaderConfig;
use crate::loader::error::{LoadError, LoadResult};
use crate::loader::inflight::{Attach, InFlight};
use crate::loader::lazy::LazyResource;
use crate::loader::options::LoadOptions;
use crate::observability::metrics;
use crate::observability::tracing::load_span;
use crate::registry::{LoaderFn, Registry, ResourceName};
use crate::resilience::{race_attempt, BackoffPolicy, RetryPolicy};
use crate::store::{CacheStats, LoaderStore, MetricsSnapshot};

/// Outcome of a [`DynamicLoader::preload`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PreloadReport {
    pub loaded: Vec<String>,
    pub failed: BTreeMap<String, String>,
}

/// Resolves names to values through a [`Registry`], caching successes.
///
/// Clones share the registry, the store and the in-flight table.
pub struct DynamicLoader<K: ResourceName, T> {
    registry: Arc<Registry<K, T>>,
    store: Arc<LoaderStore<K, T>>,
    inflight: Arc<InFlight<K, T>>,
    options: LoadOptions,
    backoff: BackoffPolicy,
}

impl<K: ResourceName, T> Clone for DynamicLoader<K, T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            store: Arc::clone(&self.store),
            inflight: Arc::clone(&self.inflight),
            options: self.options,
            backoff: self.backoff,
        }
    }
}

impl<K: ResourceName, T: Send + Sync + 'static> DynamicLoader<K, T> {
    /// Create a loader with default options and backoff.
    pub fn new(registry: Registry<K, T>, store: Arc<LoaderStore<K, T>>) -> Self {
        Self {
            registry: Arc::new(registry),
            store,
            inflight: Arc::new(InFlight::new()),
            options: LoadOptions::default(),
            backoff: BackoffPolicy::default(),
        }
    }

    /// Create a loader using the load and backoff sections of `config`.
    pub fn from_config(
        registry: Registry<K, T>,
        store: Arc<LoaderStore<K, T>>,
        config: &LoaderConfig,
    ) -> Self {
        Self::new(registry, store)
            .with_options(LoadOptions::from(&config.loader))
            .with_backoff(BackoffPolicy::from(&config.backoff))
    }

    /// Options used by [`DynamicLoader::load`].
    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn options(&self) -> LoadOptions {
        self.options
    }

    pub fn registry(&self) -> &Registry<K, T> {
        &self.registry
    }

    pub fn store(&self) -> &Arc<LoaderStore<K, T>> {
        &self.store
    }

    /// Load `name` with the default options.
    pub async fn load(&self, name: K) -> LoadResult<Arc<T>> {
        self.load_with(name, self.options).await
    }

    /// Load `name` with explicit options.
    ///
    /// A request that joins a load already in flight gets that load's result,
    /// which was produced with the options of the request that started it.
    pub async fn load_with(&self, name: K, options: LoadOptions) -> LoadResult<Arc<T>> {
        let resource = name.as_str();

        if let Some(value) = self.store.cache().get(&name) {
            tracing::debug!(resource, "Cache hit");
            metrics::record_cache_hit(resource);
            return Ok(value);
        }

        let loader = match self.registry.get(name) {
            Some(loader) => loader,
            None => {
                tracing::warn!(resource, "Resource not registered");
                return Err(LoadError::NotFound {
                    name: resource.to_string(),
                });
            }
        };

        let policy = RetryPolicy::new(options.max_retries, self.backoff);
        let store = Arc::clone(&self.store);
        let inflight = Arc::clone(&self.inflight);

        let attach = self.inflight.attach(
            name,
            || self.store.cache().get(&name),
            move |load_id| {
                spawn_load(name, loader, options.timeout, policy, store, inflight, load_id)
            },
        );

        match attach {
            Attach::Cached(value) => {
                metrics::record_cache_hit(resource);
                Ok(value)
            }
            Attach::Started(load_id, pending) => {
                tracing::debug!(resource, load_id = %load_id, "Started load");
                pending.await
            }
            Attach::Joined(load_id, pending) => {
                tracing::debug!(resource, load_id = %load_id, "Joined in-flight load");
                metrics::record_coalesced(resource);
                pending.await
            }
        }
    }

    /// Load by string identifier. Unknown identifiers fail with `NotFound`.
    pub async fn load_by_name(&self, name: &str) -> LoadResult<Arc<T>> {
        match K::parse(name) {
            Some(name) => self.load(name).await,
            None => {
                tracing::warn!(resource = name, "Unknown resource name");
                Err(LoadError::NotFound {
                    name: name.to_string(),
                })
            }
        }
    }

    /// Load `name`, returning `fallback` if the load fails.
    pub async fn load_or(&self, name: K, fallback: Arc<T>) -> Arc<T> {
        match self.load(name).await {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(resource = name.as_str(), error = %e, "Using fallback");
                fallback
            }
        }
    }

    /// Handle that loads `name` on first use.
    pub fn lazy(&self, name: K) -> LazyResource<K, T> {
        LazyResource::new(self.clone(), name, self.options)
    }

    /// Warm the cache for `names`. Failures are logged and reported, never returned.
    pub async fn preload(&self, names: &[K]) -> PreloadReport {
        let loads = names.iter().copied().map(|name| async move {
            (name.as_str().to_string(), self.load(name).await.map(|_| ()))
        });
        let results = join_all(loads).await;
        self.collect_report(results)
    }

    /// Like [`DynamicLoader::preload`], for string identifiers.
    pub async fn preload_by_name<S: AsRef<str>>(&self, names: &[S]) -> PreloadReport {
        let loads = names.iter().map(|name| async move {
            let name: &str = name.as_ref();
            (name.to_string(), self.load_by_name(name).await.map(|_| ()))
        });
        let results = join_all(loads).await;
        self.collect_report(results)
    }

    fn collect_report(&self, results: Vec<(String, LoadResult<()>)>) -> PreloadReport {
        let mut report = PreloadReport::default();
        for (name, result) in results {
            match result {
                Ok(()) => {
                    tracing::info!(resource = %name, "Preloaded resource");
                    report.loaded.push(name);
                }
                Err(e) => {
                    tracing::warn!(resource = %name, error = %e, "Failed to preload resource");
                    report.failed.insert(name, e.to_string());
                }
            }
        }
        report
    }

    /// Empty the cache. Metrics are kept.
    pub fn clear_cache(&self) {
        self.store.cache().clear();
        metrics::record_cache_size(0);
        tracing::debug!("Cache cleared");
    }

    pub fn is_cached(&self, name: K) -> bool {
        self.store.cache().contains(&name)
    }

    /// Whether a load for `name` is currently running.
    pub fn is_loading(&self, name: K) -> bool {
        self.inflight.is_loading(name)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.store.cache().stats()
    }

    /// Metrics for one name, `None` if it has never been loaded.
    pub fn metrics(&self, name: K) -> Option<MetricsSnapshot> {
        self.store.tracker().get(name)
    }

    pub fn all_metrics(&self) -> BTreeMap<&'static str, MetricsSnapshot> {
        self.store.tracker().all()
    }

    pub fn reset_metrics(&self) {
        self.store.tracker().reset();
    }
}

/// Run one load as its own task, so it finishes even if every waiter is dropped.
fn spawn_load<K: ResourceName, T: Send + Sync + 'static>(
    name: K,
    loader: LoaderFn<T>,
    timeout: Duration,
    policy: RetryPolicy,
    store: Arc<LoaderStore<K, T>>,
    inflight: Arc<InFlight<K, T>>,
    load_id: Uuid,
) -> BoxFuture<'static, LoadResult<Arc<T>>> {
    let task = run_load(name, loader, timeout, policy, store, Arc::clone(&inflight), load_id);
    let handle = tokio::spawn(task);

    async move {
        handle.await.unwrap_or_else(|join_error| {
            inflight.finish(name, load_id);
            tracing::error!(resource = name.as_str(), error = %join_error, "Load task failed");
            Err(LoadError::Exhausted {
                name: name.as_str().to_string(),
                attempts: 0,
                last_message: format!("load task failed: {}", join_error),
            })
        })
    }
    .boxed()
}

/// Body of the spawned task for one load.
async fn run_load<K: ResourceName, T: Send + Sync + 'static>(
    name: K,
    loader: LoaderFn<T>,
    timeout: Duration,
    policy: RetryPolicy,
    store: Arc<LoaderStore<K, T>>,
    inflight: Arc<InFlight<K, T>>,
    load_id: Uuid,
) -> LoadResult<Arc<T>> {
    let result = attempt_load(name, &loader, timeout, policy, &store)
        .instrument(load_span(name.as_str(), load_id))
        .await;
    inflight.finish(name, load_id);
    result
}

async fn attempt_load<K: ResourceName, T: Send + Sync + 'static>(
    name: K,
    loader: &LoaderFn<T>,
    timeout: Duration,
    policy: RetryPolicy,
    store: &LoaderStore<K, T>,
) -> LoadResult<Arc<T>> {
    let resource = name.as_str();
    let start = Instant::now();
    let mut attempts = 0;
    let mut all_timed_out = true;

    loop {
        attempts += 1;
        let attempt_start = Instant::now();

        match race_attempt(timeout, loader()).await {
            Ok(value) => {
                let value = store.cache().insert_once(name, Arc::new(value));
                store.tracker().record_load(name, start.elapsed(), true);

                metrics::record_attempt(resource, "success");
                metrics::record_load(resource, true, start);
                metrics::record_cache_size(store.cache().len());

                tracing::info!(
                    resource,
                    attempt = attempts,
                    load_time_ms = attempt_start.elapsed().as_millis() as u64,
                    "Resource loaded"
                );
                return Ok(value);
            }
            Err(err) => {
                metrics::record_attempt(resource, err.kind());
                all_timed_out &= err.is_timeout();
                tracing::warn!(resource, attempt = attempts, error = %err, "Load attempt failed");

                if let Some(delay) = policy.next_delay(attempts) {
                    tracing::info!(resource, attempt = attempts, delay = ?delay, "Retrying load");
                    tokio::time::sleep(delay).await;
                    continue;
                }

                store.tracker().record_load(name, start.elapsed(), false);
                metrics::record_load(resource, false, start);

                let error = if all_timed_out {
                    LoadError::Timeout {
                        name: resource.to_string(),
                        attempts,
                        timeout_ms: timeout.as_millis() as u64,
                    }
                } else {
                    LoadError::Exhausted {
                        name: resource.to_string(),
                        attempts,
                        last_message: err.to_string(),
                    }
                };
                tracing::error!(resource, attempts, error = %error, "Load failed");
                return Err(error);
            }
        }
    }
}
