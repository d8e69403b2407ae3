//! In-flight load coalescing.
//!
//! The first request for a name that is neither cached nor loading starts
//! the load as a spawned task and publishes a shared handle to it here.
//! Requests arriving while it runs clone that handle and receive the same
//! result. The task removes its own entry when it finishes.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use uuid::Uuid;

use crate::loader::error::LoadResult;
use crate::observability::tracing::new_load_id;
use crate::registry::ResourceName;

pub(crate) type SharedLoad<T> = Shared<BoxFuture<'static, LoadResult<Arc<T>>>>;

struct Pending<T> {
    load_id: Uuid,
    future: SharedLoad<T>,
}

/// How a request was attached to a value.
pub(crate) enum Attach<T> {
    /// The value reached the cache before the request could join a load.
    Cached(Arc<T>),
    /// The request started a new load.
    Started(Uuid, SharedLoad<T>),
    /// The request joined a load started by someone else.
    Joined(Uuid, SharedLoad<T>),
}

pub(crate) struct InFlight<K: ResourceName, T> {
    pending: DashMap<K, Pending<T>>,
}

impl<K: ResourceName, T: Send + Sync + 'static> InFlight<K, T> {
    pub(crate) fn new() -> Self {
        Self {
            pending: DashMap::new(),
        }
    }

    /// Join the pending load for `name` or start one with `start`.
    ///
    /// `cached` is consulted while the entry is locked. A load fills the cache
    /// before it calls [`InFlight::finish`], so a request never misses both.
    pub(crate) fn attach<C, S>(&self, name: K, cached: C, start: S) -> Attach<T>
    where
        C: FnOnce() -> Option<Arc<T>>,
        S: FnOnce(Uuid) -> BoxFuture<'static, LoadResult<Arc<T>>>,
    {
        match self.pending.entry(name) {
            Entry::Occupied(entry) => {
                let pending = entry.get();
                Attach::Joined(pending.load_id, pending.future.clone())
            }
            Entry::Vacant(entry) => {
                if let Some(value) = cached() {
                    return Attach::Cached(value);
                }
                let load_id = new_load_id();
                let future = start(load_id).shared();
                entry.insert(Pending {
                    load_id,
                    future: future.clone(),
                });
                Attach::Started(load_id, future)
            }
        }
    }

    /// Drop the entry for `name` if it still belongs to `load_id`.
    pub(crate) fn finish(&self, name: K, load_id: Uuid) {
        self.pending.remove_if(&name, |_, pending| pending.load_id == load_id);
    }

    pub(crate) fn is_loading(&self, name: K) -> bool {
        self.pending.contains_key(&name)
    }
}
