//! Shared fixtures for loader integration tests.

use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;

use resource_loader::{DynamicLoader, LoaderStore, Registry, ResourceName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixture {
    Alpha,
    Beta,
    Gamma,
}

impl ResourceName for Fixture {
    const ALL: &'static [Self] = &[Fixture::Alpha, Fixture::Beta, Fixture::Gamma];

    fn as_str(&self) -> &'static str {
        match self {
            Fixture::Alpha => "Alpha",
            Fixture::Beta => "Beta",
            Fixture::Gamma => "Gamma",
        }
    }
}

/// Loader invocation counter.
#[derive(Clone, Default)]
pub struct Calls(Arc<AtomicU32>);

impl Calls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }

    /// Wrap `f` so every invocation is counted. `f` receives the 1-indexed call number.
    pub fn scripted<F, Fut>(&self, f: F) -> impl Fn() -> Fut + Send + Sync + 'static
    where
        F: Fn(u32) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<&'static str, String>> + Send + 'static,
    {
        let calls = self.0.clone();
        move || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            f(n)
        }
    }
}

/// Loader that fails the first `failures` calls, then returns `value`.
#[allow(dead_code)]
pub fn flaky(
    calls: &Calls,
    failures: u32,
    value: &'static str,
) -> impl Fn() -> std::future::Ready<Result<&'static str, String>> + Send + Sync + 'static {
    calls.scripted(move |n| {
        std::future::ready(if n <= failures {
            Err(format!("transient failure #{}", n))
        } else {
            Ok(value)
        })
    })
}

/// Start times of loader calls, in call order.
#[derive(Clone, Default)]
pub struct CallTimes(Arc<Mutex<Vec<Instant>>>);

#[allow(dead_code)]
impl CallTimes {
    pub fn new() -> Self {
        Self::default()
    }

    fn mark(&self) {
        self.0.lock().unwrap().push(Instant::now());
    }

    /// Time between consecutive calls.
    pub fn gaps(&self) -> Vec<Duration> {
        let times = self.0.lock().unwrap();
        times.windows(2).map(|pair| pair[1] - pair[0]).collect()
    }
}

/// Like [`flaky`], also recording when each call starts.
#[allow(dead_code)]
pub fn timed_flaky(
    calls: &Calls,
    times: &CallTimes,
    failures: u32,
    value: &'static str,
) -> impl Fn() -> std::future::Ready<Result<&'static str, String>> + Send + Sync + 'static {
    let times = times.clone();
    calls.scripted(move |n| {
        times.mark();
        std::future::ready(if n <= failures {
            Err(format!("transient failure #{}", n))
        } else {
            Ok(value)
        })
    })
}

/// Loader that waits `delay` before returning `value`.
#[allow(dead_code)]
pub fn slow(
    calls: &Calls,
    delay: Duration,
    value: &'static str,
) -> impl Fn() -> std::pin::Pin<Box<dyn Future<Output = Result<&'static str, String>> + Send>>
       + Send
       + Sync
       + 'static {
    calls.scripted(move |_| {
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            Ok(value)
        }) as std::pin::Pin<Box<dyn Future<Output = Result<&'static str, String>> + Send>>
    })
}

/// Build a loader over `registry` with a fresh store.
pub fn loader_for(
    registry: Registry<Fixture, &'static str>,
) -> DynamicLoader<Fixture, &'static str> {
    DynamicLoader::new(registry, Arc::new(LoaderStore::new()))
}
