//! The cached fetch consumer.

use super::state::FetchState;
use super::supplier::Supplier;
use crate::cache::DataCache;
use crate::cancel::CancellationToken;
use crate::config::CacheConfig;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
struct FetchSettings {
    key: String,
    ttl: Duration,
}

/// One consumer of cached data, typically owned by a single view.
///
/// State is published through a `watch` channel, see [`Self::subscribe`].
/// Every state mutation happens while holding the in-flight slot lock and
/// re-checks the call's token there, so a superseded or torn-down call can
/// never write to the state or the shared cache.
pub struct CachedFetch<T> {
    cache: Arc<DataCache>,
    supplier: Arc<dyn Supplier<T>>,
    settings: Mutex<FetchSettings>,
    state: watch::Sender<FetchState<T>>,
    /// Token of the call currently allowed to publish results.
    in_flight: Mutex<Option<CancellationToken>>,
    /// Cancelled once the owning view goes away.
    scope: CancellationToken,
}

impl<T> CachedFetch<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(
        cache: Arc<DataCache>,
        key: impl Into<String>,
        supplier: impl Supplier<T> + 'static,
        ttl: Duration,
    ) -> Self {
        let (state, _) = watch::channel(FetchState::initial());
        Self {
            cache,
            supplier: Arc::new(supplier),
            settings: Mutex::new(FetchSettings {
                key: key.into(),
                ttl,
            }),
            state,
            in_flight: Mutex::new(None),
            scope: CancellationToken::new(),
        }
    }

    /// Create a consumer with [`CacheConfig::DEFAULT_TTL`].
    pub fn with_default_ttl(
        cache: Arc<DataCache>,
        key: impl Into<String>,
        supplier: impl Supplier<T> + 'static,
    ) -> Self {
        Self::new(cache, key, supplier, CacheConfig::DEFAULT_TTL)
    }

    pub fn key(&self) -> String {
        lock(&self.settings).key.clone()
    }

    pub fn ttl(&self) -> Duration {
        lock(&self.settings).ttl
    }

    /// Current state.
    pub fn snapshot(&self) -> FetchState<T> {
        self.state.borrow().clone()
    }

    /// Receive every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.state.subscribe()
    }

    pub fn is_live(&self) -> bool {
        !self.scope.is_cancelled()
    }

    /// Adopt a fresh cache entry, or fetch one.
    ///
    /// A fresh entry is taken synchronously and no supplier call is made.
    /// Any call still running for this instance is cancelled first.
    pub async fn activate(&self) {
        let settings = lock(&self.settings).clone();
        {
            let mut in_flight = lock(&self.in_flight);
            if self.scope.is_cancelled() {
                return;
            }
            if let Some(entry) = self.cache.get_fresh::<T>(&settings.key, settings.ttl) {
                debug!("Cache hit for {}", settings.key);
                if let Some(previous) = in_flight.take() {
                    previous.cancel();
                }
                self.state.send_modify(|state| {
                    state.data = Some(entry.value);
                    state.loading = false;
                });
                return;
            }
        }

        debug!("Cache miss for {}, fetching", settings.key);
        self.refresh().await;
    }

    /// Change the key or TTL, re-activating when either differs.
    ///
    /// Returns whether anything changed.
    pub async fn reconfigure(&self, key: impl Into<String>, ttl: Duration) -> bool {
        let key = key.into();
        {
            let mut settings = lock(&self.settings);
            if settings.key == key && settings.ttl == ttl {
                return false;
            }
            settings.key = key;
            settings.ttl = ttl;
        }
        self.activate().await;
        true
    }

    /// Fetch from the supplier regardless of cache freshness.
    ///
    /// Cancels the previous call owned by this instance. A successful result
    /// is written to the cache and the state; a failure sets `error` and
    /// keeps existing data; a cancelled call changes nothing.
    pub async fn refresh(&self) {
        // The key is read under the slot lock so it always belongs to the
        // token issued with it.
        let (key, token) = {
            let mut in_flight = lock(&self.in_flight);
            if self.scope.is_cancelled() {
                return;
            }
            let key = self.key();
            if let Some(previous) = in_flight.take() {
                previous.cancel();
            }
            let token = CancellationToken::new();
            *in_flight = Some(token.clone());
            self.state.send_modify(|state| {
                state.loading = true;
                state.error = None;
            });
            (key, token)
        };

        let outcome = self.supplier.fetch(&key, token.clone()).await;

        let mut in_flight = lock(&self.in_flight);
        if token.is_cancelled() || self.scope.is_cancelled() {
            debug!("Discarding superseded response for {}", key);
            return;
        }
        *in_flight = None;

        match outcome {
            Ok(value) => {
                self.cache.set(&key, value.clone());
                self.state.send_modify(|state| {
                    state.data = Some(value);
                    state.loading = false;
                });
            }
            Err(e) if e.is_cancelled() => {
                debug!("Supplier for {} gave up on its own", key);
                self.state.send_modify(|state| state.loading = false);
            }
            Err(e) => {
                warn!("Error fetching data for {}: {}", key, e);
                let message = e.user_message();
                self.state.send_modify(|state| {
                    state.error = Some(message);
                    state.loading = false;
                });
            }
        }
    }

    /// Stop this consumer: cancel the running call and refuse all further
    /// state changes.
    pub fn teardown(&self) {
        let mut in_flight = lock(&self.in_flight);
        self.scope.cancel();
        if let Some(previous) = in_flight.take() {
            previous.cancel();
        }
    }
}

impl<T> Drop for CachedFetch<T> {
    fn drop(&mut self) {
        self.scope.cancel();
        if let Some(previous) = lock(&self.in_flight).take() {
            previous.cancel();
        }
    }
}

impl<T> std::fmt::Debug for CachedFetch<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let settings = lock(&self.settings);
        f.debug_struct("CachedFetch")
            .field("key", &settings.key)
            .field("ttl", &settings.ttl)
            .field("live", &!self.scope.is_cancelled())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
