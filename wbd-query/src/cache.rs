use crate::input::QueryInput;
use crate::state::QueryState;
use chrono::{DateTime, Duration, Utc};
use futures::future::{FutureExt, LocalBoxFuture, Shared};
use log::{debug, warn};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use wbd_api::{FetchError, IndicatorClient, IndicatorResponse, QueryKey, Transport};

type FetchResult = Result<Rc<IndicatorResponse>, FetchError>;
type SharedFetch = Shared<LocalBoxFuture<'static, FetchResult>>;
type Listener = Rc<dyn Fn(&QueryKey, &QueryState)>;

/// Cache behaviour knobs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CacheConfig {
    /// Age after which a successful entry is fetched again. `None` keeps
    /// results for the lifetime of the cache.
    pub stale_after: Option<Duration>,
    /// Extra attempts after a `Network` failure. Malformed responses are
    /// never retried.
    pub retry: u32,
}

/// Handle returned by [`QueryCache::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct CacheEntry {
    /// Never `Idle`: an idle key has no entry.
    state: QueryState,
    updated_at: DateTime<Utc>,
    /// Identifies the request that owns this entry; a completion carrying a
    /// different generation is stale and gets dropped.
    generation: u64,
    in_flight: Option<SharedFetch>,
}

enum Lookup {
    Ready(QueryState),
    InFlight(SharedFetch),
}

struct Inner<T> {
    client: Rc<IndicatorClient<T>>,
    config: CacheConfig,
    entries: RefCell<HashMap<QueryKey, CacheEntry>>,
    /// How many views currently hold each key.
    holders: RefCell<HashMap<QueryKey, usize>>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_generation: Cell<u64>,
    next_subscription: Cell<u64>,
}

/// Memoizes indicator fetches by [`QueryKey`].
///
/// Cheaply cloneable; clones share the same entries. At most one request per
/// key is outstanding at any time, and any number of distinct keys may be in
/// flight concurrently.
pub struct QueryCache<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for QueryCache<T> {
    fn clone(&self) -> Self {
        QueryCache {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> PartialEq for QueryCache<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Transport + 'static> QueryCache<T> {
    pub fn new(client: IndicatorClient<T>, config: CacheConfig) -> Self {
        QueryCache {
            inner: Rc::new(Inner {
                client: Rc::new(client),
                config,
                entries: RefCell::new(HashMap::new()),
                holders: RefCell::new(HashMap::new()),
                listeners: RefCell::new(Vec::new()),
                next_generation: Cell::new(0),
                next_subscription: Cell::new(0),
            }),
        }
    }

    pub fn client(&self) -> &IndicatorClient<T> {
        &self.inner.client
    }

    /// Current state for `key` without triggering a fetch.
    pub fn get(&self, key: &QueryKey) -> QueryState {
        self.inner
            .entries
            .borrow()
            .get(key)
            .map(|entry| entry.state.clone())
            .unwrap_or_default()
    }

    /// When the entry for `key` last changed state.
    pub fn updated_at(&self, key: &QueryKey) -> Option<DateTime<Utc>> {
        self.inner
            .entries
            .borrow()
            .get(key)
            .map(|entry| entry.updated_at)
    }

    pub fn len(&self) -> usize {
        self.inner.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.borrow().is_empty()
    }

    /// Resolve `key`: a fresh success or a sticky error is returned as is,
    /// a pending request is joined, anything else starts one request.
    pub async fn fetch(&self, key: &QueryKey) -> QueryState {
        self.resolve(key, true).await
    }

    /// Resolve `key` for a view that has just switched to it. Same as
    /// [`fetch`](Self::fetch), except that a cached error is not served:
    /// the key is requested again.
    pub async fn revisit(&self, key: &QueryKey) -> QueryState {
        self.resolve(key, false).await
    }

    async fn resolve(&self, key: &QueryKey, sticky_errors: bool) -> QueryState {
        let mut in_flight = match self.lookup_or_start(key, sticky_errors) {
            Lookup::Ready(state) => return state,
            Lookup::InFlight(shared) => shared,
        };
        loop {
            let result = in_flight.await;
            // The entry may have been invalidated and refetched while we waited;
            // follow the newer request rather than reporting a discarded result.
            let next = match self.inner.entries.borrow().get(key) {
                Some(entry) => match &entry.in_flight {
                    Some(newer) => newer.clone(),
                    None => return entry.state.clone(),
                },
                // Evicted with nothing replacing it: our own result still stands.
                None => return QueryState::from(result),
            };
            in_flight = next;
        }
    }

    /// Like [`fetch`](Self::fetch), but a disabled input resolves to `Idle`
    /// without any request.
    pub async fn query(&self, input: &QueryInput) -> QueryState {
        match input.key() {
            Some(key) => self.fetch(&key).await,
            None => QueryState::Idle,
        }
    }

    /// Drop whatever is cached for `key` and fetch it again. A request that
    /// is still pending for the old entry completes into the void.
    pub async fn refetch(&self, key: &QueryKey) -> QueryState {
        self.invalidate(key);
        self.fetch(key).await
    }

    /// Forget `key`. Returns whether an entry existed.
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        let removed = self.inner.entries.borrow_mut().remove(key).is_some();
        if removed {
            debug!("invalidated {}", key);
            self.notify(key, &QueryState::Idle);
        }
        removed
    }

    /// Record one more view holding `key`.
    pub fn acquire(&self, key: &QueryKey) {
        *self
            .inner
            .holders
            .borrow_mut()
            .entry(key.clone())
            .or_insert(0) += 1;
    }

    /// Record that one view let go of `key`. Once no view holds it, its
    /// entry is evicted; returns whether that happened.
    pub fn release(&self, key: &QueryKey) -> bool {
        let unused = {
            let mut holders = self.inner.holders.borrow_mut();
            match holders.get_mut(key) {
                Some(count) if *count > 1 => {
                    *count -= 1;
                    false
                }
                Some(_) => {
                    holders.remove(key);
                    true
                }
                None => false,
            }
        };
        if !unused {
            return false;
        }
        debug!("evicting unused {}", key);
        self.invalidate(key)
    }

    /// Number of views holding `key`.
    pub fn holders(&self, key: &QueryKey) -> usize {
        self.inner.holders.borrow().get(key).copied().unwrap_or(0)
    }

    /// Register a listener called on every state transition of any key.
    pub fn subscribe(&self, listener: impl Fn(&QueryKey, &QueryState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_subscription.get());
        self.inner.next_subscription.set(id.0 + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    fn notify(&self, key: &QueryKey, state: &QueryState) {
        self.inner.notify(key, state);
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        match self.inner.config.stale_after {
            None => true,
            Some(stale_after) => Utc::now() - entry.updated_at < stale_after,
        }
    }

    fn lookup_or_start(&self, key: &QueryKey, sticky_errors: bool) -> Lookup {
        if let Some(entry) = self.inner.entries.borrow().get(key) {
            match (&entry.state, &entry.in_flight) {
                (QueryState::Loading, Some(shared)) => {
                    debug!("joining in-flight request for {}", key);
                    return Lookup::InFlight(shared.clone());
                }
                (QueryState::Error(_), _) if sticky_errors => {
                    return Lookup::Ready(entry.state.clone())
                }
                (QueryState::Success(_), _) if self.is_fresh(entry) => {
                    debug!("cache hit for {}", key);
                    return Lookup::Ready(entry.state.clone());
                }
                _ => {}
            }
        }
        debug!("cache miss for {}", key);
        Lookup::InFlight(self.start(key))
    }

    fn start(&self, key: &QueryKey) -> SharedFetch {
        let generation = self.inner.next_generation.get();
        self.inner.next_generation.set(generation + 1);

        let client = Rc::clone(&self.inner.client);
        let cache: Weak<Inner<T>> = Rc::downgrade(&self.inner);
        let retry = self.inner.config.retry;
        let request_key = key.clone();

        let shared = async move {
            let result = fetch_with_retry(&client, &request_key, retry)
                .await
                .map(Rc::new);
            if let Some(cache) = cache.upgrade() {
                cache.commit(&request_key, generation, &result);
            }
            result
        }
        .boxed_local()
        .shared();

        self.inner.entries.borrow_mut().insert(
            key.clone(),
            CacheEntry {
                state: QueryState::Loading,
                updated_at: Utc::now(),
                generation,
                in_flight: Some(shared.clone()),
            },
        );
        self.notify(key, &QueryState::Loading);
        shared
    }
}

impl<T> Inner<T> {
    fn commit(&self, key: &QueryKey, generation: u64, result: &FetchResult) {
        let state = {
            let mut entries = self.entries.borrow_mut();
            match entries.get_mut(key) {
                Some(entry) if entry.generation == generation => {
                    entry.state = QueryState::from(result.clone());
                    entry.updated_at = Utc::now();
                    entry.in_flight = None;
                    entry.state.clone()
                }
                _ => {
                    debug!("discarding stale response for {}", key);
                    return;
                }
            }
        };
        self.notify(key, &state);
    }

    fn notify(&self, key: &QueryKey, state: &QueryState) {
        // Snapshot so listeners may subscribe or unsubscribe while being called.
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(key, state);
        }
    }
}

async fn fetch_with_retry<T: Transport>(
    client: &IndicatorClient<T>,
    key: &QueryKey,
    retry: u32,
) -> Result<IndicatorResponse, FetchError> {
    let max_tries = retry + 1;
    let mut attempt = 1;
    loop {
        match client.fetch(key).await {
            Err(FetchError::Network(message)) if attempt < max_tries => {
                warn!(
                    "Attempt {}/{}: request failed for {}: {}",
                    attempt, max_tries, key, message
                );
                attempt += 1;
            }
            other => return other,
        }
    }
}
