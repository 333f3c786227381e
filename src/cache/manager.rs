//! Request cache with at-most-one-in-flight request per key
//!
//! Provides a `RequestCache` that runs caller-supplied producers on the Tokio
//! runtime, records their outcome per key and notifies observers of every
//! status change.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{CacheEntry, CacheKey, Status};

/// Callback invoked after every change to an observed entry
pub type Listener<T, E> = Arc<dyn Fn(&CacheKey, &CacheEntry<T, E>) + Send + Sync>;

/// Handle returned by `on_change`, used to remove the listener again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Configuration for the request cache
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// Maximum number of entries kept; `None` keeps every entry for the
    /// lifetime of the cache. Enforced when a request starts or settles.
    pub max_entries: Option<usize>,
}

impl CacheConfig {
    /// Configuration with a least-recently-used cap on the number of entries
    pub fn bounded(max_entries: usize) -> Self {
        Self {
            max_entries: Some(max_entries.max(1)),
        }
    }
}

/// Result of asking the cache to run a producer
#[derive(Debug)]
pub enum TriggerOutcome {
    /// The producer was invoked; the handle completes once the entry settled
    Started(JoinHandle<()>),
    /// A request for the key was already in flight; the producer was dropped
    AlreadyPending,
}

impl TriggerOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, TriggerOutcome::Started(_))
    }

    /// Waits for the started request to settle; returns immediately otherwise
    pub async fn join(self) {
        if let TriggerOutcome::Started(handle) = self {
            // Panics and aborts are already folded into the entry
            let _ = handle.await;
        }
    }
}

/// Per-key bookkeeping
struct Slot<T, E> {
    /// Holds the entry and wakes subscribers on change
    tx: watch::Sender<CacheEntry<T, E>>,
    /// Id of the most recent request; results of older requests are discarded
    request: u64,
    /// Logical time of the last access, for LRU eviction
    last_access: u64,
    listeners: Vec<(ListenerId, Listener<T, E>)>,
}

impl<T, E> Slot<T, E> {
    fn new() -> Self {
        let (tx, _) = watch::channel(CacheEntry::idle());
        Self {
            tx,
            request: 0,
            last_access: 0,
            listeners: Vec::new(),
        }
    }

    fn is_evictable(&self) -> bool {
        !self.tx.borrow().is_pending() && self.listeners.is_empty()
    }

    fn listener_fns(&self) -> Vec<Listener<T, E>> {
        self.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
    }
}

struct State<T, E> {
    slots: HashMap<CacheKey, Slot<T, E>>,
    /// Monotonic logical clock shared by recency and settlement timestamps
    clock: u64,
    /// Request ids are cache-wide so a recreated slot never reuses one
    next_request: u64,
    next_listener: u64,
}

impl<T, E> State<T, E> {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn next_request(&mut self) -> u64 {
        self.next_request += 1;
        self.next_request
    }

    /// Returns the slot for `key`, creating an idle one if needed. Never
    /// evicts.
    fn slot_mut(&mut self, key: &CacheKey) -> &mut Slot<T, E> {
        let now = self.tick();
        let slot = self.slots.entry(key.clone()).or_insert_with(Slot::new);
        slot.last_access = now;
        slot
    }

    /// Evicts least recently used entries other than `keep` until at most
    /// `target` remain. Pending and observed entries are never evicted.
    fn evict_to(&mut self, target: usize, keep: &CacheKey) {
        while self.slots.len() > target {
            let victim = self
                .slots
                .iter()
                .filter(|(key, slot)| *key != keep && slot.is_evictable())
                .min_by_key(|(_, slot)| slot.last_access)
                .map(|(key, _)| key.clone());

            match victim {
                Some(key) => {
                    self.slots.remove(&key);
                    debug!(key = %key, "evicted least recently used entry");
                }
                None => break,
            }
        }
    }
}

struct Inner<T, E> {
    state: Mutex<State<T, E>>,
    config: CacheConfig,
}

/// A keyed, de-duplicating cache of asynchronous request results
///
/// Cloning the cache is cheap; clones share the same entries. Producers are
/// spawned onto the current Tokio runtime, so `trigger`, `refetch` and
/// `fetch` must be called from within one.
///
/// Each key moves through `idle -> pending -> success | error`, and back to
/// `pending` whenever it is triggered again. Every request gets an id that is
/// unique for the lifetime of the cache; a response that arrives after a newer
/// request for its key was started (or after the key was invalidated or
/// evicted) is discarded.
pub struct RequestCache<T, E> {
    inner: Arc<Inner<T, E>>,
}

impl<T, E> Clone for RequestCache<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, E> Default for RequestCache<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl<T, E> RequestCache<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Creates an empty cache
    pub fn new(config: CacheConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    slots: HashMap::new(),
                    clock: 0,
                    next_request: 0,
                    next_listener: 0,
                }),
                config,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State<T, E>> {
        // Listeners run outside the lock, so a poisoned state is still consistent
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the current entry for `key`, creating an idle entry if none
    /// exists. Never starts a request and never evicts other entries; a
    /// bounded cache only evicts when a request starts or settles.
    pub fn get(&self, key: &CacheKey) -> CacheEntry<T, E> {
        let mut state = self.lock();
        let slot = state.slot_mut(key);
        let entry = slot.tx.borrow().clone();
        entry
    }

    /// Runs `producer` for `key` unless a request for `key` is already in
    /// flight.
    ///
    /// On start the entry becomes `pending` and its error is cleared. When the
    /// producer resolves the entry becomes `success` with the new data; when it
    /// fails the entry becomes `error` and keeps the data of the previous
    /// success.
    pub fn trigger<F, Fut>(&self, key: &CacheKey, producer: F) -> TriggerOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        self.start(key, producer, false)
    }

    /// Runs `producer` for `key` even if a request is in flight. The older
    /// request keeps running but its result is discarded.
    pub fn refetch<F, Fut>(&self, key: &CacheKey, producer: F) -> TriggerOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        self.start(key, producer, true)
    }

    /// Returns the entry for `key` if it holds a successful result, otherwise
    /// triggers `producer` and waits for the entry to settle.
    pub async fn fetch<F, Fut>(&self, key: &CacheKey, producer: F) -> CacheEntry<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let current = self.get(key);
        if current.is_success() {
            debug!(key = %key, "cache hit");
            return current;
        }

        self.trigger(key, producer);
        self.settled(key).await
    }

    /// Waits until the entry for `key` is no longer pending
    pub async fn settled(&self, key: &CacheKey) -> CacheEntry<T, E> {
        let mut rx = self.subscribe(key);
        let settled = rx
            .wait_for(|entry| !entry.is_pending())
            .await
            .map(|entry| (*entry).clone());

        match settled {
            Ok(entry) => entry,
            // The slot was evicted while we waited; report what is there now
            Err(_) => self.get(key),
        }
    }

    /// Resets the entry for `key` to idle, discarding its data and error.
    /// A request in flight for `key` will not write its result.
    pub fn invalidate(&self, key: &CacheKey) {
        let (entry, listeners) = {
            let mut state = self.lock();
            let request = state.next_request();
            let Some(slot) = state.slots.get_mut(key) else {
                return;
            };
            slot.request = request;
            slot.tx.send_replace(CacheEntry::idle());
            let invalidated = (slot.tx.borrow().clone(), slot.listener_fns());
            invalidated
        };

        debug!(key = %key, "invalidated");
        notify(key, &entry, listeners);
    }

    /// Returns a receiver that observes every change to the entry for `key`
    pub fn subscribe(&self, key: &CacheKey) -> watch::Receiver<CacheEntry<T, E>> {
        let mut state = self.lock();
        let rx = state.slot_mut(key).tx.subscribe();
        rx
    }

    /// Registers `listener` to be called after every change to the entry for
    /// `key`. Entries with listeners are exempt from eviction.
    pub fn on_change<F>(&self, key: &CacheKey, listener: F) -> ListenerId
    where
        F: Fn(&CacheKey, &CacheEntry<T, E>) + Send + Sync + 'static,
    {
        let mut state = self.lock();
        state.next_listener += 1;
        let id = ListenerId(state.next_listener);
        state
            .slot_mut(key)
            .listeners
            .push((id, Arc::new(listener)));
        id
    }

    /// Removes a listener registered with `on_change`. Returns false if it was
    /// not registered for `key`.
    pub fn remove_listener(&self, key: &CacheKey, id: ListenerId) -> bool {
        let mut state = self.lock();
        let Some(slot) = state.slots.get_mut(key) else {
            return false;
        };
        let before = slot.listeners.len();
        slot.listeners.retain(|(existing, _)| *existing != id);
        slot.listeners.len() != before
    }

    /// Number of entries currently held
    pub fn len(&self) -> usize {
        self.lock().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys currently held, sorted
    pub fn keys(&self) -> Vec<CacheKey> {
        let mut keys: Vec<_> = self.lock().slots.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// All entries, ordered by key
    pub fn snapshot(&self) -> Vec<(CacheKey, CacheEntry<T, E>)> {
        let state = self.lock();
        let mut entries: Vec<_> = state
            .slots
            .iter()
            .map(|(key, slot)| (key.clone(), slot.tx.borrow().clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    fn start<F, Fut>(&self, key: &CacheKey, producer: F, force: bool) -> TriggerOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let (request, entry, listeners) = {
            let mut state = self.lock();
            let request = state.next_request();
            let slot = state.slot_mut(key);
            let pending = slot.tx.borrow().is_pending();
            if pending && !force {
                debug!(key = %key, "request already in flight");
                return TriggerOutcome::AlreadyPending;
            }

            slot.request = request;
            slot.tx.send_modify(|entry| {
                entry.status = Status::Pending;
                entry.error = None;
            });
            let (entry, listeners) = (slot.tx.borrow().clone(), slot.listener_fns());

            if let Some(max) = self.inner.config.max_entries {
                state.evict_to(max, key);
            }
            (request, entry, listeners)
        };

        debug!(key = %key, request, "request started");
        notify(key, &entry, listeners);

        // Armed before the producer runs so a panicking producer cannot leave
        // the entry pending
        let mut guard = SettleGuard {
            cache: self.clone(),
            key: key.clone(),
            request,
            armed: true,
        };
        let future = producer();

        let handle = tokio::spawn(async move {
            let result = future.await;
            guard.armed = false;
            guard.cache.settle(&guard.key, guard.request, result);
        });

        TriggerOutcome::Started(handle)
    }

    fn settle(&self, key: &CacheKey, request: u64, result: Result<T, E>) {
        let (entry, listeners) = {
            let mut state = self.lock();
            let now = state.tick();
            let Some(slot) = state.slots.get_mut(key) else {
                return;
            };
            if slot.request != request {
                debug!(
                    key = %key,
                    request,
                    current = slot.request,
                    "discarding response from superseded request"
                );
                return;
            }

            let failed = result.is_err();
            slot.last_access = now;
            slot.tx.send_modify(|entry| {
                match result {
                    Ok(data) => {
                        entry.status = Status::Success;
                        entry.data = Some(data);
                        entry.error = None;
                    }
                    Err(error) => {
                        entry.status = Status::Error;
                        entry.error = Some(error);
                    }
                }
                entry.updated_at = Some(now);
                entry.settled_at = Some(Utc::now());
            });

            debug!(key = %key, request, failed, "request settled");

            let settled = (slot.tx.borrow().clone(), slot.listener_fns());
            if let Some(max) = self.inner.config.max_entries {
                state.evict_to(max, key);
            }
            settled
        };

        notify(key, &entry, listeners);
    }

    /// Called when a request task ends without a result (panic or abort)
    fn abandon(&self, key: &CacheKey, request: u64) {
        let (entry, listeners) = {
            let mut state = self.lock();
            let Some(slot) = state.slots.get_mut(key) else {
                return;
            };
            if slot.request != request {
                return;
            }

            slot.tx.send_modify(|entry| {
                entry.status = if entry.data.is_some() {
                    Status::Success
                } else {
                    Status::Idle
                };
            });
            let abandoned = (slot.tx.borrow().clone(), slot.listener_fns());
            abandoned
        };

        warn!(key = %key, request, "request ended without a result");
        notify(key, &entry, listeners);
    }
}

/// Rolls the entry back if the request task is dropped before settling
struct SettleGuard<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    cache: RequestCache<T, E>,
    key: CacheKey,
    request: u64,
    armed: bool,
}

impl<T, E> Drop for SettleGuard<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn drop(&mut self) {
        if self.armed {
            self.cache.abandon(&self.key, self.request);
        }
    }
}

fn notify<T, E>(key: &CacheKey, entry: &CacheEntry<T, E>, listeners: Vec<Listener<T, E>>) {
    for listener in listeners {
        listener(key, entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::oneshot;

    type TestCache = RequestCache<u32, String>;

    fn key(name: &str) -> CacheKey {
        CacheKey::from(name)
    }

    #[tokio::test]
    async fn test_trigger_marks_entry_pending_until_settled() {
        let cache = TestCache::default();
        let (tx, rx) = oneshot::channel::<Result<u32, String>>();

        let outcome = cache.trigger(&key("a"), move || async move {
            rx.await.unwrap_or_else(|_| Err("dropped".to_string()))
        });
        assert!(outcome.is_started());
        assert!(cache.get(&key("a")).is_pending());

        tx.send(Ok(5)).unwrap();
        outcome.join().await;

        let entry = cache.get(&key("a"));
        assert_eq!(entry.status, Status::Success);
        assert_eq!(entry.data, Some(5));
        assert!(entry.settled_at.is_some());
    }

    #[tokio::test]
    async fn test_trigger_clears_previous_error() {
        let cache = TestCache::default();
        cache
            .trigger(&key("a"), || async { Err("boom".to_string()) })
            .join()
            .await;
        assert!(cache.get(&key("a")).error.is_some());

        let (tx, rx) = oneshot::channel::<Result<u32, String>>();
        let outcome = cache.trigger(&key("a"), move || async move {
            rx.await.unwrap_or_else(|_| Err("dropped".to_string()))
        });

        let entry = cache.get(&key("a"));
        assert!(entry.is_pending());
        assert!(entry.error.is_none());

        tx.send(Ok(1)).unwrap();
        outcome.join().await;
    }

    #[tokio::test]
    async fn test_updated_at_increases_with_each_settlement() {
        let cache = TestCache::default();
        cache.trigger(&key("a"), || async { Ok(1) }).join().await;
        let first = cache.get(&key("a")).updated_at.unwrap();

        cache.trigger(&key("a"), || async { Ok(2) }).join().await;
        let second = cache.get(&key("a")).updated_at.unwrap();

        assert!(second > first);
    }

    #[tokio::test]
    async fn test_fetch_returns_cached_success_without_running_producer() {
        let cache = TestCache::default();
        let calls = Arc::new(AtomicUsize::new(0));

        let entry = cache.fetch(&key("a"), || async { Ok(3) }).await;
        assert_eq!(entry.data, Some(3));

        let counter = Arc::clone(&calls);
        let entry = cache
            .fetch(&key("a"), move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Ok(4) }
            })
            .await;

        assert_eq!(entry.data, Some(3));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_retries_after_error() {
        let cache = TestCache::default();
        let entry = cache
            .fetch(&key("a"), || async { Err("down".to_string()) })
            .await;
        assert!(entry.is_error());

        let entry = cache.fetch(&key("a"), || async { Ok(9) }).await;
        assert!(entry.is_success());
        assert_eq!(entry.data, Some(9));
    }

    #[tokio::test]
    async fn test_concurrent_fetches_share_one_request() {
        let cache = TestCache::default();
        let calls = Arc::new(AtomicUsize::new(0));

        let first = Arc::clone(&calls);
        let second = Arc::clone(&calls);
        let k = key("a");
        let (a, b) = futures::join!(
            cache.fetch(&k, move || {
                first.fetch_add(1, Ordering::SeqCst);
                async { Ok(1) }
            }),
            cache.fetch(&k, move || {
                second.fetch_add(1, Ordering::SeqCst);
                async { Ok(2) }
            }),
        );

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(a.data, Some(1));
        assert_eq!(b.data, Some(1));
    }

    #[tokio::test]
    async fn test_listener_sees_each_transition() {
        let cache = TestCache::default();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let recorder = Arc::clone(&seen);
        let id = cache.on_change(&key("a"), move |_, entry| {
            recorder.lock().unwrap().push(entry.status);
        });

        cache.trigger(&key("a"), || async { Ok(1) }).join().await;
        cache
            .trigger(&key("a"), || async { Err("x".to_string()) })
            .join()
            .await;
        cache.invalidate(&key("a"));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                Status::Pending,
                Status::Success,
                Status::Pending,
                Status::Error,
                Status::Idle
            ]
        );

        assert!(cache.remove_listener(&key("a"), id));
        assert!(!cache.remove_listener(&key("a"), id));
        cache.trigger(&key("a"), || async { Ok(2) }).join().await;
        assert_eq!(seen.lock().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_listener_may_read_cache() {
        let cache = TestCache::default();
        let observed = Arc::new(Mutex::new(None));

        let reader = cache.clone();
        let slot = Arc::clone(&observed);
        cache.on_change(&key("a"), move |key, _| {
            *slot.lock().unwrap() = Some(reader.get(key).status);
        });

        cache.trigger(&key("a"), || async { Ok(1) }).join().await;
        assert_eq!(*observed.lock().unwrap(), Some(Status::Success));
    }

    #[tokio::test]
    async fn test_subscriber_observes_settlement() {
        let cache = TestCache::default();
        let mut rx = cache.subscribe(&key("a"));

        cache.trigger(&key("a"), || async { Ok(8) });
        let entry = rx
            .wait_for(|entry| entry.is_success())
            .await
            .map(|entry| (*entry).clone())
            .unwrap();

        assert_eq!(entry.data, Some(8));
    }

    #[tokio::test]
    async fn test_aborted_request_does_not_stay_pending() {
        let cache = TestCache::default();
        let (_tx, rx) = oneshot::channel::<Result<u32, String>>();

        let outcome = cache.trigger(&key("a"), move || async move {
            rx.await.unwrap_or_else(|_| Err("dropped".to_string()))
        });
        let TriggerOutcome::Started(handle) = outcome else {
            panic!("expected request to start");
        };

        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());

        assert_eq!(cache.get(&key("a")).status, Status::Idle);
    }

    #[tokio::test]
    async fn test_panicking_producer_keeps_previous_data() {
        let cache = TestCache::default();
        cache.trigger(&key("a"), || async { Ok(1) }).join().await;

        let outcome = cache.trigger(&key("a"), || async {
            if true {
                panic!("producer exploded");
            }
            Ok(2)
        });
        outcome.join().await;

        let entry = cache.get(&key("a"));
        assert_eq!(entry.status, Status::Success);
        assert_eq!(entry.data, Some(1));
    }

    #[tokio::test]
    async fn test_lru_evicts_least_recently_used() {
        let cache = TestCache::new(CacheConfig::bounded(2));
        cache.trigger(&key("a"), || async { Ok(1) }).join().await;
        cache.trigger(&key("b"), || async { Ok(2) }).join().await;
        cache.get(&key("a"));
        cache.trigger(&key("c"), || async { Ok(3) }).join().await;

        let keys: Vec<_> = cache.snapshot().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![key("a"), key("c")]);
    }

    #[tokio::test]
    async fn test_lru_never_evicts_pending_entries() {
        let cache = TestCache::new(CacheConfig::bounded(1));
        let (tx, rx) = oneshot::channel::<Result<u32, String>>();

        let outcome = cache.trigger(&key("a"), move || async move {
            rx.await.unwrap_or_else(|_| Err("dropped".to_string()))
        });
        cache.get(&key("b"));
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&key("a")).is_pending());

        tx.send(Ok(1)).unwrap();
        outcome.join().await;

        let keys: Vec<_> = cache.snapshot().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![key("a")]);
        assert_eq!(cache.get(&key("a")).data, Some(1));
    }

    #[tokio::test]
    async fn test_lru_never_evicts_observed_entries() {
        let cache = TestCache::new(CacheConfig::bounded(1));
        cache.on_change(&key("a"), |_, _| {});
        cache.trigger(&key("b"), || async { Ok(2) }).join().await;
        cache.trigger(&key("c"), || async { Ok(3) }).join().await;

        let keys: Vec<_> = cache.snapshot().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![key("a"), key("c")]);
    }

    #[tokio::test]
    async fn test_get_never_evicts_settled_entries() {
        let cache = TestCache::new(CacheConfig::bounded(1));
        cache.trigger(&key("a"), || async { Ok(1) }).join().await;

        let other = cache.get(&key("b"));
        assert_eq!(other.status, Status::Idle);
        assert_eq!(cache.get(&key("a")).data, Some(1));
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_recreated_slot_ignores_request_from_evicted_slot() {
        let cache = TestCache::new(CacheConfig::bounded(1));
        let (slow_tx, slow_rx) = oneshot::channel::<Result<u32, String>>();

        let slow = cache.trigger(&key("a"), move || async move {
            slow_rx.await.unwrap_or_else(|_| Err("dropped".to_string()))
        });
        cache.invalidate(&key("a"));
        cache.trigger(&key("b"), || async { Ok(2) }).join().await;
        assert_eq!(cache.keys(), vec![key("b")]);

        cache.trigger(&key("a"), || async { Ok(10) }).join().await;
        slow_tx.send(Ok(99)).unwrap();
        slow.join().await;

        assert_eq!(cache.get(&key("a")).data, Some(10));
    }

    #[test]
    fn test_bounded_config_has_at_least_one_entry() {
        assert_eq!(CacheConfig::bounded(0).max_entries, Some(1));
        assert_eq!(CacheConfig::default().max_entries, None);
    }

    #[test]
    fn test_invalidate_unknown_key_is_noop() {
        let cache = TestCache::default();
        cache.invalidate(&key("missing"));
        assert!(cache.is_empty());
    }
}
