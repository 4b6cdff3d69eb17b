//! Query hook binding the shared [`QueryCache`](wbd_query::QueryCache) to a
//! component.

use crate::state::{AppState, DashboardCache};
use dioxus::prelude::*;
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;
use wbd_query::{QueryInput, QueryKey, QueryObserver, QueryState};

/// A component's view of one indicator query.
#[derive(Clone, Copy, PartialEq)]
pub struct QueryHandle {
    observer: Signal<QueryObserver>,
    cache: Signal<DashboardCache>,
}

impl QueryHandle {
    /// Current state; reading it subscribes the calling component.
    pub fn state(&self) -> QueryState {
        self.observer.read().state().clone()
    }

    /// Drop the cached entry for the current key and fetch it again. Used to
    /// leave a sticky error state. Other views on the same key follow along
    /// through their cache subscription.
    pub fn refetch(&self) {
        let Some(key) = self.observer.peek().current_key().cloned() else {
            return;
        };
        let mut observer = self.observer;
        let cache = self.cache.peek().clone();
        observer.write().complete(&key, QueryState::Loading);
        spawn(async move {
            let result = cache.refetch(&key).await;
            observer.write().complete(&key, result);
        });
    }
}

/// Subscribe to the query described by `input`.
///
/// Re-runs whenever the signals read by `input` change. Disabled inputs go
/// idle without a request; results for keys the component has moved away
/// from are dropped. The component holds its current key in the cache, and
/// the entry is evicted once no component holds it.
pub fn use_indicator_query(input: impl FnMut() -> QueryInput + 'static) -> QueryHandle {
    let state = use_context::<AppState>();
    let input = use_memo(input);
    let mut observer = use_signal(QueryObserver::new);
    let cache = use_hook(|| state.cache.peek().clone());
    let held: Rc<RefCell<Option<QueryKey>>> = use_hook(|| Rc::new(RefCell::new(None)));

    // Pick up transitions other views cause on our key, e.g. their retry.
    let subscription = use_hook({
        let cache = cache.clone();
        move || {
            cache.subscribe(move |key, next| {
                let mut observer = observer;
                if let Ok(mut observer) = observer.try_write() {
                    observer.follow(key, next);
                };
            })
        }
    });

    use_drop({
        let cache = cache.clone();
        let held = Rc::clone(&held);
        move || {
            cache.unsubscribe(subscription);
            if let Some(key) = held.borrow_mut().take() {
                cache.release(&key);
            }
        }
    });

    use_effect(move || {
        let input = input();
        let next = observer.write().set_input(&input);
        let current = observer.peek().current_key().cloned();
        if *held.borrow() == current {
            return;
        }

        if let Some(key) = &current {
            cache.acquire(key);
        }
        let previous = held.replace(current);
        if let Some(previous) = previous {
            cache.release(&previous);
        }

        let Some(key) = next else {
            return;
        };
        debug!("query {}", key);
        let cache = cache.clone();
        spawn(async move {
            let result = cache.revisit(&key).await;
            observer.write().complete(&key, result);
        });
    });

    QueryHandle {
        observer,
        cache: state.cache,
    }
}
