use crate::input::QueryInput;
use crate::state::QueryState;
use log::debug;
use wbd_api::QueryKey;

/// The view side of a query: remembers which key a chart currently wants and
/// refuses results for any other key.
///
/// Fetches are never cancelled, so a slow response for an abandoned key can
/// arrive after the user already picked something else. Completions are
/// matched against the current key before they are applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryObserver {
    current: Option<QueryKey>,
    state: QueryState,
}

impl QueryObserver {
    pub fn new() -> Self {
        QueryObserver::default()
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn current_key(&self) -> Option<&QueryKey> {
        self.current.as_ref()
    }

    /// Point the observer at new inputs. Returns the key that must now be
    /// fetched, or `None` when the inputs are disabled or unchanged.
    pub fn set_input(&mut self, input: &QueryInput) -> Option<QueryKey> {
        let key = input.key();
        if key == self.current && key.is_some() {
            return None;
        }
        self.current = key.clone();
        self.state = match key {
            Some(_) => QueryState::Loading,
            None => QueryState::Idle,
        };
        key
    }

    /// Apply the outcome of a fetch for `key`. Returns `false` and leaves
    /// the state untouched when `key` is no longer the current one.
    pub fn complete(&mut self, key: &QueryKey, state: QueryState) -> bool {
        if self.current.as_ref() != Some(key) {
            debug!("ignoring result for abandoned key {}", key);
            return false;
        }
        self.state = state;
        true
    }

    /// Apply a transition the cache reports for `key`, whichever view caused
    /// it. Invalidations are skipped: a held key is only invalidated right
    /// before it is requested again.
    pub fn follow(&mut self, key: &QueryKey, state: &QueryState) -> bool {
        if matches!(state, QueryState::Idle) || self.state == *state {
            return false;
        }
        self.complete(key, state.clone())
    }
}
