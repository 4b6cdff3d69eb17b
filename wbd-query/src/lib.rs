//! Query Cache/Dedup Layer.
//!
//! An explicit finite-state map keyed by [`QueryKey`]: every key is either
//! absent (idle), pending, succeeded or failed. Concurrent requests for the
//! same key share one in-flight fetch; results that arrive for a key that
//! was invalidated or abandoned in the meantime are discarded instead of
//! committed.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`), matching the
//! browser event loop the dashboard runs on.

pub mod cache;
pub mod input;
pub mod observer;
pub mod state;

pub use cache::{CacheConfig, QueryCache, SubscriptionId};
pub use input::QueryInput;
pub use observer::QueryObserver;
pub use state::{EntryStatus, QueryState};
pub use wbd_api::QueryKey;
