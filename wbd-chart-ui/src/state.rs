//! Application state managed via Dioxus context.
//!
//! `AppState` bundles the reactive signals shared by every card into a single
//! struct provided via `use_context_provider`. Child components retrieve it
//! with `use_context::<AppState>()`.

use crate::js_bridge::WebTransport;
use dioxus::prelude::*;
use wbd_api::country::asean_iso2;
use wbd_api::{ApiConfig, IndicatorClient};
use wbd_query::{CacheConfig, QueryCache};

/// The cache type used in the browser.
pub type DashboardCache = QueryCache<WebTransport>;

/// Shared application state for the dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// One cache for all cards so identical keys share one request.
    pub cache: Signal<DashboardCache>,
    /// ISO2 codes picked in the header; drives every card.
    pub selected_countries: Signal<Vec<String>>,
}

impl AppState {
    /// All ten countries selected, default API and cache settings.
    pub fn new() -> Self {
        Self::with_config(ApiConfig::default(), CacheConfig::default())
    }

    pub fn with_config(api: ApiConfig, cache: CacheConfig) -> Self {
        let client = IndicatorClient::new(WebTransport, api);
        Self {
            cache: Signal::new(QueryCache::new(client, cache)),
            selected_countries: Signal::new(asean_iso2()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
