//! Core types and World Bank indicator API client.
//!
//! - `catalog`: the closed set of indicators the dashboard can chart
//! - `country`: the fixed ASEAN country universe (ISO2 / ISO3 / name)
//! - `observation`: wire and domain types for one API response page
//! - `request`: `QueryKey` and URL construction
//! - `fetcher`: the Remote Data Fetcher over a pluggable `Transport`

pub mod catalog;
pub mod country;
pub mod error;
pub mod fetcher;
pub mod observation;
pub mod request;

pub use catalog::Indicator;
pub use error::{FetchError, Result};
pub use fetcher::{ApiConfig, HttpResponse, IndicatorClient, Transport};
pub use observation::{IndicatorResponse, Observation, PaginationMeta};
pub use request::{QueryKey, TimeRange};
