//! Shared Dioxus components and Plotly bridge for the indicator dashboard.
//!
//! This crate provides:
//! - `selection`: selector state machines (popover, indicator, countries, years, legend)
//! - `view`: loading > error > empty > content resolution for a chart card
//! - `plots`: Plotly figure builders for the derived chart tables
//! - `js_bridge`: Plotly calls via `js_sys::eval()` and a browser `fetch` transport
//! - `state`: Reactive AppState with Dioxus Signals
//! - `hooks`: `use_indicator_query`, the cache as seen by one component
//! - `components`: Reusable RSX components (selectors, containers, etc.)

pub mod components;
pub mod hooks;
pub mod js_bridge;
pub mod plots;
pub mod selection;
pub mod state;
pub mod view;
