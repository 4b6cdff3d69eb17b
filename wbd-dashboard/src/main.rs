//! ASEAN Economic Indicators
//!
//! Four cards over World Bank indicator data for the ten ASEAN states:
//! a multi-line chart, an averaged bar ranking, a choropleth map and a
//! GDP/exports/population bubble scatter.
//!
//! Data flow:
//! 1. The header country multi-select and each card's own selectors feed a
//!    `QueryInput` per card.
//! 2. `use_indicator_query` resolves it through the shared `QueryCache`, so
//!    cards asking for the same key share one request.
//! 3. On success the card derives its table with `wbd-data` and renders a
//!    Plotly figure through the JS bridge.

mod cards;

use cards::{BarCard, LineCard, MapCard, ScatterCard};
use dioxus::prelude::*;
use log::info;
use wbd_chart_ui::components::CountryMultiSelect;
use wbd_chart_ui::js_bridge;
use wbd_chart_ui::state::AppState;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("wbd-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // ─── Load Plotly once on mount ───
    use_effect(|| {
        info!("dashboard mounted");
        js_bridge::load_plotly();
    });

    let selected = (state.selected_countries)();

    rsx! {
        div {
            style: "max-width: 1200px; margin: 0 auto; padding: 16px; font-family: system-ui, -apple-system, sans-serif;",

            header {
                style: "display: flex; flex-wrap: wrap; justify-content: space-between; align-items: center; gap: 12px; margin-bottom: 16px; padding-bottom: 8px; border-bottom: 1px solid #e0e0e0;",
                div {
                    h1 {
                        style: "margin: 0; font-size: 22px;",
                        "ASEAN Economic Indicators"
                    }
                    p {
                        style: "margin: 4px 0 0 0; font-size: 12px; color: #666;",
                        "Source: World Bank Open Data"
                    }
                }
                CountryMultiSelect {
                    value: selected,
                    on_change: move |countries: Vec<String>| state.selected_countries.set(countries),
                }
            }

            div {
                style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(520px, 1fr)); gap: 16px;",
                LineCard {}
                BarCard {}
                MapCard {}
                ScatterCard {}
            }
        }
    }
}
