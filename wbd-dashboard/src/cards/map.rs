//! Choropleth of one indicator for a single year.

use super::{CARD_STYLE, CHART_HEIGHT};
use dioxus::prelude::*;
use wbd_api::{Indicator, TimeRange};
use wbd_chart_ui::components::{ChartContent, ChartHeader, IndicatorDropdown, TimeSlider};
use wbd_chart_ui::hooks::use_indicator_query;
use wbd_chart_ui::selection::YearSlider;
use wbd_chart_ui::state::AppState;
use wbd_chart_ui::view::ChartView;
use wbd_chart_ui::{js_bridge, plots};
use wbd_data::to_geo_series;
use wbd_query::QueryInput;

const CHART_CONTAINER_ID: &str = "map-chart";

#[component]
pub fn MapCard() -> Element {
    let state = use_context::<AppState>();
    let mut indicator = use_signal(Indicator::default);
    let mut year = use_signal(|| YearSlider::default().initial());

    let query = use_indicator_query(move || {
        QueryInput::new(
            Some(indicator()),
            (state.selected_countries)(),
            Some(TimeRange::Year(year())),
        )
    });

    use_effect(move || {
        let query_state = query.state();
        let label = indicator().label();
        let Some(data) = query_state
            .data()
            .filter(|_| ChartView::resolve(&query_state).has_plot())
        else {
            js_bridge::destroy_chart(CHART_CONTAINER_ID);
            return;
        };
        let figure = plots::choropleth_figure(&to_geo_series(data), label);
        js_bridge::render_plot(CHART_CONTAINER_ID, &figure.to_string());
    });

    let view = ChartView::resolve(&query.state());

    rsx! {
        section {
            style: CARD_STYLE,
            ChartHeader {
                title: "Map, {year}",
                description: indicator().label().to_string(),
            }
            IndicatorDropdown {
                value: indicator(),
                on_change: move |picked: Indicator| indicator.set(picked),
            }
            TimeSlider {
                value: year(),
                on_change: move |picked: i32| year.set(picked),
            }
            ChartContent {
                view,
                container_id: CHART_CONTAINER_ID.to_string(),
                min_height: CHART_HEIGHT,
                on_retry: move |_| query.refetch(),
            }
        }
    }
}
