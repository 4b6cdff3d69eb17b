//! Countries ranked by their average over a chosen year range.

use super::{CARD_STYLE, CHART_HEIGHT};
use dioxus::prelude::*;
use wbd_api::{Indicator, TimeRange};
use wbd_chart_ui::components::{ChartContent, ChartHeader, IndicatorDropdown, TimeRangeSelector};
use wbd_chart_ui::hooks::use_indicator_query;
use wbd_chart_ui::selection::YearRange;
use wbd_chart_ui::state::AppState;
use wbd_chart_ui::view::ChartView;
use wbd_chart_ui::{js_bridge, plots};
use wbd_data::{chart_config, countries, to_bar_series};
use wbd_query::QueryInput;

const CHART_CONTAINER_ID: &str = "bar-chart";

#[component]
pub fn BarCard() -> Element {
    let state = use_context::<AppState>();
    let mut indicator = use_signal(Indicator::default);
    let mut years = use_signal(|| YearRange::default().initial());

    let query = use_indicator_query(move || {
        let (start, end) = years();
        QueryInput::new(
            Some(indicator()),
            (state.selected_countries)(),
            Some(TimeRange::span(start, end)),
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
        let bars = to_bar_series(data);
        let styles = chart_config(&countries(data));
        let figure = plots::bar_figure(&bars, &styles, label);
        js_bridge::render_plot(CHART_CONTAINER_ID, &figure.to_string());
    });

    let view = ChartView::resolve(&query.state());
    let (start, end) = years();

    rsx! {
        section {
            style: CARD_STYLE,
            ChartHeader {
                title: "Average, {start} to {end}",
                description: indicator().label().to_string(),
            }
            IndicatorDropdown {
                value: indicator(),
                on_change: move |picked: Indicator| indicator.set(picked),
            }
            TimeRangeSelector {
                value: years(),
                on_change: move |range: (i32, i32)| years.set(range),
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
