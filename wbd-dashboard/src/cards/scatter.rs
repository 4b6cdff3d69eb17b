//! GDP per capita against exports, bubble size by population, 2011-2021.

use super::{CARD_STYLE, CHART_HEIGHT};
use dioxus::prelude::*;
use wbd_api::{Indicator, TimeRange};
use wbd_chart_ui::components::{ChartContent, ChartHeader};
use wbd_chart_ui::hooks::{use_indicator_query, QueryHandle};
use wbd_chart_ui::selection::{MAX_YEAR, MIN_YEAR};
use wbd_chart_ui::state::AppState;
use wbd_chart_ui::view::ChartView;
use wbd_chart_ui::{js_bridge, plots};
use wbd_data::to_scatter_points;
use wbd_query::QueryInput;

const CHART_CONTAINER_ID: &str = "scatter-chart";

fn use_scatter_query(state: AppState, indicator: Indicator) -> QueryHandle {
    use_indicator_query(move || {
        QueryInput::new(
            Some(indicator),
            (state.selected_countries)(),
            Some(TimeRange::span(MIN_YEAR, MAX_YEAR)),
        )
    })
}

#[component]
pub fn ScatterCard() -> Element {
    let state = use_context::<AppState>();

    // Three keys, fetched concurrently.
    let gdp = use_scatter_query(state, Indicator::GdpPerCapita);
    let exports = use_scatter_query(state, Indicator::Exports);
    let population = use_scatter_query(state, Indicator::Population);

    use_effect(move || {
        let (gdp, exports, population) = (gdp.state(), exports.state(), population.state());
        let view = ChartView::combine(&[&gdp, &exports, &population]);
        let (Some(gdp), Some(exports), Some(population), true) =
            (gdp.data(), exports.data(), population.data(), view.has_plot())
        else {
            js_bridge::destroy_chart(CHART_CONTAINER_ID);
            return;
        };
        let points = to_scatter_points(gdp, exports, population);
        js_bridge::render_plot(CHART_CONTAINER_ID, &plots::scatter_figure(&points).to_string());
    });

    let states = [gdp.state(), exports.state(), population.state()];
    let view = ChartView::combine(&[&states[0], &states[1], &states[2]]);

    rsx! {
        section {
            style: CARD_STYLE,
            ChartHeader {
                title: "Wealth, trade and population, {MIN_YEAR} to {MAX_YEAR}",
                description: "GDP per capita (x, log) against exports % of GDP (y); bubble area is population".to_string(),
            }
            ChartContent {
                view,
                container_id: CHART_CONTAINER_ID.to_string(),
                min_height: CHART_HEIGHT,
                on_retry: move |_| {
                    for query in [gdp, exports, population] {
                        if query.state().is_error() {
                            query.refetch();
                        }
                    }
                },
            }
        }
    }
}
