//! Indicator trend per country over 2011-2021.

use super::{CARD_STYLE, CHART_HEIGHT};
use dioxus::prelude::*;
use wbd_api::{Indicator, TimeRange};
use wbd_chart_ui::components::{ChartContent, ChartHeader, ChartToggleLegend, IndicatorDropdown};
use wbd_chart_ui::hooks::use_indicator_query;
use wbd_chart_ui::selection::{SeriesVisibility, MAX_YEAR, MIN_YEAR};
use wbd_chart_ui::state::AppState;
use wbd_chart_ui::view::ChartView;
use wbd_chart_ui::{js_bridge, plots};
use wbd_data::legend::CountryRef;
use wbd_data::{chart_config, countries, to_year_series, y_domain};
use wbd_query::QueryInput;

const CHART_CONTAINER_ID: &str = "line-chart";

#[component]
pub fn LineCard() -> Element {
    let state = use_context::<AppState>();
    let mut indicator = use_signal(Indicator::default);
    let mut visibility = use_signal(SeriesVisibility::default);

    let query = use_indicator_query(move || {
        QueryInput::new(
            Some(indicator()),
            (state.selected_countries)(),
            Some(TimeRange::span(MIN_YEAR, MAX_YEAR)),
        )
    });

    // ─── Render the figure whenever data or legend toggles change ───
    use_effect(move || {
        let query_state = query.state();
        let visibility = visibility();
        let label = indicator().label();
        let Some(data) = query_state
            .data()
            .filter(|_| ChartView::resolve(&query_state).has_plot())
        else {
            js_bridge::destroy_chart(CHART_CONTAINER_ID);
            return;
        };

        let rows = to_year_series(data);
        let present = countries(data);
        let styles = chart_config(&present);
        let visible: Vec<CountryRef> = present
            .into_iter()
            .filter(|c| visibility.is_visible(&c.id))
            .collect();
        let figure = plots::line_figure(&rows, &styles, &visibility, y_domain(&rows, &visible), label);
        js_bridge::render_plot(CHART_CONTAINER_ID, &figure.to_string());
    });

    let query_state = query.state();
    let view = ChartView::resolve(&query_state);
    let styles = query_state
        .data()
        .map(|d| chart_config(&countries(d)))
        .unwrap_or_default();
    let show_legend = view == ChartView::Content;

    rsx! {
        section {
            style: CARD_STYLE,
            ChartHeader {
                title: "Trend, {MIN_YEAR} to {MAX_YEAR}",
                description: indicator().label().to_string(),
            }
            IndicatorDropdown {
                value: indicator(),
                on_change: move |picked: Indicator| {
                    indicator.set(picked);
                    visibility.write().show_all();
                },
            }
            ChartContent {
                view,
                container_id: CHART_CONTAINER_ID.to_string(),
                min_height: CHART_HEIGHT,
                on_retry: move |_| query.refetch(),
            }
            if show_legend {
                ChartToggleLegend {
                    styles,
                    visibility: visibility(),
                    on_toggle: move |id: String| visibility.write().toggle(&id),
                }
            }
        }
    }
}
