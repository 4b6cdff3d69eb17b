//! Plotly figures built from the derived chart tables.
//!
//! Each builder returns `{"data": [...], "layout": {...}}` ready for
//! [`crate::js_bridge::render_plot`].

use crate::selection::SeriesVisibility;
use serde_json::{json, Value};
use wbd_data::legend::{color_of, SeriesStyle, PALETTE};
use wbd_data::{BarDatum, GeoDatum, ScatterPoint, YearRow};

const FONT: &str = "system-ui, -apple-system, sans-serif";

fn base_layout(y_title: &str) -> Value {
    json!({
        "font": { "family": FONT, "size": 12 },
        "margin": { "l": 60, "r": 20, "t": 20, "b": 50 },
        "paper_bgcolor": "rgba(0,0,0,0)",
        "plot_bgcolor": "rgba(0,0,0,0)",
        "yaxis": { "title": { "text": y_title }, "gridcolor": "#e0e0e0" },
    })
}

/// Horizontal bars, highest average on top, one colour per country.
pub fn bar_figure(bars: &[BarDatum], styles: &[SeriesStyle], value_label: &str) -> Value {
    let colors: Vec<&str> = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| color_of(styles, &bar.id).unwrap_or(PALETTE[i % PALETTE.len()]))
        .collect();

    let mut layout = base_layout("");
    layout["margin"]["l"] = json!(140);
    layout["xaxis"] = json!({ "title": { "text": value_label }, "gridcolor": "#e0e0e0" });
    layout["yaxis"]["autorange"] = json!("reversed");

    json!({
        "data": [{
            "type": "bar",
            "orientation": "h",
            "y": bars.iter().map(|b| b.label.as_str()).collect::<Vec<_>>(),
            "x": bars.iter().map(|b| b.average).collect::<Vec<_>>(),
            "marker": { "color": colors },
            "hovertemplate": "%{y}: %{x:,.2f}<extra></extra>",
        }],
        "layout": layout,
    })
}

/// One line per visible country. Years without a value become `null` and
/// Plotly leaves a gap instead of joining the neighbours.
pub fn line_figure(
    rows: &[YearRow],
    styles: &[SeriesStyle],
    visibility: &SeriesVisibility,
    y_domain: (f64, f64),
    value_label: &str,
) -> Value {
    let years: Vec<i32> = rows.iter().map(|r| r.year).collect();
    let traces: Vec<Value> = styles
        .iter()
        .filter(|style| visibility.is_visible(&style.id))
        .map(|style| {
            let values: Vec<Option<f64>> = rows.iter().map(|r| r.get(&style.id)).collect();
            json!({
                "type": "scatter",
                "mode": "lines+markers",
                "name": style.label,
                "x": years,
                "y": values,
                "connectgaps": false,
                "line": { "color": style.color, "width": 2 },
                "marker": { "size": 5 },
            })
        })
        .collect();

    let mut layout = base_layout(value_label);
    layout["xaxis"] = json!({ "dtick": 1, "gridcolor": "#e0e0e0" });
    layout["yaxis"]["range"] = json!([y_domain.0, y_domain.1]);
    layout["showlegend"] = json!(false);

    json!({ "data": traces, "layout": layout })
}

/// Countries shaded by value, located by ISO3 code.
pub fn choropleth_figure(regions: &[GeoDatum], value_label: &str) -> Value {
    let text: Vec<String> = regions
        .iter()
        .map(|r| format!("{} ({})", r.name, r.year))
        .collect();

    json!({
        "data": [{
            "type": "choropleth",
            "locationmode": "ISO-3",
            "locations": regions.iter().map(|r| r.location.as_str()).collect::<Vec<_>>(),
            "z": regions.iter().map(|r| r.value).collect::<Vec<_>>(),
            "text": text,
            "colorscale": "Blues",
            "reversescale": true,
            "marker": { "line": { "color": "#ffffff", "width": 0.5 } },
            "colorbar": { "title": { "text": value_label } },
            "hovertemplate": "%{text}: %{z:,.2f}<extra></extra>",
        }],
        "layout": {
            "font": { "family": FONT, "size": 12 },
            "margin": { "l": 0, "r": 0, "t": 0, "b": 0 },
            "geo": {
                "scope": "asia",
                "projection": { "type": "mercator" },
                "lonaxis": { "range": [90, 145] },
                "lataxis": { "range": [-12, 30] },
                "showframe": false,
                "showcoastlines": true,
            },
        },
    })
}

/// GDP per capita against exports, sized by population and coloured by year.
pub fn scatter_figure(points: &[ScatterPoint]) -> Value {
    let text: Vec<String> = points
        .iter()
        .map(|p| format!("{} {}", p.country, p.year))
        .collect();

    let mut layout = base_layout("Exports (% of GDP)");
    layout["xaxis"] = json!({
        "type": "log",
        "title": { "text": "GDP per capita (current US$, log scale)" },
        "gridcolor": "#e0e0e0",
    });

    json!({
        "data": [{
            "type": "scatter",
            "mode": "markers",
            "x": points.iter().map(|p| p.gdp).collect::<Vec<_>>(),
            "y": points.iter().map(|p| p.export).collect::<Vec<_>>(),
            "text": text,
            "customdata": points.iter().map(|p| p.population).collect::<Vec<_>>(),
            "marker": {
                "size": points.iter().map(|p| p.marker_size).collect::<Vec<_>>(),
                "sizemode": "diameter",
                "color": points.iter().map(|p| p.year).collect::<Vec<_>>(),
                "colorscale": "Viridis",
                "showscale": true,
                "colorbar": { "title": { "text": "Year" } },
                "opacity": 0.75,
                "line": { "color": "#ffffff", "width": 1 },
            },
            "hovertemplate": "%{text}<br>GDP per capita: %{x:,.0f}<br>Exports: %{y:.1f}%<br>Population: %{customdata:,}<extra></extra>",
        }],
        "layout": layout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn styles() -> Vec<SeriesStyle> {
        vec![
            SeriesStyle {
                id: "ID".to_string(),
                label: "Indonesia".to_string(),
                color: "#e76e50".to_string(),
            },
            SeriesStyle {
                id: "TH".to_string(),
                label: "Thailand".to_string(),
                color: "#2a9d90".to_string(),
            },
        ]
    }

    #[test]
    fn test_bar_figure_colors_by_country() {
        let bars = vec![
            BarDatum {
                id: "TH".to_string(),
                label: "Thailand".to_string(),
                average: 4.0,
            },
            BarDatum {
                id: "ID".to_string(),
                label: "Indonesia".to_string(),
                average: 3.2,
            },
        ];
        let figure = bar_figure(&bars, &styles(), "% of GDP");
        let trace = &figure["data"][0];
        assert_eq!(trace["orientation"], "h");
        assert_eq!(trace["y"], json!(["Thailand", "Indonesia"]));
        assert_eq!(trace["marker"]["color"], json!(["#2a9d90", "#e76e50"]));
    }

    #[test]
    fn test_line_figure_gaps_and_hidden_series() {
        let rows = vec![
            YearRow {
                year: 2019,
                values: BTreeMap::from([("ID".to_string(), 1.0), ("TH".to_string(), 2.0)]),
            },
            YearRow {
                year: 2020,
                values: BTreeMap::from([("TH".to_string(), 3.0)]),
            },
        ];
        let mut visibility = SeriesVisibility::default();
        let figure = line_figure(&rows, &styles(), &visibility, (0.0, 4.0), "%");
        let traces = figure["data"].as_array().unwrap();
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0]["y"], json!([1.0, null]));
        assert_eq!(traces[0]["connectgaps"], false);

        visibility.toggle("ID");
        let figure = line_figure(&rows, &styles(), &visibility, (0.0, 4.0), "%");
        let traces = figure["data"].as_array().unwrap();
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0]["name"], "Thailand");
        assert_eq!(figure["layout"]["yaxis"]["range"], json!([0.0, 4.0]));
    }

    #[test]
    fn test_choropleth_uses_iso3() {
        let regions = vec![GeoDatum {
            location: "SGP".to_string(),
            value: None,
            name: "Singapore".to_string(),
            year: 2021,
        }];
        let figure = choropleth_figure(&regions, "Population");
        let trace = &figure["data"][0];
        assert_eq!(trace["locationmode"], "ISO-3");
        assert_eq!(trace["locations"], json!(["SGP"]));
        assert_eq!(trace["z"], json!([null]));
        assert_eq!(trace["text"], json!(["Singapore (2021)"]));
    }

    #[test]
    fn test_scatter_log_axis() {
        let points = vec![ScatterPoint {
            country_id: "SG".to_string(),
            country: "Singapore".to_string(),
            year: 2021,
            gdp: 72790.0,
            export: 185.0,
            population: 5_453_566.0,
            marker_size: 60.0,
        }];
        let figure = scatter_figure(&points);
        assert_eq!(figure["layout"]["xaxis"]["type"], "log");
        assert_eq!(figure["data"][0]["marker"]["size"], json!([60.0]));
        assert_eq!(figure["data"][0]["marker"]["color"], json!([2021]));
    }
}
