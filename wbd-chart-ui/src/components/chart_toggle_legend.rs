//! Clickable legend that hides and shows line-chart series.

use crate::selection::SeriesVisibility;
use dioxus::prelude::*;
use wbd_data::SeriesStyle;

#[derive(Props, Clone, PartialEq)]
pub struct ChartToggleLegendProps {
    pub styles: Vec<SeriesStyle>,
    pub visibility: SeriesVisibility,
    /// Called with the country id that was clicked.
    pub on_toggle: EventHandler<String>,
}

#[component]
pub fn ChartToggleLegend(props: ChartToggleLegendProps) -> Element {
    let on_toggle = props.on_toggle;
    let entries: Vec<(SeriesStyle, bool)> = props
        .styles
        .iter()
        .map(|s| (s.clone(), props.visibility.is_visible(&s.id)))
        .collect();

    rsx! {
        div {
            style: "display: flex; flex-wrap: wrap; gap: 8px; justify-content: center; margin-top: 8px;",
            for (style, visible) in entries {
                button {
                    key: "{style.id}",
                    style: if visible { "display: flex; gap: 6px; align-items: center; padding: 2px 8px; border: 1px solid #ddd; border-radius: 12px; background: white; cursor: pointer; font-size: 12px;" } else { "display: flex; gap: 6px; align-items: center; padding: 2px 8px; border: 1px solid #ddd; border-radius: 12px; background: white; cursor: pointer; font-size: 12px; opacity: 0.4; text-decoration: line-through;" },
                    onclick: {
                        let id = style.id.clone();
                        move |_| on_toggle.call(id.clone())
                    },
                    span {
                        style: "display: inline-block; width: 10px; height: 10px; border-radius: 50%; background: {style.color};",
                    }
                    "{style.label}"
                }
            }
        }
    }
}
