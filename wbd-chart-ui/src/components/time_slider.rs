//! Single-year slider.

use crate::selection::{Selection, YearSlider, MAX_YEAR, MIN_YEAR};
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct TimeSliderProps {
    /// Controlled year; the slider keeps its own when absent.
    pub value: Option<i32>,
    pub on_change: EventHandler<i32>,
    #[props(default = MIN_YEAR)]
    pub min: i32,
    #[props(default = MAX_YEAR)]
    pub max: i32,
}

/// Range input over whole years, starting at the latest year.
#[component]
pub fn TimeSlider(props: TimeSliderProps) -> Element {
    let slider = YearSlider {
        min: props.min,
        max: props.max,
    };
    let mut selection = use_signal(|| Selection::new(slider.initial()));

    let current = slider.clamp(selection.read().current(props.value.as_ref()));
    let controlled = props.value.is_some();
    let on_change = props.on_change;

    let on_input = move |evt: Event<FormData>| {
        if let Ok(year) = evt.value().parse::<i32>() {
            let year = slider.clamp(year);
            if year != current {
                let next = selection.write().update(controlled, year);
                on_change.call(next);
            }
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                style: "font-weight: bold;",
                "Year: {current}"
            }
            span { style: "font-size: 12px; color: #666;", "{slider.min}" }
            input {
                r#type: "range",
                min: "{slider.min}",
                max: "{slider.max}",
                step: "1",
                value: "{current}",
                style: "flex: 1;",
                oninput: on_input,
            }
            span { style: "font-size: 12px; color: #666;", "{slider.max}" }
        }
    }
}
