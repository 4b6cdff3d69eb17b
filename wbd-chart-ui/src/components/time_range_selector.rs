//! Start/end year range with two sliders.

use crate::selection::{Selection, Thumb, YearRange, MAX_YEAR, MIN_YEAR};
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct TimeRangeSelectorProps {
    /// Controlled `(start, end)`; the selector keeps its own when absent.
    pub value: Option<(i32, i32)>,
    pub on_change: EventHandler<(i32, i32)>,
    #[props(default = MIN_YEAR)]
    pub min: i32,
    #[props(default = MAX_YEAR)]
    pub max: i32,
}

/// Two sliders that never cross: dragging one past the other drags both.
#[component]
pub fn TimeRangeSelector(props: TimeRangeSelectorProps) -> Element {
    let range = YearRange {
        min: props.min,
        max: props.max,
    };
    let mut selection = use_signal(|| Selection::new(range.initial()));

    let current = selection.read().current(props.value.as_ref());
    let (start, end) = current;
    let controlled = props.value.is_some();
    let on_change = props.on_change;

    let mut move_thumb = move |thumb: Thumb, raw: String| {
        if let Ok(year) = raw.parse::<i32>() {
            let next = range.set(current, thumb, year);
            if next != current {
                let next = selection.write().update(controlled, next);
                on_change.call(next);
            }
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; flex-direction: column; gap: 4px;",
            label {
                style: "font-weight: bold;",
                "Years: {start} to {end}"
            }
            div {
                style: "display: flex; gap: 12px; align-items: center;",
                span { style: "font-size: 12px; color: #666; width: 32px;", "From" }
                input {
                    r#type: "range",
                    min: "{range.min}",
                    max: "{range.max}",
                    step: "1",
                    value: "{start}",
                    style: "flex: 1;",
                    oninput: move |evt: Event<FormData>| move_thumb(Thumb::Start, evt.value()),
                }
            }
            div {
                style: "display: flex; gap: 12px; align-items: center;",
                span { style: "font-size: 12px; color: #666; width: 32px;", "To" }
                input {
                    r#type: "range",
                    min: "{range.min}",
                    max: "{range.max}",
                    step: "1",
                    value: "{end}",
                    style: "flex: 1;",
                    oninput: move |evt: Event<FormData>| move_thumb(Thumb::End, evt.value()),
                }
            }
        }
    }
}
