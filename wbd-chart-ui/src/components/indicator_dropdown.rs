//! Searchable dropdown over the indicator catalog.

use crate::selection::{IndicatorSelect, Selection};
use dioxus::prelude::*;
use wbd_api::Indicator;

#[derive(Props, Clone, PartialEq)]
pub struct IndicatorDropdownProps {
    /// Controlled value; the dropdown keeps its own when absent.
    pub value: Option<Indicator>,
    pub on_change: EventHandler<Indicator>,
}

/// Indicator dropdown with a search box. Picking the shown indicator again
/// does not fire `on_change`.
#[component]
pub fn IndicatorDropdown(props: IndicatorDropdownProps) -> Element {
    let mut selection = use_signal(|| Selection::new(Indicator::default()));
    let mut select = use_signal(IndicatorSelect::default);

    let current = selection.read().current(props.value.as_ref());
    let controlled = props.value.is_some();
    let on_change = props.on_change;
    let options = select.read().options();
    let no_match = options.is_empty();
    let is_open = select.read().popover.is_open();
    let search = select.read().search.clone();
    let current_label = current.label();

    rsx! {
        div {
            style: "position: relative; display: inline-block; min-width: 320px; margin: 8px 0;",
            button {
                style: "width: 100%; text-align: left; padding: 6px 10px; border: 1px solid #ccc; border-radius: 4px; background: white; cursor: pointer;",
                onclick: move |_| select.write().popover.toggle(),
                "{current_label} ▾"
            }
            if is_open {
                div {
                    style: "position: absolute; top: 100%; left: 0; right: 0; z-index: 10; background: white; border: 1px solid #ccc; border-radius: 4px; box-shadow: 0 2px 6px rgba(0,0,0,0.15);",
                    input {
                        r#type: "search",
                        placeholder: "Search indicator type...",
                        value: "{search}",
                        style: "width: 100%; box-sizing: border-box; padding: 6px 10px; border: none; border-bottom: 1px solid #eee;",
                        oninput: move |evt: Event<FormData>| select.write().search = evt.value(),
                    }
                    if no_match {
                        div {
                            style: "padding: 6px 10px; color: #888;",
                            "No indicator found."
                        }
                    }
                    for indicator in options {
                        div {
                            key: "{indicator.code()}",
                            style: if indicator == current { "padding: 6px 10px; cursor: pointer; background: #e3f2fd;" } else { "padding: 6px 10px; cursor: pointer;" },
                            onclick: move |_| {
                                let picked = select.write().choose(Some(current), indicator);
                                if let Some(picked) = picked {
                                    let next = selection.write().update(controlled, picked);
                                    on_change.call(next);
                                }
                            },
                            "{indicator.label()}"
                        }
                    }
                }
            }
        }
    }
}
