//! Multi-select over the ASEAN countries.

use crate::selection::{CountrySelect, Selection};
use dioxus::prelude::*;
use wbd_api::country::asean_iso2;

#[derive(Props, Clone, PartialEq)]
pub struct CountryMultiSelectProps {
    /// Controlled ISO2 codes; the widget keeps its own when absent.
    pub value: Option<Vec<String>>,
    pub on_change: EventHandler<Vec<String>>,
    #[props(default = "Select countries".to_string())]
    pub placeholder: String,
}

/// Country checklist in a popover, with name search.
#[component]
pub fn CountryMultiSelect(props: CountryMultiSelectProps) -> Element {
    let mut selection = use_signal(|| Selection::new(asean_iso2()));
    let mut select = use_signal(CountrySelect::default);

    let current = selection.read().current(props.value.as_ref());
    let controlled = props.value.is_some();
    let on_change = props.on_change;
    let display = select.read().display_text(&current, &props.placeholder);
    let is_open = select.read().popover.is_open();
    let search = select.read().search.clone();

    // (code, name, checked, selection after toggling)
    let rows: Vec<(&'static str, &'static str, bool, Vec<String>)> = select
        .read()
        .options()
        .into_iter()
        .map(|c| {
            let checked = current.iter().any(|s| s == c.iso2);
            (c.iso2, c.name, checked, select.read().toggle(&current, c.iso2))
        })
        .collect();

    rsx! {
        div {
            style: "position: relative; display: inline-block; min-width: 240px; margin: 8px 0;",
            button {
                style: "width: 100%; text-align: left; padding: 6px 10px; border: 1px solid #ccc; border-radius: 4px; background: white; cursor: pointer;",
                onclick: move |_| select.write().popover.toggle(),
                "{display} ▾"
            }
            if is_open {
                div {
                    style: "position: absolute; top: 100%; left: 0; right: 0; z-index: 10; background: white; border: 1px solid #ccc; border-radius: 4px; box-shadow: 0 2px 6px rgba(0,0,0,0.15);",
                    input {
                        r#type: "search",
                        placeholder: "Search country...",
                        value: "{search}",
                        style: "width: 100%; box-sizing: border-box; padding: 6px 10px; border: none; border-bottom: 1px solid #eee;",
                        oninput: move |evt: Event<FormData>| select.write().search = evt.value(),
                    }
                    for (code, name, checked, next) in rows {
                        label {
                            key: "{code}",
                            style: "display: flex; gap: 8px; align-items: center; padding: 4px 10px; cursor: pointer;",
                            input {
                                r#type: "checkbox",
                                checked,
                                onchange: move |_| {
                                    let next = selection.write().update(controlled, next.clone());
                                    on_change.call(next);
                                },
                            }
                            "{name}"
                        }
                    }
                }
            }
        }
    }
}
