//! Loading placeholder.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct LoadingSpinnerProps {
    #[props(default = 400)]
    pub min_height: u32,
}

/// Skeleton shown while a chart's data is loading.
#[component]
pub fn LoadingSpinner(props: LoadingSpinnerProps) -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; min-height: {props.min_height}px; background: #f5f5f5; border-radius: 4px; color: #666;",
            "Loading data..."
        }
    }
}
