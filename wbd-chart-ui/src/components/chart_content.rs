//! Picks loading, error, empty or chart for a card.

use super::{ChartContainer, EmptyState, ErrorDisplay, LoadingSpinner};
use crate::view::ChartView;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartContentProps {
    pub view: ChartView,
    /// DOM id of the Plotly container, rendered only for content.
    pub container_id: String,
    #[props(default = 400)]
    pub min_height: u32,
    pub on_retry: EventHandler<()>,
}

/// Exactly one of the four views; a failing card never affects its siblings.
#[component]
pub fn ChartContent(props: ChartContentProps) -> Element {
    match props.view {
        ChartView::Loading => rsx! {
            LoadingSpinner { min_height: props.min_height }
        },
        ChartView::Error(message) => rsx! {
            ErrorDisplay { message, on_retry: props.on_retry }
        },
        ChartView::Empty => rsx! {
            EmptyState { min_height: props.min_height }
        },
        ChartView::Content => rsx! {
            ChartContainer { id: props.container_id, min_height: props.min_height }
        },
    }
}
