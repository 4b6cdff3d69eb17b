use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct EmptyStateProps {
    #[props(default = "No data available for the selected filters.".to_string())]
    pub message: String,
    #[props(default = 400)]
    pub min_height: u32,
}

/// Placeholder for a query that succeeded with nothing to plot.
#[component]
pub fn EmptyState(props: EmptyStateProps) -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; min-height: {props.min_height}px; border: 1px dashed #ccc; border-radius: 4px; color: #888;",
            "{props.message}"
        }
    }
}
