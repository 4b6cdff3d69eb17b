//! Reusable Dioxus RSX components for the dashboard cards.

mod chart_container;
mod chart_content;
mod chart_header;
mod chart_toggle_legend;
mod country_multi_select;
mod empty_state;
mod error_display;
mod indicator_dropdown;
mod loading_spinner;
mod time_range_selector;
mod time_slider;

pub use chart_container::ChartContainer;
pub use chart_content::ChartContent;
pub use chart_header::ChartHeader;
pub use chart_toggle_legend::ChartToggleLegend;
pub use country_multi_select::CountryMultiSelect;
pub use empty_state::EmptyState;
pub use error_display::ErrorDisplay;
pub use indicator_dropdown::IndicatorDropdown;
pub use loading_spinner::LoadingSpinner;
pub use time_range_selector::TimeRangeSelector;
pub use time_slider::TimeSlider;
