//! The four dashboard cards. Each owns its selectors and query; a failing
//! card leaves the others untouched.

mod bar;
mod line;
mod map;
mod scatter;

pub use bar::BarCard;
pub use line::LineCard;
pub use map::MapCard;
pub use scatter::ScatterCard;

/// Outer frame shared by every card.
const CARD_STYLE: &str = "padding: 16px; border: 1px solid #e0e0e0; border-radius: 8px; background: white;";

/// Plot height in pixels.
const CHART_HEIGHT: u32 = 400;
