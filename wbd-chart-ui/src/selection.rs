//! Selector state machines, free of any rendering.
//!
//! Components in [`crate::components`] keep one of these in a signal and
//! forward DOM events to it. Each method returns the change that must be
//! reported upward, or `None` when nothing changed.

use std::collections::BTreeSet;
use wbd_api::country::{Country, ASEAN_COUNTRIES};
use wbd_api::request::{DEFAULT_END_YEAR, DEFAULT_START_YEAR};
use wbd_api::Indicator;

/// First year offered by the time widgets.
pub const MIN_YEAR: i32 = DEFAULT_START_YEAR;
/// Last year offered by the time widgets.
pub const MAX_YEAR: i32 = DEFAULT_END_YEAR;

/// Open/closed state of a dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Popover {
    #[default]
    Closed,
    Open,
}

impl Popover {
    pub fn is_open(&self) -> bool {
        *self == Popover::Open
    }

    pub fn open(&mut self) {
        *self = Popover::Open;
    }

    pub fn close(&mut self) {
        *self = Popover::Closed;
    }

    pub fn toggle(&mut self) {
        *self = match self {
            Popover::Open => Popover::Closed,
            Popover::Closed => Popover::Open,
        };
    }
}

/// A widget value that is either owned by the widget or supplied by its
/// parent.
///
/// With an external value the widget only reports what it would change to;
/// the parent decides. Without one the widget stores the change itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection<T> {
    internal: T,
}

impl<T: Clone> Selection<T> {
    pub fn new(initial: T) -> Self {
        Selection { internal: initial }
    }

    /// The value on screen.
    pub fn current(&self, external: Option<&T>) -> T {
        external.cloned().unwrap_or_else(|| self.internal.clone())
    }

    /// Accept `next`; returns it so the caller can report it. A controlled
    /// widget leaves its own value alone.
    pub fn update(&mut self, controlled: bool, next: T) -> T {
        if !controlled {
            self.internal = next.clone();
        }
        next
    }
}

/// Single-select indicator dropdown with a search box.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndicatorSelect {
    pub popover: Popover,
    pub search: String,
}

impl IndicatorSelect {
    pub fn options(&self) -> Vec<Indicator> {
        Indicator::search(&self.search)
    }

    /// Picking the current indicator does nothing. Any other pick is
    /// returned for reporting and closes the dropdown.
    pub fn choose(&mut self, current: Option<Indicator>, picked: Indicator) -> Option<Indicator> {
        if current == Some(picked) {
            return None;
        }
        self.popover.close();
        self.search.clear();
        Some(picked)
    }
}

/// Multi-select over the ASEAN countries, by ISO2 code.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CountrySelect {
    pub popover: Popover,
    pub search: String,
}

impl CountrySelect {
    /// Countries whose name contains the search text, ignoring case.
    pub fn options(&self) -> Vec<Country> {
        let needle = self.search.trim().to_lowercase();
        ASEAN_COUNTRIES
            .iter()
            .filter(|c| needle.is_empty() || c.name.to_lowercase().contains(&needle))
            .copied()
            .collect()
    }

    /// Flip membership of `iso2`. The result keeps the ASEAN table order so
    /// the same set always yields the same query key.
    pub fn toggle(&self, selected: &[String], iso2: &str) -> Vec<String> {
        let mut set: BTreeSet<&str> = selected.iter().map(String::as_str).collect();
        if !set.remove(iso2) {
            set.insert(iso2);
        }
        ASEAN_COUNTRIES
            .iter()
            .filter(|c| set.contains(c.iso2))
            .map(|c| c.iso2.to_string())
            .collect()
    }

    /// Text shown on the closed dropdown.
    pub fn display_text(&self, selected: &[String], placeholder: &str) -> String {
        match selected {
            [] => placeholder.to_string(),
            [one] => Country::from_iso2(one)
                .map(|c| c.name.to_string())
                .unwrap_or_else(|| one.clone()),
            many => format!("{} countries selected", many.len()),
        }
    }
}

/// Single-year slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSlider {
    pub min: i32,
    pub max: i32,
}

impl Default for YearSlider {
    fn default() -> Self {
        YearSlider {
            min: MIN_YEAR,
            max: MAX_YEAR,
        }
    }
}

impl YearSlider {
    /// Starting position: the latest year.
    pub fn initial(&self) -> i32 {
        self.max
    }

    pub fn clamp(&self, year: i32) -> i32 {
        year.clamp(self.min, self.max)
    }

    /// Move by whole steps of one year.
    pub fn step(&self, year: i32, steps: i32) -> i32 {
        self.clamp(year.saturating_add(steps))
    }
}

/// Which thumb of a [`YearRange`] moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Thumb {
    Start,
    End,
}

/// Two-thumb year range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl Default for YearRange {
    fn default() -> Self {
        YearRange {
            min: MIN_YEAR,
            max: MAX_YEAR,
        }
    }
}

impl YearRange {
    pub fn initial(&self) -> (i32, i32) {
        (self.min, self.max)
    }

    /// Place `thumb` at `year`, clamped to the bounds. If it passes the
    /// other thumb, the other thumb is pushed along so that start <= end.
    pub fn set(&self, (start, end): (i32, i32), thumb: Thumb, year: i32) -> (i32, i32) {
        let year = year.clamp(self.min, self.max);
        match thumb {
            Thumb::Start => (year, end.max(year)),
            Thumb::End => (start.min(year), year),
        }
    }
}

/// Line-chart legend toggles, keyed by country id. Every series is visible
/// until toggled off.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeriesVisibility {
    hidden: BTreeSet<String>,
}

impl SeriesVisibility {
    pub fn is_visible(&self, id: &str) -> bool {
        !self.hidden.contains(id)
    }

    pub fn toggle(&mut self, id: &str) {
        if !self.hidden.remove(id) {
            self.hidden.insert(id.to_string());
        }
    }

    pub fn show_all(&mut self) {
        self.hidden.clear();
    }
}
