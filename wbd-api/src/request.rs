use crate::catalog::Indicator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// First year the dashboard charts by default.
pub const DEFAULT_START_YEAR: i32 = 2011;
/// Last year the dashboard charts by default.
pub const DEFAULT_END_YEAR: i32 = 2021;

/// Optional date filter of an indicator query.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    /// Inclusive `start:end` year span.
    Span { start: i32, end: i32 },
    /// A single year.
    Year(i32),
}

impl TimeRange {
    /// A span with its bounds put in order.
    pub fn span(a: i32, b: i32) -> TimeRange {
        TimeRange::Span {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Value of the `date` query parameter.
    pub fn date_param(&self) -> String {
        match self {
            TimeRange::Span { start, end } => format!("{}:{}", start, end),
            TimeRange::Year(year) => year.to_string(),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.date_param())
    }
}

/// Identifies one requestable dataset: indicator, ordered country list and
/// optional time filter. Equality is structural, so `["ID", "SG"]` and
/// `["SG", "ID"]` are different keys.
#[derive(Debug, PartialEq, Eq, Clone, Hash, Serialize, Deserialize)]
pub struct QueryKey {
    pub indicator: Indicator,
    pub countries: Vec<String>,
    pub time_range: Option<TimeRange>,
}

impl QueryKey {
    pub fn new(
        indicator: Indicator,
        countries: Vec<String>,
        time_range: Option<TimeRange>,
    ) -> QueryKey {
        QueryKey {
            indicator,
            countries,
            time_range,
        }
    }

    /// Build the request URL against `base_url` (no trailing slash), e.g.
    /// `{base}/country/ID;SG/indicator/SP.POP.TOTL?format=json&per_page=500&date=2011:2021`.
    pub fn url(&self, base_url: &str, per_page: u32) -> String {
        let mut url = format!(
            "{}/country/{}/indicator/{}?format=json&per_page={}",
            base_url.trim_end_matches('/'),
            self.countries.join(";"),
            self.indicator.code(),
            per_page
        );
        if let Some(range) = &self.time_range {
            url.push_str("&date=");
            url.push_str(&range.date_param());
        }
        url
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.indicator.code(), self.countries.join(";"))?;
        if let Some(range) = &self.time_range {
            write!(f, " {}", range)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{QueryKey, TimeRange};
    use crate::catalog::Indicator;

    const BASE: &str = "https://api.worldbank.org/v2";

    fn countries() -> Vec<String> {
        vec!["ID".to_string(), "SG".to_string()]
    }

    #[test]
    fn test_url_with_span() {
        let key = QueryKey::new(
            Indicator::Population,
            countries(),
            Some(TimeRange::span(2021, 2011)),
        );
        assert_eq!(
            key.url(BASE, 500),
            "https://api.worldbank.org/v2/country/ID;SG/indicator/SP.POP.TOTL?format=json&per_page=500&date=2011:2021"
        );
    }

    #[test]
    fn test_url_with_single_year_and_without_range() {
        let key = QueryKey::new(Indicator::Exports, countries(), Some(TimeRange::Year(2021)));
        assert!(key.url(BASE, 500).ends_with("per_page=500&date=2021"));

        let key = QueryKey::new(Indicator::Exports, countries(), None);
        assert!(key.url(&format!("{}/", BASE), 50).ends_with("NE.EXP.GNFS.ZS?format=json&per_page=50"));
    }

    #[test]
    fn test_key_equality_is_structural() {
        let a = QueryKey::new(Indicator::Population, countries(), None);
        let b = QueryKey::new(Indicator::Population, countries(), None);
        let reversed = QueryKey::new(
            Indicator::Population,
            vec!["SG".to_string(), "ID".to_string()],
            None,
        );
        assert_eq!(a, b);
        assert_ne!(a, reversed);
    }
}
