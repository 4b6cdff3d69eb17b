use wbd_api::{Indicator, QueryKey, TimeRange};

/// The UI inputs a query is derived from. Unlike [`QueryKey`], the indicator
/// may be missing and the country list may be empty; such inputs are
/// disabled and never reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryInput {
    pub indicator: Option<Indicator>,
    pub countries: Vec<String>,
    pub time_range: Option<TimeRange>,
}

impl QueryInput {
    pub fn new(
        indicator: Option<Indicator>,
        countries: Vec<String>,
        time_range: Option<TimeRange>,
    ) -> Self {
        QueryInput {
            indicator,
            countries,
            time_range,
        }
    }

    /// The `enabled` predicate: an indicator and at least one country.
    pub fn is_enabled(&self) -> bool {
        self.indicator.is_some() && !self.countries.is_empty()
    }

    /// The key to fetch, or `None` when disabled.
    pub fn key(&self) -> Option<QueryKey> {
        let indicator = self.indicator?;
        if self.countries.is_empty() {
            return None;
        }
        Some(QueryKey::new(
            indicator,
            self.countries.clone(),
            self.time_range,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::QueryInput;
    use wbd_api::{Indicator, TimeRange};

    #[test]
    fn test_disabled_without_indicator_or_countries() {
        let no_indicator = QueryInput::new(None, vec!["ID".to_string()], None);
        assert!(!no_indicator.is_enabled());
        assert_eq!(no_indicator.key(), None);

        let no_countries = QueryInput::new(Some(Indicator::Population), Vec::new(), None);
        assert!(!no_countries.is_enabled());
        assert_eq!(no_countries.key(), None);
    }

    #[test]
    fn test_enabled_key() {
        let input = QueryInput::new(
            Some(Indicator::Population),
            vec!["ID".to_string(), "SG".to_string()],
            Some(TimeRange::Year(2021)),
        );
        let key = input.key().unwrap();
        assert_eq!(key.indicator, Indicator::Population);
        assert_eq!(key.countries, vec!["ID", "SG"]);
        assert_eq!(key.time_range, Some(TimeRange::Year(2021)));
    }
}
