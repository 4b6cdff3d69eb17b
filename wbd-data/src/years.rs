//! Year-indexed wide table for the multi-line chart.

use crate::legend::CountryRef;
use serde::Serialize;
use std::collections::BTreeMap;
use wbd_api::Observation;

/// Axis domain used when there is nothing to scale against.
pub const DEFAULT_Y_DOMAIN: (f64, f64) = (0.0, 100.0);

/// One row per year, one field per country code.
///
/// A missing `(year, country)` pair has no field at all; charts draw it as a
/// gap and never interpolate across it. Serializes flat:
/// `{"year": 2020, "ID": 3.2, "TH": 1.1}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearRow {
    pub year: i32,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl YearRow {
    pub fn get(&self, country_id: &str) -> Option<f64> {
        self.values.get(country_id).copied()
    }
}

/// Pivot observations into rows sorted ascending by year.
///
/// When two observations share a `(year, country)` pair the later one wins,
/// including a later missing value, which clears the field.
pub fn to_year_series(observations: &[Observation]) -> Vec<YearRow> {
    let mut rows: BTreeMap<i32, BTreeMap<String, f64>> = BTreeMap::new();
    for observation in observations {
        let row = rows.entry(observation.year).or_default();
        match observation.numeric_value() {
            Some(value) => {
                row.insert(observation.country_id.clone(), value);
            }
            None => {
                row.remove(&observation.country_id);
            }
        }
    }
    rows.into_iter()
        .map(|(year, values)| YearRow { year, values })
        .collect()
}

/// Y-axis bounds over every present value of `countries`, padded by 10% of
/// the span so negative series are not clipped.
pub fn y_domain(rows: &[YearRow], countries: &[CountryRef]) -> (f64, f64) {
    let values = rows
        .iter()
        .flat_map(|row| countries.iter().filter_map(move |c| row.get(&c.id)));
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return DEFAULT_Y_DOMAIN;
    }
    let padding = (max - min).abs() * 0.1;
    (min - padding, max + padding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::obs;
    use crate::legend::countries;

    #[test]
    fn test_rows_ascending_without_duplicates() {
        let data = vec![
            obs("ID", "Indonesia", 2021, Some(3.0)),
            obs("TH", "Thailand", 2019, Some(1.0)),
            obs("ID", "Indonesia", 2019, Some(2.0)),
            obs("TH", "Thailand", 2021, Some(4.0)),
            obs("SG", "Singapore", 2020, Some(9.0)),
        ];
        let rows = to_year_series(&data);
        let years: Vec<i32> = rows.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2019, 2020, 2021]);
        assert_eq!(rows[0].get("ID"), Some(2.0));
        assert_eq!(rows[0].get("TH"), Some(1.0));
        assert_eq!(rows[1].get("ID"), None);
        assert_eq!(rows[1].get("SG"), Some(9.0));
    }

    #[test]
    fn test_last_observation_wins() {
        let data = vec![
            obs("ID", "Indonesia", 2020, Some(1.0)),
            obs("ID", "Indonesia", 2020, Some(5.0)),
            obs("TH", "Thailand", 2020, Some(2.0)),
            obs("TH", "Thailand", 2020, None),
        ];
        let rows = to_year_series(&data);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("ID"), Some(5.0));
        assert_eq!(rows[0].get("TH"), None);
    }

    #[test]
    fn test_missing_values_are_gaps() {
        let data = vec![
            obs("MY", "Malaysia", 2020, None),
            obs("MY", "Malaysia", 2021, Some(4.4)),
        ];
        let rows = to_year_series(&data);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].values.is_empty());
        let json = serde_json::to_value(&rows[1]).unwrap();
        assert_eq!(json, serde_json::json!({"year": 2021, "MY": 4.4}));
    }

    #[test]
    fn test_y_domain_pads_span() {
        let data = vec![
            obs("ID", "Indonesia", 2020, Some(-10.0)),
            obs("TH", "Thailand", 2020, Some(10.0)),
        ];
        let rows = to_year_series(&data);
        let (lo, hi) = y_domain(&rows, &countries(&data));
        assert!((lo - -12.0).abs() < 1e-9);
        assert!((hi - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input() {
        assert!(to_year_series(&[]).is_empty());
        assert_eq!(y_domain(&[], &[]), DEFAULT_Y_DOMAIN);
    }
}
