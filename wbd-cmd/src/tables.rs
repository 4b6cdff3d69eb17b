//! Flat row types for the outputs that have no ready-made table in
//! `wbd-data`.

use serde::Serialize;
use wbd_api::{Indicator, Observation};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorRow {
    pub code: &'static str,
    pub label: &'static str,
}

/// Catalog entries matching `search`, in catalog order.
pub fn indicator_rows(search: &str) -> Vec<IndicatorRow> {
    Indicator::search(search)
        .into_iter()
        .map(|i| IndicatorRow {
            code: i.code(),
            label: i.label(),
        })
        .collect()
}

/// One observation with the nested API objects flattened out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationRow {
    pub indicator: String,
    pub country_id: String,
    pub country_iso3: String,
    pub country: String,
    pub year: i32,
    pub value: Option<f64>,
    pub unit: String,
    pub obs_status: String,
    pub decimal: i64,
}

pub fn observation_rows(observations: &[Observation]) -> Vec<ObservationRow> {
    observations
        .iter()
        .map(|o| ObservationRow {
            indicator: o.indicator.id.clone(),
            country_id: o.country_id.clone(),
            country_iso3: o.country_iso3.clone(),
            country: o.country_name.clone(),
            year: o.year,
            value: o.value,
            unit: o.unit.clone(),
            obs_status: o.obs_status.clone(),
            decimal: o.decimal,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_search() {
        assert_eq!(indicator_rows("").len(), Indicator::ALL.len());
        let rows = indicator_rows("sp.pop");
        assert_eq!(
            rows,
            vec![IndicatorRow {
                code: "SP.POP.TOTL",
                label: "Population, total",
            }]
        );
    }
}
