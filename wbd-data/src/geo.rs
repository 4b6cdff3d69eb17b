//! Choropleth input.

use serde::Serialize;
use wbd_api::Observation;

/// One shaded region of the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoDatum {
    /// ISO3 code the map locates the region by.
    pub location: String,
    pub value: Option<f64>,
    pub name: String,
    pub year: i32,
}

/// Map every observation to one region, in input order. No filtering and no
/// aggregation: a missing value stays missing and the map leaves it unshaded.
pub fn to_geo_series(observations: &[Observation]) -> Vec<GeoDatum> {
    observations
        .iter()
        .map(|o| GeoDatum {
            location: o.country_iso3.clone(),
            value: o.numeric_value(),
            name: o.country_name.clone(),
            year: o.year,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::obs;

    #[test]
    fn test_one_to_one_in_order() {
        let data = vec![
            obs("VN", "Viet Nam", 2021, Some(4.3)),
            obs("BN", "Brunei Darussalam", 2021, None),
            obs("VN", "Viet Nam", 2021, Some(4.5)),
        ];
        let geo = to_geo_series(&data);
        assert_eq!(geo.len(), data.len());
        assert_eq!(geo[0].location, "VNM");
        assert_eq!(geo[1].location, "BRN");
        assert_eq!(geo[1].value, None);
        assert_eq!(geo[2].value, Some(4.5));
        assert_eq!(geo[2].name, "Viet Nam");
        assert_eq!(geo[2].year, 2021);
    }

    #[test]
    fn test_empty_input() {
        assert!(to_geo_series(&[]).is_empty());
    }
}
