//! Data transformation layer for indicator observations.
//!
//! Every function here is pure: it borrows the observation list, never
//! mutates it, and returns a fresh table shaped for one chart. Empty input
//! yields empty output.

pub mod bar;
pub mod geo;
pub mod scatter;
pub mod years;

pub use bar::{to_bar_series, BarDatum};
pub use geo::{to_geo_series, GeoDatum};
pub use legend::{chart_config, countries, SeriesStyle};
pub use scatter::{to_scatter_points, ScatterPoint};
pub use years::{to_year_series, y_domain, YearRow};

#[cfg(test)]
pub(crate) mod fixtures {
    use wbd_api::observation::IdValue;
    use wbd_api::Observation;

    /// Build an observation the way the fetcher would produce it.
    pub fn obs(country_id: &str, name: &str, year: i32, value: Option<f64>) -> Observation {
        Observation {
            indicator: IdValue {
                id: "BX.KLT.DINV.WD.GD.ZS".to_string(),
                value: "Foreign direct investment, net inflows (% of GDP)".to_string(),
            },
            country_id: country_id.to_string(),
            country_name: name.to_string(),
            country_iso3: wbd_api::country::Country::from_iso2(country_id)
                .map(|c| c.iso3.to_string())
                .unwrap_or_default(),
            year,
            value,
            unit: String::new(),
            obs_status: String::new(),
            decimal: 1,
        }
    }
}

/// Legend and colour assignment shared by the line and bar charts.
pub mod legend {
    use serde::Serialize;
    use std::collections::HashSet;
    use wbd_api::Observation;

    /// Series colours, assigned by index and cycled.
    pub const PALETTE: [&str; 5] = ["#e76e50", "#2a9d90", "#274754", "#e8c468", "#f4a462"];

    /// A country as it appears in the current dataset.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct CountryRef {
        pub id: String,
        pub name: String,
    }

    /// Label and colour of one country's series.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct SeriesStyle {
        pub id: String,
        pub label: String,
        pub color: String,
    }

    /// Distinct countries in first-seen order.
    pub fn countries(observations: &[Observation]) -> Vec<CountryRef> {
        let mut seen: HashSet<&str> = HashSet::new();
        observations
            .iter()
            .filter(|o| seen.insert(o.country_id.as_str()))
            .map(|o| CountryRef {
                id: o.country_id.clone(),
                name: o.country_name.clone(),
            })
            .collect()
    }

    /// Colour each country by its position in `countries`.
    ///
    /// The mapping is only stable for one dataset: when the country set
    /// changes, colours may move to other countries.
    pub fn chart_config(countries: &[CountryRef]) -> Vec<SeriesStyle> {
        countries
            .iter()
            .enumerate()
            .map(|(index, country)| SeriesStyle {
                id: country.id.clone(),
                label: country.name.clone(),
                color: PALETTE[index % PALETTE.len()].to_string(),
            })
            .collect()
    }

    /// Look up the colour assigned to `id`.
    pub fn color_of<'a>(config: &'a [SeriesStyle], id: &str) -> Option<&'a str> {
        config
            .iter()
            .find(|style| style.id == id)
            .map(|style| style.color.as_str())
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::fixtures::obs;

        #[test]
        fn test_countries_first_seen_order() {
            let data = vec![
                obs("TH", "Thailand", 2020, Some(1.0)),
                obs("ID", "Indonesia", 2020, Some(2.0)),
                obs("TH", "Thailand", 2021, Some(3.0)),
            ];
            let ids: Vec<String> = countries(&data).into_iter().map(|c| c.id).collect();
            assert_eq!(ids, vec!["TH", "ID"]);
        }

        #[test]
        fn test_palette_cycles() {
            let refs: Vec<CountryRef> = (0..7)
                .map(|i| CountryRef {
                    id: format!("C{}", i),
                    name: format!("Country {}", i),
                })
                .collect();
            let config = chart_config(&refs);
            assert_eq!(config.len(), 7);
            assert_eq!(config[0].color, config[5].color);
            assert_eq!(config[1].color, config[6].color);
            assert_ne!(config[0].color, config[1].color);
            assert_eq!(color_of(&config, "C2"), Some(PALETTE[2]));
        }

        #[test]
        fn test_empty_input() {
            assert!(countries(&[]).is_empty());
            assert!(chart_config(&[]).is_empty());
        }
    }
}
