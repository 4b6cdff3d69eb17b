//! Three-indicator join for the bubble scatter plot.

use serde::Serialize;
use std::collections::HashMap;
use wbd_api::Observation;

/// Diameter, in pixels, of the marker for the most populous point.
pub const MAX_MARKER_SIZE: f64 = 60.0;

/// Smallest marker diameter so tiny populations stay visible.
pub const MIN_MARKER_SIZE: f64 = 4.0;

/// One bubble: x = GDP per capita, y = exports, size from population.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub country_id: String,
    pub country: String,
    pub year: i32,
    pub gdp: f64,
    pub export: f64,
    pub population: f64,
    pub marker_size: f64,
}

struct Keyed<'a> {
    order: Vec<(&'a str, i32)>,
    values: HashMap<(&'a str, i32), (&'a str, Option<f64>)>,
}

/// Index by `(country, year)`; a later observation replaces an earlier one.
fn by_country_year(observations: &[Observation]) -> Keyed<'_> {
    let mut keyed = Keyed {
        order: Vec::new(),
        values: HashMap::new(),
    };
    for o in observations {
        let key = (o.country_id.as_str(), o.year);
        if keyed
            .values
            .insert(key, (o.country_name.as_str(), o.numeric_value()))
            .is_none()
        {
            keyed.order.push(key);
        }
    }
    keyed
}

/// Area-proportional marker diameter: `sqrt(population / max_population)`
/// scaled to [`MAX_MARKER_SIZE`], never below [`MIN_MARKER_SIZE`].
pub fn marker_size(population: f64, max_population: f64) -> f64 {
    if max_population <= 0.0 || !max_population.is_finite() {
        return MIN_MARKER_SIZE;
    }
    let ratio = (population.max(0.0) / max_population).sqrt();
    (ratio * MAX_MARKER_SIZE).max(MIN_MARKER_SIZE)
}

/// Inner join of three separately fetched indicators on `(country, year)`.
///
/// A point exists only when all three inputs hold a value for its key, so
/// the output is never longer than the shortest input. Points follow the
/// first-seen order of the GDP input.
pub fn to_scatter_points(
    gdp: &[Observation],
    exports: &[Observation],
    population: &[Observation],
) -> Vec<ScatterPoint> {
    if gdp.is_empty() || exports.is_empty() || population.is_empty() {
        return Vec::new();
    }

    let gdp_map = by_country_year(gdp);
    let export_map = by_country_year(exports);
    let population_map = by_country_year(population);

    let mut points: Vec<ScatterPoint> = gdp_map
        .order
        .iter()
        .filter_map(|key| {
            let (name, gdp_value) = gdp_map.values.get(key)?;
            let (_, export_value) = export_map.values.get(key)?;
            let (_, population_value) = population_map.values.get(key)?;
            Some(ScatterPoint {
                country_id: key.0.to_string(),
                country: name.to_string(),
                year: key.1,
                gdp: (*gdp_value)?,
                export: (*export_value)?,
                population: (*population_value)?,
                marker_size: MIN_MARKER_SIZE,
            })
        })
        .collect();

    let max_population = points
        .iter()
        .map(|p| p.population)
        .fold(f64::NEG_INFINITY, f64::max);
    for point in &mut points {
        point.marker_size = marker_size(point.population, max_population);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::obs;

    #[test]
    fn test_inner_join_requires_all_three() {
        let gdp = vec![
            obs("ID", "Indonesia", 2020, Some(3870.0)),
            obs("ID", "Indonesia", 2021, Some(4330.0)),
            obs("TH", "Thailand", 2021, Some(7060.0)),
            obs("SG", "Singapore", 2021, Some(72790.0)),
        ];
        let exports = vec![
            obs("ID", "Indonesia", 2020, Some(17.3)),
            obs("ID", "Indonesia", 2021, Some(21.6)),
            obs("TH", "Thailand", 2021, None),
            obs("SG", "Singapore", 2021, Some(185.0)),
        ];
        let population = vec![
            obs("ID", "Indonesia", 2021, Some(273_753_191.0)),
            obs("TH", "Thailand", 2021, Some(71_601_103.0)),
            obs("SG", "Singapore", 2021, Some(5_453_566.0)),
        ];
        let points = to_scatter_points(&gdp, &exports, &population);
        let keys: Vec<(&str, i32)> = points.iter().map(|p| (p.country_id.as_str(), p.year)).collect();
        assert_eq!(keys, vec![("ID", 2021), ("SG", 2021)]);
        assert!(points.len() <= gdp.len().min(exports.len()).min(population.len()));
        assert_eq!(points[0].country, "Indonesia");
        assert_eq!(points[0].export, 21.6);
    }

    #[test]
    fn test_marker_area_proportional_to_population() {
        let gdp = vec![
            obs("ID", "Indonesia", 2021, Some(1.0)),
            obs("SG", "Singapore", 2021, Some(1.0)),
        ];
        let exports = gdp.clone();
        let population = vec![
            obs("ID", "Indonesia", 2021, Some(400.0)),
            obs("SG", "Singapore", 2021, Some(100.0)),
        ];
        let points = to_scatter_points(&gdp, &exports, &population);
        assert_eq!(points[0].marker_size, MAX_MARKER_SIZE);
        assert_eq!(points[1].marker_size, MAX_MARKER_SIZE / 2.0);
    }

    #[test]
    fn test_marker_size_floor() {
        assert_eq!(marker_size(1.0, 1.0e9), MIN_MARKER_SIZE);
        assert_eq!(marker_size(10.0, 0.0), MIN_MARKER_SIZE);
    }

    #[test]
    fn test_any_empty_input_yields_nothing() {
        let some = vec![obs("ID", "Indonesia", 2021, Some(1.0))];
        assert!(to_scatter_points(&[], &some, &some).is_empty());
        assert!(to_scatter_points(&some, &[], &some).is_empty());
        assert!(to_scatter_points(&some, &some, &[]).is_empty());
        assert!(to_scatter_points(&[], &[], &[]).is_empty());
    }

    #[test]
    fn test_later_duplicate_replaces_earlier() {
        let gdp = vec![
            obs("ID", "Indonesia", 2021, Some(1.0)),
            obs("ID", "Indonesia", 2021, Some(2.0)),
        ];
        let exports = vec![obs("ID", "Indonesia", 2021, Some(3.0))];
        let population = vec![obs("ID", "Indonesia", 2021, Some(4.0))];
        let points = to_scatter_points(&gdp, &exports, &population);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].gdp, 2.0);
    }
}
