//! Averaged ranking for the horizontal bar chart.

use log::debug;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use wbd_api::Observation;

/// One bar: a country and the mean of its numeric values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarDatum {
    pub id: String,
    pub label: String,
    pub average: f64,
}

struct Accumulator {
    id: String,
    label: String,
    sum: f64,
    count: usize,
}

/// Group by country and average the values that are present.
///
/// Missing values count toward neither sum nor count, and a country without
/// any numeric value is left out rather than shown as zero. Sorted by
/// average, highest first; equal averages keep first-seen country order.
pub fn to_bar_series(observations: &[Observation]) -> Vec<BarDatum> {
    let mut groups: Vec<Accumulator> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for observation in observations {
        let slot = *index
            .entry(observation.country_id.as_str())
            .or_insert_with(|| {
                groups.push(Accumulator {
                    id: observation.country_id.clone(),
                    label: observation.country_name.clone(),
                    sum: 0.0,
                    count: 0,
                });
                groups.len() - 1
            });
        if let Some(value) = observation.numeric_value() {
            groups[slot].sum += value;
            groups[slot].count += 1;
        }
    }

    let mut series: Vec<BarDatum> = groups
        .into_iter()
        .filter(|g| {
            if g.count == 0 {
                debug!("{} has no numeric values, left out of the ranking", g.id);
            }
            g.count > 0
        })
        .map(|g| BarDatum {
            average: g.sum / g.count as f64,
            id: g.id,
            label: g.label,
        })
        .collect();
    // Stable sort: ties stay in first-seen order.
    series.sort_by(|a, b| b.average.partial_cmp(&a.average).unwrap_or(Ordering::Equal));
    series
}
