use crate::error::{FetchError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Date format of the `lastupdated` pagination field: "YYYY-MM-DD"
pub const LAST_UPDATED_FORMAT: &str = "%Y-%m-%d";

/// An `{ "id": ..., "value": ... }` pair as the API nests indicators and countries.
#[derive(Debug, PartialEq, Eq, Clone, Hash, Serialize, Deserialize)]
pub struct IdValue {
    pub id: String,
    pub value: String,
}

/// Describes one page of an API response.
///
/// Only the first page is ever consumed; see [`IndicatorResponse::is_truncated`].
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct PaginationMeta {
    #[serde(deserialize_with = "lenient_u32")]
    pub page: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub pages: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub per_page: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub total: u32,
    #[serde(default, rename = "sourceid")]
    pub source_id: Option<String>,
    #[serde(default, rename = "lastupdated")]
    pub last_updated: Option<String>,
}

impl PaginationMeta {
    pub fn last_updated_date(&self) -> Option<NaiveDate> {
        self.last_updated
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, LAST_UPDATED_FORMAT).ok())
    }
}

/// The API sends page counters as numbers, older deployments as numeric strings.
fn lenient_u32<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u32),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s.trim().parse::<u32>().map_err(serde::de::Error::custom),
    }
}

/// A measurement is kept only when the API sends a JSON number; `null`,
/// strings and anything else read as missing.
fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        _ => None,
    })
}

/// One observation row exactly as the API encodes it.
#[derive(Debug, Clone, Deserialize)]
struct RawObservation {
    indicator: IdValue,
    country: IdValue,
    #[serde(default)]
    countryiso3code: String,
    date: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    value: Option<f64>,
    #[serde(default)]
    unit: String,
    #[serde(default)]
    obs_status: String,
    #[serde(default)]
    decimal: Option<i64>,
}

/// One (country, indicator, year) measurement.
///
/// `country_id` is the code the API groups by (ISO2 for the ASEAN queries);
/// `country_iso3` locates the country on a choropleth map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub indicator: IdValue,
    pub country_id: String,
    pub country_name: String,
    pub country_iso3: String,
    pub year: i32,
    /// Absent when the API has no measurement for that year.
    pub value: Option<f64>,
    pub unit: String,
    pub obs_status: String,
    pub decimal: i64,
}

impl Observation {
    /// The value if it is present and a finite number.
    pub fn numeric_value(&self) -> Option<f64> {
        self.value.filter(|v| v.is_finite())
    }
}

impl TryFrom<RawObservation> for Observation {
    type Error = FetchError;

    fn try_from(raw: RawObservation) -> Result<Self> {
        // Annual series use "2020"; sub-annual ones ("2020Q1", "2020M01") keep the year prefix.
        let year = raw
            .date
            .get(0..4)
            .and_then(|y| y.parse::<i32>().ok())
            .ok_or_else(|| {
                FetchError::malformed(format!(
                    "unparseable date {:?} for {}",
                    raw.date, raw.country.id
                ))
            })?;
        Ok(Observation {
            indicator: raw.indicator,
            country_id: raw.country.id,
            country_name: raw.country.value,
            country_iso3: raw.countryiso3code,
            year,
            value: raw.value,
            unit: raw.unit,
            obs_status: raw.obs_status,
            decimal: raw.decimal.unwrap_or_default(),
        })
    }
}

/// The first page of an indicator query: pagination meta plus observations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorResponse {
    pub pagination: PaginationMeta,
    pub observations: Vec<Observation>,
}

impl IndicatorResponse {
    /// Parse the `[paginationMeta, observationArray]` envelope.
    ///
    /// Anything that is not an array of at least two elements is malformed;
    /// this covers API error envelopes (`[{"message": ...}]`) and bodies
    /// that are objects. A `null` observation array is a well-formed
    /// empty result.
    pub fn from_envelope(envelope: &Value) -> Result<IndicatorResponse> {
        let parts = match envelope.as_array() {
            Some(parts) if parts.len() >= 2 => parts,
            Some(parts) => {
                return Err(FetchError::malformed(format!(
                    "expected a 2-element array, got {} element(s)",
                    parts.len()
                )))
            }
            None => {
                return Err(FetchError::malformed(
                    "expected a JSON array envelope".to_string(),
                ))
            }
        };

        let pagination = PaginationMeta::deserialize(&parts[0])
            .map_err(|e| FetchError::malformed(format!("pagination metadata: {}", e)))?;

        let observations = match &parts[1] {
            Value::Null => Vec::new(),
            rows => Vec::<RawObservation>::deserialize(rows)
                .map_err(|e| FetchError::malformed(format!("observation array: {}", e)))?
                .into_iter()
                .map(Observation::try_from)
                .collect::<Result<Vec<Observation>>>()?,
        };

        Ok(IndicatorResponse {
            pagination,
            observations,
        })
    }

    /// Parse a raw response body.
    pub fn from_body(body: &str) -> Result<IndicatorResponse> {
        let envelope: Value = serde_json::from_str(body)
            .map_err(|e| FetchError::malformed(format!("invalid JSON: {}", e)))?;
        IndicatorResponse::from_envelope(&envelope)
    }

    /// True when the API holds more rows than this single page returned.
    pub fn is_truncated(&self) -> bool {
        self.pagination.total as usize > self.observations.len()
    }

    /// The observations, or `EmptyResult` when there are none.
    pub fn require_observations(&self) -> Result<&[Observation]> {
        if self.observations.is_empty() {
            Err(FetchError::EmptyResult)
        } else {
            Ok(&self.observations)
        }
    }
}

#[cfg(test)]
mod test {
    use super::IndicatorResponse;
    use crate::error::FetchError;
    use chrono::NaiveDate;

    // https://api.worldbank.org/v2/country/ID;SG/indicator/SP.POP.TOTL?format=json&per_page=500&date=2020:2021
    const STR_RESULT: &str = r#"[
      {"page":1,"pages":1,"per_page":500,"total":4,"sourceid":"2","lastupdated":"2024-06-28"},
      [
        {"indicator":{"id":"SP.POP.TOTL","value":"Population, total"},"country":{"id":"ID","value":"Indonesia"},"countryiso3code":"IDN","date":"2021","value":273753191,"unit":"","obs_status":"","decimal":0},
        {"indicator":{"id":"SP.POP.TOTL","value":"Population, total"},"country":{"id":"ID","value":"Indonesia"},"countryiso3code":"IDN","date":"2020","value":271857970,"unit":"","obs_status":"","decimal":0},
        {"indicator":{"id":"SP.POP.TOTL","value":"Population, total"},"country":{"id":"SG","value":"Singapore"},"countryiso3code":"SGP","date":"2021","value":5453566,"unit":"","obs_status":"","decimal":0},
        {"indicator":{"id":"SP.POP.TOTL","value":"Population, total"},"country":{"id":"SG","value":"Singapore"},"countryiso3code":"SGP","date":"2020","value":null,"unit":"","obs_status":"","decimal":0}
      ]
    ]"#;

    #[test]
    fn test_parse_envelope() {
        let response = IndicatorResponse::from_body(STR_RESULT).unwrap();
        assert_eq!(response.pagination.total, 4);
        assert_eq!(
            response.pagination.last_updated_date(),
            NaiveDate::from_ymd_opt(2024, 6, 28)
        );
        assert_eq!(response.observations.len(), 4);
        let first = &response.observations[0];
        assert_eq!(first.country_id, "ID");
        assert_eq!(first.country_name, "Indonesia");
        assert_eq!(first.country_iso3, "IDN");
        assert_eq!(first.year, 2021);
        assert_eq!(first.value, Some(273753191.0));
        assert_eq!(response.observations[3].value, None);
        assert!(!response.is_truncated());
    }

    #[test]
    fn test_string_page_counters() {
        let body = r#"[{"page":"1","pages":"3","per_page":"500","total":"1200"},[]]"#;
        let response = IndicatorResponse::from_body(body).unwrap();
        assert_eq!(response.pagination.pages, 3);
        assert!(response.is_truncated());
        assert_eq!(response.require_observations(), Err(FetchError::EmptyResult));
    }

    #[test]
    fn test_null_rows_are_empty() {
        let body = r#"[{"page":0,"pages":0,"per_page":500,"total":0,"lastupdated":"2024-06-28"},null]"#;
        let response = IndicatorResponse::from_body(body).unwrap();
        assert!(response.observations.is_empty());
    }

    #[test]
    fn test_malformed_envelopes() {
        for body in [
            "{}",
            "[]",
            r#"[{"message":[{"id":"120","key":"Invalid value","value":"The provided parameter value is not valid"}]}]"#,
            "<html>502 Bad Gateway</html>",
            "",
        ] {
            match IndicatorResponse::from_body(body) {
                Err(FetchError::MalformedResponse(_)) => {}
                other => panic!("expected MalformedResponse for {:?}, got {:?}", body, other),
            }
        }
    }

    #[test]
    fn test_non_numeric_value_reads_as_missing() {
        let body = r#"[{"page":1,"pages":1,"per_page":500,"total":3},
            [{"indicator":{"id":"SP.POP.TOTL","value":"Population, total"},"country":{"id":"ID","value":"Indonesia"},"countryiso3code":"IDN","date":"2021","value":"n/a"},
             {"indicator":{"id":"SP.POP.TOTL","value":"Population, total"},"country":{"id":"ID","value":"Indonesia"},"countryiso3code":"IDN","date":"2020","value":{"x":1}},
             {"indicator":{"id":"SP.POP.TOTL","value":"Population, total"},"country":{"id":"ID","value":"Indonesia"},"countryiso3code":"IDN","date":"2019"}]]"#;
        let response = IndicatorResponse::from_body(body).unwrap();
        assert_eq!(response.observations.len(), 3);
        assert!(response.observations.iter().all(|o| o.value.is_none()));
    }

    #[test]
    fn test_bad_date_is_malformed() {
        let body = r#"[{"page":1,"pages":1,"per_page":500,"total":1},
            [{"indicator":{"id":"SP.POP.TOTL","value":"Population, total"},"country":{"id":"ID","value":"Indonesia"},"countryiso3code":"IDN","date":"n/a","value":1}]]"#;
        assert!(matches!(
            IndicatorResponse::from_body(body),
            Err(FetchError::MalformedResponse(_))
        ));
    }
}
