use serde::Serialize;

/// One member of the fixed country universe the dashboard targets.
///
/// The World Bank API is queried with ISO2 codes, while choropleth maps
/// locate regions by ISO3; both live on the same row so they cannot drift.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub struct Country {
    pub iso2: &'static str,
    pub iso3: &'static str,
    pub name: &'static str,
}

/// The ten ASEAN member states.
pub const ASEAN_COUNTRIES: [Country; 10] = [
    Country { iso2: "BN", iso3: "BRN", name: "Brunei Darussalam" },
    Country { iso2: "KH", iso3: "KHM", name: "Cambodia" },
    Country { iso2: "ID", iso3: "IDN", name: "Indonesia" },
    Country { iso2: "LA", iso3: "LAO", name: "Lao PDR" },
    Country { iso2: "MM", iso3: "MMR", name: "Myanmar" },
    Country { iso2: "MY", iso3: "MYS", name: "Malaysia" },
    Country { iso2: "PH", iso3: "PHL", name: "Philippines" },
    Country { iso2: "SG", iso3: "SGP", name: "Singapore" },
    Country { iso2: "TH", iso3: "THA", name: "Thailand" },
    Country { iso2: "VN", iso3: "VNM", name: "Viet Nam" },
];

impl Country {
    /// Look up an ASEAN country by ISO2 code (case-insensitive).
    pub fn from_iso2(code: &str) -> Option<Country> {
        ASEAN_COUNTRIES
            .iter()
            .find(|c| c.iso2.eq_ignore_ascii_case(code.trim()))
            .copied()
    }

    /// Look up an ASEAN country by ISO3 code (case-insensitive).
    pub fn from_iso3(code: &str) -> Option<Country> {
        ASEAN_COUNTRIES
            .iter()
            .find(|c| c.iso3.eq_ignore_ascii_case(code.trim()))
            .copied()
    }
}

/// ISO2 codes of the ASEAN universe, in catalog order.
pub fn asean_iso2() -> Vec<String> {
    ASEAN_COUNTRIES.iter().map(|c| c.iso2.to_string()).collect()
}

/// ISO3 codes of the ASEAN universe, in catalog order.
pub fn asean_iso3() -> Vec<String> {
    ASEAN_COUNTRIES.iter().map(|c| c.iso3.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_lists_are_parallel() {
        let iso2 = asean_iso2();
        let iso3 = asean_iso3();
        assert_eq!(iso2.len(), 10);
        assert_eq!(iso3.len(), 10);
        for (two, three) in iso2.iter().zip(iso3.iter()) {
            let by_two = Country::from_iso2(two).unwrap();
            assert_eq!(by_two.iso3, three);
            assert_eq!(Country::from_iso3(three), Some(by_two));
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(Country::from_iso2("id").map(|c| c.iso3), Some("IDN"));
        assert_eq!(Country::from_iso3("vnm").map(|c| c.iso2), Some("VN"));
        assert!(Country::from_iso2("US").is_none());
    }
}
