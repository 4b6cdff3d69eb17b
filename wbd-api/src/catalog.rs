use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of World Bank indicators the dashboard knows how to chart.
///
/// Adding an indicator means adding a variant here plus its row in
/// [`Indicator::code`] and [`Indicator::label`]; selectors and queries pick it
/// up through [`Indicator::ALL`].
#[derive(
    Debug, Default, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Indicator {
    #[default]
    ForeignDirectInvestment,
    Exports,
    NetTrade,
    ElectricityFromCoal,
    Population,
    GdpPerCapita,
}

impl Indicator {
    pub const ALL: [Indicator; 6] = [
        Indicator::ForeignDirectInvestment,
        Indicator::Exports,
        Indicator::NetTrade,
        Indicator::ElectricityFromCoal,
        Indicator::Population,
        Indicator::GdpPerCapita,
    ];

    /// World Bank indicator code used in the request path.
    pub fn code(&self) -> &'static str {
        match self {
            Indicator::ForeignDirectInvestment => "BX.KLT.DINV.WD.GD.ZS",
            Indicator::Exports => "NE.EXP.GNFS.ZS",
            Indicator::NetTrade => "BN.GSR.GNFS.CD",
            Indicator::ElectricityFromCoal => "EG.ELC.COAL.ZS",
            Indicator::Population => "SP.POP.TOTL",
            Indicator::GdpPerCapita => "NY.GDP.PCAP.CD",
        }
    }

    /// Human-readable label for selectors and chart titles.
    pub fn label(&self) -> &'static str {
        match self {
            Indicator::ForeignDirectInvestment => {
                "Foreign direct investment, net inflows (% of GDP)"
            }
            Indicator::Exports => "Exports of goods and services (% of GDP)",
            Indicator::NetTrade => "Net trade in goods and services (BoP, current US$)",
            Indicator::ElectricityFromCoal => {
                "Electricity production from coal sources (% of total)"
            }
            Indicator::Population => "Population, total",
            Indicator::GdpPerCapita => "GDP per capita (current US$)",
        }
    }

    /// Case-insensitive substring match on label or code, for the
    /// searchable indicator dropdown. An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        needle.is_empty()
            || self.label().to_lowercase().contains(&needle)
            || self.code().to_lowercase().contains(&needle)
    }

    /// Catalog entries matching a search query, in catalog order.
    pub fn search(query: &str) -> Vec<Indicator> {
        Indicator::ALL
            .iter()
            .filter(|i| i.matches(query))
            .copied()
            .collect()
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a code is not part of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownIndicator(pub String);

impl fmt::Display for UnknownIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown indicator code: {}", self.0)
    }
}

impl std::error::Error for UnknownIndicator {}

impl FromStr for Indicator {
    type Err = UnknownIndicator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Indicator::ALL
            .iter()
            .find(|i| i.code().eq_ignore_ascii_case(code))
            .copied()
            .ok_or_else(|| UnknownIndicator(code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::Indicator;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique_and_round_trip() {
        let codes: HashSet<&str> = Indicator::ALL.iter().map(|i| i.code()).collect();
        assert_eq!(codes.len(), Indicator::ALL.len());
        for indicator in Indicator::ALL {
            assert_eq!(indicator.code().parse::<Indicator>(), Ok(indicator));
        }
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        let err = "XX.NOPE".parse::<Indicator>().unwrap_err();
        assert_eq!(err.0, "XX.NOPE");
    }

    #[test]
    fn test_search() {
        assert_eq!(Indicator::search("population"), vec![Indicator::Population]);
        assert_eq!(Indicator::search("ny.gdp"), vec![Indicator::GdpPerCapita]);
        assert_eq!(Indicator::search("").len(), 6);
        assert!(Indicator::search("rainfall").is_empty());
    }
}
