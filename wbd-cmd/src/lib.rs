//! Command implementations for the indicator CLI.
//!
//! Every subcommand fetches through a [`QueryCache`] and prints one table to
//! stdout. Nothing is written to disk.

use anyhow::Context;
use clap::{Args, Subcommand};
use log::info;
use std::io::Write;
use std::rc::Rc;
use std::time::Duration;
use wbd_api::country::{asean_iso2, Country};
use wbd_api::fetcher::{DEFAULT_PER_PAGE, WORLD_BANK_BASE_URL};
use wbd_api::request::{DEFAULT_END_YEAR, DEFAULT_START_YEAR};
use wbd_api::{ApiConfig, Indicator, IndicatorClient, IndicatorResponse, QueryKey, TimeRange, Transport};
use wbd_data::{to_bar_series, to_geo_series, to_scatter_points, to_year_series};
use wbd_query::{CacheConfig, QueryCache, QueryState};

pub mod output;
pub mod tables;

use output::OutputFormat;

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Indicator API base URL
    #[arg(long, global = true, default_value = WORLD_BANK_BASE_URL)]
    pub base_url: String,

    /// Rows requested per page (only the first page is read)
    #[arg(long, global = true, default_value_t = DEFAULT_PER_PAGE)]
    pub per_page: u32,

    /// Extra attempts after a network failure
    #[arg(long, global = true, default_value_t = 0)]
    pub retry: u32,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value_t = 60)]
    pub timeout_secs: u64,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

impl GlobalArgs {
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            per_page: self.per_page,
        }
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            stale_after: None,
            retry: self.retry,
        }
    }
}

/// Countries and years to query.
#[derive(Args, Debug, Clone)]
pub struct Scope {
    /// Comma-separated ISO2 codes (default: all ten ASEAN states)
    #[arg(short, long, value_delimiter = ',')]
    pub countries: Vec<String>,

    /// First year of the range
    #[arg(long, default_value_t = DEFAULT_START_YEAR)]
    pub start: i32,

    /// Last year of the range
    #[arg(long, default_value_t = DEFAULT_END_YEAR)]
    pub end: i32,

    /// A single year; overrides --start/--end
    #[arg(long)]
    pub year: Option<i32>,
}

impl Scope {
    /// Validated, upper-cased ISO2 codes in the order given.
    pub fn country_codes(&self) -> anyhow::Result<Vec<String>> {
        if self.countries.is_empty() {
            return Ok(asean_iso2());
        }
        self.countries
            .iter()
            .map(|code| {
                Country::from_iso2(code)
                    .map(|c| c.iso2.to_string())
                    .with_context(|| format!("not an ASEAN ISO2 country code: {}", code))
            })
            .collect()
    }

    pub fn time_range(&self) -> TimeRange {
        match self.year {
            Some(year) => TimeRange::Year(year),
            None => TimeRange::span(self.start, self.end),
        }
    }

    pub fn key(&self, indicator: Indicator) -> anyhow::Result<QueryKey> {
        Ok(QueryKey::new(
            indicator,
            self.country_codes()?,
            Some(self.time_range()),
        ))
    }
}

/// One indicator over a scope.
#[derive(Args, Debug, Clone)]
pub struct Selection {
    /// Indicator code, see `indicators`
    #[arg(short, long, default_value = "BX.KLT.DINV.WD.GD.ZS")]
    pub indicator: String,

    #[command(flatten)]
    pub scope: Scope,
}

impl Selection {
    pub fn key(&self) -> anyhow::Result<QueryKey> {
        let indicator: Indicator = self.indicator.parse()?;
        self.scope.key(indicator)
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the indicator catalog
    Indicators {
        /// Case-insensitive filter on code or label
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Raw observations for one indicator
    Fetch(Selection),

    /// Per-country averages, highest first
    Bar(Selection),

    /// One row per year, one column per country
    Years(Selection),

    /// Map input: ISO3 location, value, name, year
    Geo(Selection),

    /// GDP per capita, exports and population joined on country and year
    Scatter(Scope),
}

pub async fn run(global: GlobalArgs, command: Command) -> anyhow::Result<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(global.timeout_secs))
        .build()?;
    let cache = QueryCache::new(
        IndicatorClient::new(client, global.api_config()),
        global.cache_config(),
    );
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&cache, command, global.format, &mut out).await
}

/// Run `command` against `cache`, writing its table to `out`.
pub async fn execute<T: Transport + 'static, W: Write>(
    cache: &QueryCache<T>,
    command: Command,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Command::Indicators { search } => {
            let rows = tables::indicator_rows(search.as_deref().unwrap_or(""));
            output::write_rows(&rows, format, out)
        }
        Command::Fetch(selection) => {
            let response = fetch(cache, &selection.key()?).await?;
            output::write_rows(
                &tables::observation_rows(&response.observations),
                format,
                out,
            )
        }
        Command::Bar(selection) => {
            let response = fetch(cache, &selection.key()?).await?;
            output::write_rows(&to_bar_series(&response.observations), format, out)
        }
        Command::Years(selection) => {
            let response = fetch(cache, &selection.key()?).await?;
            output::write_years(&to_year_series(&response.observations), format, out)
        }
        Command::Geo(selection) => {
            let response = fetch(cache, &selection.key()?).await?;
            output::write_rows(&to_geo_series(&response.observations), format, out)
        }
        Command::Scatter(scope) => {
            let gdp_key = scope.key(Indicator::GdpPerCapita)?;
            let exports_key = scope.key(Indicator::Exports)?;
            let population_key = scope.key(Indicator::Population)?;
            let (gdp, exports, population) = futures::join!(
                fetch(cache, &gdp_key),
                fetch(cache, &exports_key),
                fetch(cache, &population_key),
            );
            let (gdp, exports, population) = (gdp?, exports?, population?);
            let points = to_scatter_points(
                &gdp.observations,
                &exports.observations,
                &population.observations,
            );
            info!("{} scatter points", points.len());
            output::write_rows(&points, format, out)
        }
    }
}

/// Resolve `key` through the cache; zero observations is an error here.
async fn fetch<T: Transport + 'static>(
    cache: &QueryCache<T>,
    key: &QueryKey,
) -> anyhow::Result<Rc<IndicatorResponse>> {
    info!("Fetching {}", key);
    match cache.fetch(key).await {
        QueryState::Success(response) => {
            let count = response.require_observations()?.len();
            match response.pagination.last_updated_date() {
                Some(date) => info!("{}: {} observations, source updated {}", key, count, date),
                None => info!("{}: {} observations", key, count),
            }
            Ok(response)
        }
        QueryState::Error(e) => Err(e).with_context(|| format!("query {} failed", key)),
        QueryState::Loading | QueryState::Idle => {
            anyhow::bail!("query {} ended without a result", key)
        }
    }
}
