use crate::error::{FetchError, Result};
use crate::observation::IndicatorResponse;
use crate::request::QueryKey;
use log::{debug, warn};
use serde_json::Value;
use std::future::Future;

/// Base URL of the World Bank v2 API.
pub const WORLD_BANK_BASE_URL: &str = "https://api.worldbank.org/v2";

/// Page size requested from the API.
pub const DEFAULT_PER_PAGE: u32 = 500;

/// Where and how much to request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub per_page: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: WORLD_BANK_BASE_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Status and body of a completed HTTP GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// An HTTP GET capable backend.
///
/// `reqwest::Client` implements it natively (feature `api`); the WASM app
/// supplies a browser `fetch` implementation. Errors returned here are
/// transport failures and should be `FetchError::Network`.
pub trait Transport {
    fn request(&self, url: &str) -> impl Future<Output = Result<HttpResponse>>;
}

/// The Remote Data Fetcher: one GET per call, no caching, no retries.
#[derive(Debug, Clone)]
pub struct IndicatorClient<T> {
    transport: T,
    config: ApiConfig,
}

impl<T: Transport> IndicatorClient<T> {
    pub fn new(transport: T, config: ApiConfig) -> Self {
        IndicatorClient { transport, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the first page of observations for `key`.
    ///
    /// Fails with `Network` when the transport rejects, or when a non-2xx
    /// status carries no parseable JSON; with `MalformedResponse` when the
    /// body is not the `[meta, rows]` envelope.
    pub async fn fetch(&self, key: &QueryKey) -> Result<IndicatorResponse> {
        let url = key.url(&self.config.base_url, self.config.per_page);
        debug!("GET {}", url);

        let response = self.transport.request(&url).await?;

        let envelope: Value = match serde_json::from_str(&response.body) {
            Ok(envelope) => envelope,
            Err(_) if !response.is_success() => {
                return Err(FetchError::network(format!(
                    "HTTP {} from {}",
                    response.status, url
                )));
            }
            Err(e) => {
                return Err(FetchError::malformed(format!("invalid JSON: {}", e)));
            }
        };

        let parsed = IndicatorResponse::from_envelope(&envelope)?;
        if parsed.is_truncated() {
            warn!(
                "{}: only page {} of {} consumed ({} of {} rows)",
                key,
                parsed.pagination.page,
                parsed.pagination.pages,
                parsed.observations.len(),
                parsed.pagination.total
            );
        }
        debug!("{}: {} observations", key, parsed.observations.len());
        Ok(parsed)
    }
}

#[cfg(feature = "api")]
impl Transport for reqwest::Client {
    async fn request(&self, url: &str) -> Result<HttpResponse> {
        let response = reqwest::Client::get(self, url)
            .send()
            .await
            .map_err(|e| FetchError::network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::network(format!("failed to read body: {}", e)))?;
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Indicator;
    use crate::request::TimeRange;
    use futures::executor::block_on;
    use std::cell::RefCell;

    /// Replies with a canned response and records requested URLs.
    struct CannedTransport {
        reply: Result<HttpResponse>,
        urls: RefCell<Vec<String>>,
    }

    impl CannedTransport {
        fn new(reply: Result<HttpResponse>) -> Self {
            CannedTransport {
                reply,
                urls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for CannedTransport {
        async fn request(&self, url: &str) -> Result<HttpResponse> {
            self.urls.borrow_mut().push(url.to_string());
            self.reply.clone()
        }
    }

    fn ok(body: &str) -> Result<HttpResponse> {
        Ok(HttpResponse {
            status: 200,
            body: body.to_string(),
        })
    }

    fn key() -> QueryKey {
        QueryKey::new(
            Indicator::ForeignDirectInvestment,
            vec!["ID".to_string()],
            Some(TimeRange::span(2011, 2021)),
        )
    }

    const ONE_ROW: &str = r#"[{"page":1,"pages":1,"per_page":500,"total":1,"sourceid":"2","lastupdated":"2024-06-28"},
        [{"indicator":{"id":"BX.KLT.DINV.WD.GD.ZS","value":"Foreign direct investment, net inflows (% of GDP)"},
          "country":{"id":"ID","value":"Indonesia"},"countryiso3code":"IDN","date":"2020","value":3.2,
          "unit":"","obs_status":"","decimal":1}]]"#;

    #[test]
    fn test_fetch_issues_one_request() {
        let client = IndicatorClient::new(CannedTransport::new(ok(ONE_ROW)), ApiConfig::default());
        let response = block_on(client.fetch(&key())).unwrap();
        assert_eq!(response.observations.len(), 1);
        assert_eq!(response.observations[0].value, Some(3.2));
        let urls = client.transport().urls.borrow();
        assert_eq!(urls.len(), 1);
        assert_eq!(
            urls[0],
            "https://api.worldbank.org/v2/country/ID/indicator/BX.KLT.DINV.WD.GD.ZS?format=json&per_page=500&date=2011:2021"
        );
    }

    #[test]
    fn test_object_body_is_malformed() {
        let client = IndicatorClient::new(CannedTransport::new(ok("{}")), ApiConfig::default());
        let err = block_on(client.fetch(&key())).unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(_)));
    }

    #[test]
    fn test_html_error_page_with_bad_status_is_network() {
        let reply = Ok(HttpResponse {
            status: 502,
            body: "<html><body>Bad Gateway</body></html>".to_string(),
        });
        let client = IndicatorClient::new(CannedTransport::new(reply), ApiConfig::default());
        let err = block_on(client.fetch(&key())).unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }

    #[test]
    fn test_html_page_with_ok_status_is_malformed() {
        let client = IndicatorClient::new(
            CannedTransport::new(ok("<html>maintenance</html>")),
            ApiConfig::default(),
        );
        let err = block_on(client.fetch(&key())).unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(_)));
    }

    #[test]
    fn test_transport_failure_propagates() {
        let client = IndicatorClient::new(
            CannedTransport::new(Err(FetchError::network("dns failure"))),
            ApiConfig::default(),
        );
        let err = block_on(client.fetch(&key())).unwrap_err();
        assert_eq!(err, FetchError::Network("dns failure".to_string()));
    }
}
