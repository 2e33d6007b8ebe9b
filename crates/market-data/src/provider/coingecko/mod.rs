//! CoinGecko market data provider implementation.
//!
//! Fetches the top-ranked assets for a quote currency from the
//! `/coins/markets` endpoint, one page, ordered by descending market cap.
//!
//! The public API is rate limited aggressively, so every fetch pauses before
//! its first attempt and retries transient failures per [`RetryPolicy`](crate::transport::RetryPolicy).
//! API documentation: https://docs.coingecko.com/reference/coins-markets

mod models;

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::{header, Client};

use crate::config::FetchConfig;
use crate::errors::{MarketDataError, TransportError};
use crate::models::{AssetRecord, MarketSnapshot, QuoteCurrency, RawPayload, SnapshotSource};
use crate::provider::MarketSource;
use crate::transport::{build_client, Attempt};
use crate::validator::RecordValidator;

use models::MarketEntry;

const PROVIDER_ID: &str = "COINGECKO";
const MARKETS_PATH: &str = "/coins/markets";

// ============================================================================
// Single HTTP attempt
// ============================================================================

/// One `GET /coins/markets` request, repeatable by the retry loop.
struct MarketsAttempt<'a> {
    client: &'a Client,
    url: String,
    query: Vec<(&'static str, String)>,
}

#[async_trait]
impl Attempt for MarketsAttempt<'_> {
    async fn attempt(&self) -> Result<RawPayload, TransportError> {
        debug!("CoinGecko request: {} {:?}", self.url, self.query);

        let response = self.client.get(&self.url).query(&self.query).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                retry_after: retry_after(response.headers()),
            });
        }

        Ok(response.text().await?)
    }
}

/// Parse a `Retry-After` header given in seconds. HTTP-date values are ignored.
fn retry_after(headers: &header::HeaderMap) -> Option<Duration> {
    headers
        .get(header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

// ============================================================================
// CoinGeckoProvider
// ============================================================================

/// CoinGecko market data provider.
///
/// Owns the HTTP client for the lifetime of one acquisition run.
pub struct CoinGeckoProvider {
    client: Client,
    config: FetchConfig,
    validator: RecordValidator,
}

impl CoinGeckoProvider {
    /// Create a provider with a freshly built client.
    pub fn new(config: FetchConfig) -> Result<Self, MarketDataError> {
        let client = build_client(config.request_timeout)
            .map_err(|e| MarketDataError::from_transport(PROVIDER_ID, e))?;
        Ok(Self::with_client(client, config))
    }

    /// Create a provider around an existing client.
    pub fn with_client(client: Client, config: FetchConfig) -> Self {
        Self {
            client,
            config,
            validator: RecordValidator::new(),
        }
    }

    fn markets_url(&self) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), MARKETS_PATH)
    }

    fn markets_query(&self, currency: QuoteCurrency) -> Vec<(&'static str, String)> {
        vec![
            ("vs_currency", currency.as_str().to_string()),
            ("order", "market_cap_desc".to_string()),
            ("per_page", self.config.page_size().to_string()),
            ("page", "1".to_string()),
            ("sparkline", "false".to_string()),
        ]
    }

    /// Run `attempt` under the retry policy and turn its payload into a snapshot.
    ///
    /// Skips the pre-request pause; [`MarketSource::fetch_markets`] applies it.
    pub async fn fetch_with(
        &self,
        attempt: &dyn Attempt,
        currency: QuoteCurrency,
    ) -> Result<MarketSnapshot, MarketDataError> {
        let payload = self
            .config
            .retry
            .run(attempt)
            .await
            .map_err(|e| MarketDataError::from_transport(PROVIDER_ID, e))?;

        let records = parse_markets(&payload, self.config.page_size())?;
        let records = self.validator.validate(records);

        if records.is_empty() {
            return Err(MarketDataError::unexpected(
                PROVIDER_ID,
                "Response contained no usable assets",
            ));
        }

        info!(
            "Fetched {} assets priced in {} from {}",
            records.len(),
            currency,
            PROVIDER_ID
        );

        Ok(MarketSnapshot::new(currency, SnapshotSource::Live, records))
    }
}

/// Decode the markets array, dropping rows beyond `limit`.
fn parse_markets(payload: &str, limit: usize) -> Result<Vec<AssetRecord>, MarketDataError> {
    let entries: Vec<MarketEntry> = serde_json::from_str(payload).map_err(|e| {
        MarketDataError::unexpected(PROVIDER_ID, format!("Failed to parse markets response: {}", e))
    })?;

    if entries.len() > limit {
        debug!("Dropping {} assets beyond the requested {}", entries.len() - limit, limit);
    }

    Ok(entries.into_iter().take(limit).map(AssetRecord::from).collect())
}

#[async_trait]
impl MarketSource for CoinGeckoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_markets(
        &self,
        currency: QuoteCurrency,
    ) -> Result<MarketSnapshot, MarketDataError> {
        if !self.config.request_pause.is_zero() {
            debug!("Pausing {:?} before requesting markets", self.config.request_pause);
            tokio::time::sleep(self.config.request_pause).await;
        }

        let attempt = MarketsAttempt {
            client: &self.client,
            url: self.markets_url(),
            query: self.markets_query(currency),
        };

        self.fetch_with(&attempt, currency).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::test_support::{markets_body, ScriptedAttempt};
    use crate::transport::RetryPolicy;
    use mockito::{Matcher, Server};

    fn fast_config(base_url: String) -> FetchConfig {
        FetchConfig {
            base_url,
            request_pause: Duration::ZERO,
            retry: RetryPolicy {
                backoff_factor: 0.0,
                ..RetryPolicy::default()
            },
            ..FetchConfig::default()
        }
    }

    async fn create_server_and_provider() -> (mockito::ServerGuard, CoinGeckoProvider) {
        let server = Server::new_async().await;
        let provider = CoinGeckoProvider::new(fast_config(server.url())).unwrap();
        (server, provider)
    }

    fn scripted_provider() -> CoinGeckoProvider {
        CoinGeckoProvider::new(FetchConfig {
            request_pause: Duration::ZERO,
            ..FetchConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_parse_drops_image_and_unknown_fields() {
        let records = parse_markets(&markets_body(5), 100).unwrap();

        assert_eq!(records.len(), 5);
        for record in &records {
            let json = serde_json::to_value(record).unwrap();
            assert!(json.get("image").is_none());
            assert!(json.get("symbol").is_none());
        }
    }

    #[test]
    fn test_parse_truncates_to_limit() {
        let records = parse_markets(&markets_body(7), 3).unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["bitcoin", "ethereum", "tether"]);
    }

    #[test]
    fn test_parse_null_values() {
        let body = r#"[{"id":"new-coin","name":"New Coin","current_price":null,"market_cap":null,"total_volume":null,"price_change_percentage_24h":null,"image":"x"}]"#;
        let records = parse_markets(body, 100).unwrap();

        assert_eq!(records[0].current_price, 0.0);
        assert_eq!(records[0].market_cap, 0.0);
        assert_eq!(records[0].price_change_percentage_24h, None);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_markets(r#"{"status":{"error_code":429}}"#, 100).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedFailure);
    }

    #[test]
    fn test_retry_after_header() {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::RETRY_AFTER, "7".parse().unwrap());
        assert_eq!(retry_after(&headers), Some(Duration::from_secs(7)));

        headers.insert(
            header::RETRY_AFTER,
            "Wed, 21 Oct 2015 07:28:00 GMT".parse().unwrap(),
        );
        assert_eq!(retry_after(&headers), None);
    }

    #[tokio::test]
    async fn test_fetch_sends_markets_query() {
        let (mut server, provider) = create_server_and_provider().await;
        let mock = server
            .mock("GET", "/coins/markets")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("vs_currency".into(), "eur".into()),
                Matcher::UrlEncoded("order".into(), "market_cap_desc".into()),
                Matcher::UrlEncoded("per_page".into(), "100".into()),
                Matcher::UrlEncoded("page".into(), "1".into()),
                Matcher::UrlEncoded("sparkline".into(), "false".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(markets_body(5))
            .expect(1)
            .create_async()
            .await;

        let snapshot = provider.fetch_markets(QuoteCurrency::Eur).await.unwrap();

        mock.assert_async().await;
        assert_eq!(snapshot.len(), 5);
        assert_eq!(snapshot.quote_currency, QuoteCurrency::Eur);
        assert_eq!(snapshot.source, SnapshotSource::Live);
        assert_eq!(
            snapshot.ids(),
            vec!["bitcoin", "ethereum", "tether", "binancecoin", "solana"]
        );
    }

    #[tokio::test]
    async fn test_fetch_keeps_at_most_one_full_page() {
        let (mut server, provider) = create_server_and_provider().await;
        let mock = server
            .mock("GET", "/coins/markets")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(markets_body(120))
            .expect(1)
            .create_async()
            .await;

        let snapshot = provider.fetch_markets(QuoteCurrency::Usd).await.unwrap();

        mock.assert_async().await;
        assert_eq!(snapshot.len(), 100);
        assert_eq!(snapshot.ids()[0], "bitcoin");
        assert_eq!(snapshot.ids()[99], "coin-99");
    }

    #[tokio::test]
    async fn test_fetch_retries_server_errors() {
        let (mut server, provider) = create_server_and_provider().await;
        let failing = server
            .mock("GET", "/coins/markets")
            .match_query(Matcher::Any)
            .with_status(502)
            .expect(2)
            .create_async()
            .await;
        let succeeding = server
            .mock("GET", "/coins/markets")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(markets_body(3))
            .expect(1)
            .create_async()
            .await;

        let snapshot = provider.fetch_markets(QuoteCurrency::Usd).await.unwrap();

        failing.assert_async().await;
        succeeding.assert_async().await;
        assert_eq!(snapshot.len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_rate_limited_after_exhausting_retries() {
        let (mut server, provider) = create_server_and_provider().await;
        let mock = server
            .mock("GET", "/coins/markets")
            .match_query(Matcher::Any)
            .with_status(429)
            .expect(4)
            .create_async()
            .await;

        let err = provider.fetch_markets(QuoteCurrency::Usd).await.unwrap_err();

        mock.assert_async().await;
        assert_eq!(err.kind(), ErrorKind::RateLimited);
    }

    #[tokio::test]
    async fn test_fetch_client_error_is_not_retried() {
        let (mut server, provider) = create_server_and_provider().await;
        let mock = server
            .mock("GET", "/coins/markets")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"error":"Not found"}"#)
            .expect(1)
            .create_async()
            .await;

        let err = provider.fetch_markets(QuoteCurrency::Usd).await.unwrap_err();

        mock.assert_async().await;
        assert_eq!(err.kind(), ErrorKind::HttpError { status: 404 });
    }

    #[tokio::test]
    async fn test_fetch_malformed_body_is_unexpected() {
        let (mut server, provider) = create_server_and_provider().await;
        let _mock = server
            .mock("GET", "/coins/markets")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let err = provider.fetch_markets(QuoteCurrency::Usd).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedFailure);
    }

    #[tokio::test]
    async fn test_fetch_empty_array_is_unexpected() {
        let (mut server, provider) = create_server_and_provider().await;
        let _mock = server
            .mock("GET", "/coins/markets")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let err = provider.fetch_markets(QuoteCurrency::Usd).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedFailure);
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let provider = CoinGeckoProvider::new(fast_config("http://127.0.0.1:1".to_string())).unwrap();

        let err = provider.fetch_markets(QuoteCurrency::Usd).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConnectionFailure);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_with_timeouts_classifies_timeout() {
        let provider = scripted_provider();
        let attempt = ScriptedAttempt::always(TransportError::Timeout);

        let err = provider
            .fetch_with(&attempt, QuoteCurrency::Usd)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert_eq!(attempt.calls(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_with_success_on_final_retry() {
        let provider = scripted_provider();
        let attempt = ScriptedAttempt::new(vec![
            Err(TransportError::status(500)),
            Err(TransportError::status(504)),
            Err(TransportError::status(429)),
            Ok(markets_body(5)),
        ]);

        let snapshot = provider
            .fetch_with(&attempt, QuoteCurrency::Btc)
            .await
            .unwrap();

        assert_eq!(snapshot.len(), 5);
        assert_eq!(snapshot.source, SnapshotSource::Live);
        assert_eq!(attempt.calls(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_precedes_first_attempt() {
        let provider = CoinGeckoProvider::new(FetchConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            retry: RetryPolicy::no_retries(),
            ..FetchConfig::default()
        })
        .unwrap();

        let start = tokio::time::Instant::now();
        let _ = provider.fetch_markets(QuoteCurrency::Usd).await;

        assert!(start.elapsed() >= Duration::from_secs(1));
    }
}
