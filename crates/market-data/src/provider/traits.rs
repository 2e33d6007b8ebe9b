//! Market data source trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{MarketSnapshot, QuoteCurrency};

/// Trait for sources of ranked market snapshots.
///
/// Implement this trait to fetch from a different upstream, or to replace
/// the network in tests.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use coinlens_market_data::provider::MarketSource;
///
/// struct StaticSource;
///
/// #[async_trait]
/// impl MarketSource for StaticSource {
///     fn id(&self) -> &'static str {
///         "STATIC"
///     }
///
///     async fn fetch_markets(
///         &self,
///         currency: QuoteCurrency,
///     ) -> Result<MarketSnapshot, MarketDataError> {
///         Ok(fallback_snapshot(currency))
///     }
/// }
/// ```
#[async_trait]
pub trait MarketSource: Send + Sync {
    /// Unique identifier for this source.
    ///
    /// Should be a constant string like "COINGECKO". Used for logging and
    /// error attribution.
    fn id(&self) -> &'static str;

    /// Fetch the top-ranked assets priced in `currency`.
    ///
    /// # Returns
    ///
    /// A live snapshot with at least one record, in descending market-cap
    /// order, or a classified `MarketDataError`.
    async fn fetch_markets(
        &self,
        currency: QuoteCurrency,
    ) -> Result<MarketSnapshot, MarketDataError>;
}
