use chrono::{DateTime, Utc};
use coinlens_market_data::{
    AssetRecord, ChartSet, Diagnostic, Dimensions, QuoteCurrency, SnapshotSource,
};
use serde::Serialize;

/// Body of `GET /api/v1/markets`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketsResponse {
    pub quote_currency: QuoteCurrency,
    pub source: SnapshotSource,
    pub fetched_at: DateTime<Utc>,
    /// Set when live data could not be loaded and `records` is sample data.
    pub diagnostic: Option<Diagnostic>,
    /// Every asset name in the snapshot, sorted, for the name filter.
    pub available_names: Vec<String>,
    pub dimensions: Dimensions,
    pub records: Vec<AssetRecord>,
    pub charts: ChartSet,
}
