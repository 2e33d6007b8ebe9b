use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::asset::AssetRecord;
use super::currency::QuoteCurrency;

/// Where the records of a snapshot came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotSource {
    Live,
    Fallback,
}

/// Ordered market table priced in a single quote currency.
///
/// Records keep the upstream order (descending market capitalization).
/// A snapshot is either entirely live or entirely fallback data.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub quote_currency: QuoteCurrency,
    pub source: SnapshotSource,
    pub fetched_at: DateTime<Utc>,
    pub records: Vec<AssetRecord>,
}

impl MarketSnapshot {
    pub fn new(
        quote_currency: QuoteCurrency,
        source: SnapshotSource,
        records: Vec<AssetRecord>,
    ) -> Self {
        Self {
            quote_currency,
            source,
            fetched_at: Utc::now(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_fallback(&self) -> bool {
        self.source == SnapshotSource::Fallback
    }

    /// Record ids in snapshot order.
    pub fn ids(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.id.as_str()).collect()
    }
}
