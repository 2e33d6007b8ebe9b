use serde::{Deserialize, Serialize};

/// Column names of the market table, in display order.
pub const ASSET_RECORD_COLUMNS: [&str; 6] = [
    "id",
    "name",
    "current_price",
    "market_cap",
    "total_volume",
    "price_change_percentage_24h",
];

/// One row of the market table.
///
/// Prices and sizes are denominated in the quote currency of the snapshot
/// that holds the record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Upstream slug, unique within a snapshot
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Non-negative current price
    pub current_price: f64,

    /// Non-negative market capitalization
    pub market_cap: f64,

    /// Non-negative 24h traded volume
    pub total_volume: f64,

    /// Signed 24h change in percent; `None` when upstream has no value
    pub price_change_percentage_24h: Option<f64>,
}

impl AssetRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        current_price: f64,
        market_cap: f64,
        total_volume: f64,
        price_change_percentage_24h: Option<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            current_price,
            market_cap,
            total_volume,
            price_change_percentage_24h,
        }
    }

    /// 24h change with a missing value read as zero.
    pub fn change_24h_or_zero(&self) -> f64 {
        self.price_change_percentage_24h.unwrap_or(0.0)
    }
}
