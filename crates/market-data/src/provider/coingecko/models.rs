//! CoinGecko API response models.
//!
//! Only the columns of the market table are mapped. Everything else in the
//! payload (`image`, `symbol`, `market_cap_rank`, ...) is ignored while
//! deserializing and never reaches a record.

use serde::Deserialize;

use crate::models::AssetRecord;

/// One element of the `/coins/markets` response array
#[derive(Debug, Deserialize)]
pub struct MarketEntry {
    pub id: String,
    pub name: String,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub total_volume: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
}

impl From<MarketEntry> for AssetRecord {
    fn from(entry: MarketEntry) -> Self {
        AssetRecord {
            id: entry.id,
            name: entry.name,
            // Upstream sends null for assets without trading data
            current_price: entry.current_price.unwrap_or(0.0),
            market_cap: entry.market_cap.unwrap_or(0.0),
            total_volume: entry.total_volume.unwrap_or(0.0),
            price_change_percentage_24h: entry.price_change_percentage_24h,
        }
    }
}
