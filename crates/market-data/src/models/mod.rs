//! Market data models
//!
//! This module contains the core data types for market data operations:
//! - `types` - Type aliases (RawPayload)
//! - `currency` - Supported quote currencies (QuoteCurrency)
//! - `asset` - One row of the market table (AssetRecord)
//! - `snapshot` - An ordered, single-currency table of records (MarketSnapshot)

mod asset;
mod currency;
mod snapshot;
mod types;

pub use asset::{AssetRecord, ASSET_RECORD_COLUMNS};
pub use currency::QuoteCurrency;
pub use snapshot::{MarketSnapshot, SnapshotSource};
pub use types::RawPayload;
