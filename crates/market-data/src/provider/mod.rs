//! Market data source abstraction and the CoinGecko implementation.
//!
//! This module contains:
//! - The `MarketSource` trait that the acquisition layer fetches through
//! - The CoinGecko `/coins/markets` provider
//!
//! Sources return either a live snapshot or a classified
//! [`MarketDataError`](crate::errors::MarketDataError). Turning a failure into
//! fallback data is the job of the acquisition layer, not of the source.

mod traits;

pub mod coingecko;

// Re-exports
pub use traits::MarketSource;
