//! Coinlens Market Data Crate
//!
//! Resilient acquisition of a ranked cryptocurrency market table from the
//! CoinGecko API, plus the selection and chart projections built on it.
//!
//! # Overview
//!
//! - Bounded retries with exponential backoff on transient failures
//! - Request timeout and a pause before every fetch to respect rate limits
//! - Classified failures, reported as a diagnostic, never as an error
//! - Static fallback data with the same schema as live data
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  QuoteCurrency   |  (validated input)
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! |   Acquisition    | --> |   RetryPolicy    |  (backoff over an Attempt)
//! +------------------+     +------------------+
//!          |                        |
//!          |                        v
//!          |               +------------------+
//!          |               | CoinGeckoProvider|  (GET /coins/markets)
//!          |               +------------------+
//!          |  on failure
//!          v
//! +------------------+
//! |    Fallback      |  (static snapshot)
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! |    Selection     | --> |    ChartSet      |
//! +------------------+     +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`AssetRecord`] - One row of the market table
//! - [`MarketSnapshot`] - Ordered records in one quote currency, live or fallback
//! - [`Acquisition`] - A snapshot plus the optional [`Diagnostic`]
//! - [`RetryPolicy`] - Retry and backoff configuration
//! - [`FetchConfig`] - Everything a fetch needs besides the currency

pub mod acquisition;
pub mod charts;
pub mod config;
pub mod errors;
pub mod fallback;
pub mod models;
pub mod provider;
pub mod selection;
pub mod transport;
pub mod validator;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export all public types from models
pub use models::{
    AssetRecord, MarketSnapshot, QuoteCurrency, RawPayload, SnapshotSource,
    ASSET_RECORD_COLUMNS,
};

pub use acquisition::{acquire, acquire_within, Acquisition, AcquisitionState, Diagnostic, MarketDataService};
pub use charts::ChartSet;
pub use config::{FetchConfig, DEFAULT_BASE_URL, MAX_PER_PAGE};
pub use errors::{ErrorKind, InputError, MarketDataError, TransportError};
pub use fallback::fallback_snapshot;
pub use provider::coingecko::CoinGeckoProvider;
pub use provider::MarketSource;
pub use selection::{available_names, Dimensions, SelectedTable, Selection, SortKey};
pub use transport::{Attempt, RetryPolicy};
pub use validator::RecordValidator;
