//! Fixed fetch configuration, overridable by the host application.

use std::time::Duration;

use crate::transport::RetryPolicy;

/// Public CoinGecko v3 API.
pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Largest page the upstream serves for `/coins/markets` in this app.
pub const MAX_PER_PAGE: usize = 100;

/// Settings for one market fetch.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchConfig {
    /// API root, without the `/coins/markets` path.
    pub base_url: String,
    /// Number of top-ranked assets to request, at most [`MAX_PER_PAGE`].
    pub per_page: usize,
    /// Timeout of each individual attempt.
    pub request_timeout: Duration,
    /// Pause before the first attempt to stay under upstream rate limits.
    pub request_pause: Duration,
    /// Budget for one whole acquisition, pause and retries included.
    /// Exceeding it ends the fetch with a timeout and fallback data.
    pub deadline: Duration,
    pub retry: RetryPolicy,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            per_page: MAX_PER_PAGE,
            request_timeout: Duration::from_secs(10),
            request_pause: Duration::from_secs(1),
            deadline: Duration::from_secs(45),
            retry: RetryPolicy::default(),
        }
    }
}

impl FetchConfig {
    /// Page size actually requested, clamped to `1..=MAX_PER_PAGE`.
    pub fn page_size(&self) -> usize {
        self.per_page.clamp(1, MAX_PER_PAGE)
    }
}
