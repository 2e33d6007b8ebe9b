use std::sync::Arc;

use crate::config::Config;
use coinlens_market_data::MarketDataService;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    /// Builds a fresh upstream client for every fetch; holds configuration only.
    pub market_data: MarketDataService,
}

pub fn init_tracing() {
    let log_format = std::env::var("CL_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> Arc<AppState> {
    let fetch = config.fetch_config();
    tracing::info!(
        "Market data from {} (retries: {}, backoff factor: {}s, timeout: {:?}, deadline: {:?})",
        fetch.base_url,
        fetch.retry.max_retries,
        fetch.retry.backoff_factor,
        fetch.request_timeout,
        fetch.deadline
    );
    Arc::new(AppState {
        market_data: MarketDataService::new(fetch),
    })
}
