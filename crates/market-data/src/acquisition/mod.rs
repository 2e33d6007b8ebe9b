//! Acquisition orchestration.
//!
//! Ties the source, the retry policy and the fallback together. One run
//! moves through
//!
//! ```text
//! Start -> Fetching -> Succeeded
//!                   -> Failed -> Fallback -> Succeeded
//! ```
//!
//! and always ends in `Succeeded` with either a live or a fallback snapshot.
//! A failed fetch is only visible through the attached [`Diagnostic`].

mod diagnostic;

pub use diagnostic::Diagnostic;

use std::time::Duration;

use log::{debug, info, warn};

use crate::config::FetchConfig;
use crate::errors::MarketDataError;
use crate::fallback::fallback_snapshot;
use crate::models::{MarketSnapshot, QuoteCurrency};
use crate::provider::coingecko::CoinGeckoProvider;
use crate::provider::MarketSource;

/// States of one acquisition run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AcquisitionState {
    Start,
    Fetching,
    Succeeded,
    Failed,
    Fallback,
}

/// Result of one acquisition run.
#[derive(Clone, Debug)]
pub struct Acquisition {
    pub snapshot: MarketSnapshot,
    /// Present exactly when `snapshot` is fallback data.
    pub diagnostic: Option<Diagnostic>,
    /// States visited, in order.
    pub transitions: Vec<AcquisitionState>,
}

impl Acquisition {
    pub fn into_parts(self) -> (MarketSnapshot, Option<Diagnostic>) {
        (self.snapshot, self.diagnostic)
    }

    pub fn is_fallback(&self) -> bool {
        self.snapshot.is_fallback()
    }
}

/// Bookkeeping for a single run.
struct AcquisitionRun {
    currency: QuoteCurrency,
    transitions: Vec<AcquisitionState>,
}

impl AcquisitionRun {
    fn start(currency: QuoteCurrency) -> Self {
        Self {
            currency,
            transitions: vec![AcquisitionState::Start],
        }
    }

    fn enter(&mut self, state: AcquisitionState) {
        debug!("Acquisition for {}: {:?}", self.currency, state);
        self.transitions.push(state);
    }

    fn succeed(mut self, snapshot: MarketSnapshot) -> Acquisition {
        self.enter(AcquisitionState::Succeeded);
        Acquisition {
            snapshot,
            diagnostic: None,
            transitions: self.transitions,
        }
    }

    fn fall_back(mut self, error: MarketDataError) -> Acquisition {
        self.enter(AcquisitionState::Failed);
        let diagnostic = Diagnostic::from_error(&error);
        warn!("Market fetch failed, using fallback data: {}", diagnostic.summary());

        self.enter(AcquisitionState::Fallback);
        let snapshot = fallback_snapshot(self.currency);

        self.enter(AcquisitionState::Succeeded);
        Acquisition {
            snapshot,
            diagnostic: Some(diagnostic),
            transitions: self.transitions,
        }
    }

    /// Give up before or during fetching and serve fallback data.
    fn abandon(mut self, error: MarketDataError) -> Acquisition {
        self.enter(AcquisitionState::Fetching);
        self.fall_back(error)
    }

    async fn fetch_from(mut self, source: &dyn MarketSource) -> Acquisition {
        self.enter(AcquisitionState::Fetching);
        match source.fetch_markets(self.currency).await {
            Ok(snapshot) if !snapshot.is_empty() => {
                info!(
                    "Acquired {} live assets in {} from '{}'",
                    snapshot.len(),
                    self.currency,
                    source.id()
                );
                self.succeed(snapshot)
            }
            Ok(_) => self.fall_back(MarketDataError::unexpected(
                source.id(),
                "Source returned an empty snapshot",
            )),
            Err(error) => self.fall_back(error),
        }
    }
}

/// Fetch one snapshot from `source`, substituting fallback data on failure.
///
/// Never fails; a failed fetch yields the fallback snapshot plus a diagnostic.
pub async fn acquire(source: &dyn MarketSource, currency: QuoteCurrency) -> Acquisition {
    AcquisitionRun::start(currency).fetch_from(source).await
}

/// [`acquire`] bounded by `deadline`.
///
/// A fetch still running when the deadline passes is dropped and reported
/// as a timeout.
pub async fn acquire_within(
    source: &dyn MarketSource,
    currency: QuoteCurrency,
    deadline: Duration,
) -> Acquisition {
    match tokio::time::timeout(deadline, acquire(source, currency)).await {
        Ok(acquisition) => acquisition,
        Err(_) => {
            warn!(
                "Market fetch from '{}' exceeded {:?}, abandoning it",
                source.id(),
                deadline
            );
            AcquisitionRun::start(currency).abandon(MarketDataError::Timeout {
                provider: source.id().to_string(),
            })
        }
    }
}

/// Entry point for hosts.
///
/// Each call builds its own CoinGecko client, runs one acquisition within
/// [`FetchConfig::deadline`] and drops the client; nothing is shared between
/// calls.
#[derive(Clone, Debug, Default)]
pub struct MarketDataService {
    config: FetchConfig,
}

impl MarketDataService {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    pub async fn fetch(&self, currency: QuoteCurrency) -> Acquisition {
        match CoinGeckoProvider::new(self.config.clone()) {
            Ok(provider) => acquire_within(&provider, currency, self.config.deadline).await,
            Err(error) => AcquisitionRun::start(currency).abandon(error),
        }
    }
}
