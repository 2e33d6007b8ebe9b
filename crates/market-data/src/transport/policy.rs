//! Bounded retry with exponential backoff.
//!
//! A failed attempt is retried when it is a connection error, a timeout, or
//! a status listed in [`RetryPolicy::retryable_status_codes`]. The wait
//! before retry `n` (1-based) is `backoff_factor * 2^(n - 1)` seconds,
//! capped at `max_backoff`.

use std::time::Duration;

use log::{debug, warn};

use super::attempt::Attempt;
use crate::errors::{RetryClass, TransportError};
use crate::models::RawPayload;

/// Default number of retries after the first attempt.
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default backoff base in seconds.
const DEFAULT_BACKOFF_FACTOR: f64 = 0.3;

/// Default cap for a single backoff wait.
const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(120);

/// Statuses retried by default.
pub const DEFAULT_RETRYABLE_STATUS_CODES: [u16; 4] = [500, 502, 504, 429];

/// Retry configuration for outbound requests.
///
/// Stateless: the same policy may drive any number of independent runs.
#[derive(Clone, Debug, PartialEq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt.
    pub max_retries: u32,
    /// Base of the exponential backoff, in seconds.
    pub backoff_factor: f64,
    /// Statuses that trigger a retry. Every other status fails immediately.
    pub retryable_status_codes: Vec<u16>,
    /// Upper bound for one wait, including a `Retry-After` hint.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_factor: DEFAULT_BACKOFF_FACTOR,
            retryable_status_codes: DEFAULT_RETRYABLE_STATUS_CODES.to_vec(),
            max_backoff: DEFAULT_MAX_BACKOFF,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn no_retries() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Returns the retry classification for a failed attempt.
    pub fn classify(&self, error: &TransportError) -> RetryClass {
        match error {
            TransportError::Connect(_) | TransportError::Timeout => RetryClass::WithBackoff,
            TransportError::Status { status, .. } if self.retryable_status_codes.contains(status) => {
                RetryClass::WithBackoff
            }
            TransportError::Status { .. } | TransportError::Body(_) | TransportError::Client(_) => {
                RetryClass::Never
            }
        }
    }

    /// Computed wait before retry `retry` (1-based).
    pub fn backoff_for(&self, retry: u32) -> Duration {
        if retry == 0 || !self.backoff_factor.is_finite() || self.backoff_factor <= 0.0 {
            return Duration::ZERO;
        }

        let exponent = (retry - 1).min(31) as i32;
        let millis = self.backoff_factor * 1000.0 * 2f64.powi(exponent);
        let max_millis = self.max_backoff.as_millis() as f64;

        Duration::from_millis(millis.min(max_millis).round() as u64)
    }

    /// Wait before retry `retry`, honoring a `Retry-After` hint when present.
    fn delay_for(&self, retry: u32, error: &TransportError) -> Duration {
        match error {
            TransportError::Status {
                retry_after: Some(hint),
                ..
            } => (*hint).min(self.max_backoff),
            _ => self.backoff_for(retry),
        }
    }

    /// Drive `attempt` until it succeeds, fails terminally, or retries run out.
    ///
    /// Returns the payload of the first successful attempt, or the error of
    /// the last attempt made.
    pub async fn run(&self, attempt: &dyn Attempt) -> Result<RawPayload, TransportError> {
        let mut retries = 0u32;

        loop {
            match attempt.attempt().await {
                Ok(payload) => {
                    if retries > 0 {
                        debug!("Attempt succeeded after {} retries", retries);
                    }
                    return Ok(payload);
                }
                Err(error) => {
                    if self.classify(&error) == RetryClass::Never {
                        debug!("Attempt failed with {}, not retrying", error);
                        return Err(error);
                    }

                    if retries >= self.max_retries {
                        warn!(
                            "Attempt failed with {} and {} retries are exhausted",
                            error, self.max_retries
                        );
                        return Err(error);
                    }

                    retries += 1;
                    let delay = self.delay_for(retries, &error);
                    warn!(
                        "Attempt failed with {}, retry {}/{} in {:?}",
                        error, retries, self.max_retries, delay
                    );

                    if delay > Duration::ZERO {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }
    }
}
