//! Error types and retry classification for the market data crate.
//!
//! This module provides:
//! - [`TransportError`]: The failure of a single outbound attempt
//! - [`MarketDataError`]: A classified fetch failure after retries are exhausted
//! - [`ErrorKind`]: The user-facing failure taxonomy carried by diagnostics
//! - [`InputError`]: Rejected caller input (currency, sort key, limit)
//! - [`RetryClass`]: Classification for determining retry behavior

mod retry;

pub use retry::RetryClass;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of one transport attempt.
///
/// The retry loop decides from this value whether another attempt is made.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// The upstream answered with a non-success status.
    #[error("HTTP {status}")]
    Status {
        status: u16,
        /// Parsed `Retry-After` header, when the upstream sent one in seconds.
        retry_after: Option<Duration>,
    },

    /// DNS failure, refused or reset connection.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// No response within the request timeout.
    #[error("Request timed out")]
    Timeout,

    /// A response arrived but its body could not be read.
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// The HTTP client could not be constructed or the request could not be built.
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl TransportError {
    /// Shorthand for a status failure without a `Retry-After` hint.
    pub fn status(status: u16) -> Self {
        Self::Status {
            status,
            retry_after: None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else if let Some(status) = err.status() {
            Self::status(status.as_u16())
        } else if err.is_body() || err.is_decode() {
            Self::Body(err.to_string())
        } else if err.is_builder() {
            Self::Client(err.to_string())
        } else {
            // hyper surfaces resets and closed sockets as plain request errors
            Self::Connect(err.to_string())
        }
    }
}

/// User-facing failure taxonomy.
///
/// Variants are mutually exclusive and listed in classification priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ErrorKind {
    RateLimited,
    HttpError { status: u16 },
    ConnectionFailure,
    Timeout,
    UnexpectedFailure,
}

impl ErrorKind {
    /// Suggested next step shown next to the fallback table.
    pub fn remediation(&self) -> &'static str {
        match self {
            Self::RateLimited => {
                "Too many requests. Wait about a minute before refreshing and reduce how often you reload."
            }
            Self::HttpError { status } if *status >= 500 => {
                "The market data service is having problems. Try again in a few minutes."
            }
            Self::HttpError { .. } => {
                "The market data service rejected the request. Check the selected currency and try again."
            }
            Self::ConnectionFailure => {
                "Could not reach the market data service. Check your network connection and retry."
            }
            Self::Timeout => {
                "The market data service is responding slowly. Wait a moment and retry."
            }
            Self::UnexpectedFailure => "Something went wrong while loading market data. Retry later.",
        }
    }
}

/// Errors that can occur while fetching a market snapshot.
///
/// Each variant maps to exactly one [`ErrorKind`] via [`kind`](Self::kind).
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The upstream kept answering 429 until retries were exhausted.
    #[error("Rate limited: {provider}")]
    RateLimited { provider: String },

    /// The upstream answered with another non-success status.
    #[error("HTTP error from {provider}: status {status}")]
    HttpError { provider: String, status: u16 },

    /// Transport-level failure after retries were exhausted.
    #[error("Connection failure: {provider} - {message}")]
    ConnectionFailure { provider: String, message: String },

    /// No response within the timeout window after retries were exhausted.
    #[error("Timeout: {provider}")]
    Timeout { provider: String },

    /// Anything else during request or parse.
    #[error("Unexpected failure: {provider} - {message}")]
    UnexpectedFailure { provider: String, message: String },
}

impl MarketDataError {
    /// Classify the final transport error of a fetch.
    pub fn from_transport(provider: &str, err: TransportError) -> Self {
        let provider = provider.to_string();
        match err {
            TransportError::Status { status: 429, .. } => Self::RateLimited { provider },
            TransportError::Status { status, .. } => Self::HttpError { provider, status },
            TransportError::Connect(message) => Self::ConnectionFailure { provider, message },
            TransportError::Timeout => Self::Timeout { provider },
            TransportError::Body(message) | TransportError::Client(message) => {
                Self::UnexpectedFailure { provider, message }
            }
        }
    }

    pub fn unexpected(provider: &str, message: impl Into<String>) -> Self {
        Self::UnexpectedFailure {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    /// Returns the user-facing classification of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use coinlens_market_data::errors::{ErrorKind, MarketDataError};
    ///
    /// let error = MarketDataError::HttpError { provider: "COINGECKO".to_string(), status: 503 };
    /// assert_eq!(error.kind(), ErrorKind::HttpError { status: 503 });
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::HttpError { status, .. } => ErrorKind::HttpError { status: *status },
            Self::ConnectionFailure { .. } => ErrorKind::ConnectionFailure,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::UnexpectedFailure { .. } => ErrorKind::UnexpectedFailure,
        }
    }
}

/// Rejected caller input. Raised before any network call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Unsupported quote currency: {0}")]
    UnsupportedCurrency(String),

    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("Limit must be between 1 and {max}, got {value}")]
    LimitOutOfRange { value: usize, max: usize },

    #[error("Limit is not a whole number: {0}")]
    InvalidLimit(String),
}
