//! User-facing report of a failed fetch.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorKind, MarketDataError};

/// Side-channel message shown next to fallback data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub kind: ErrorKind,
    /// Short description of what failed.
    pub message: String,
    /// Suggested next step for the user.
    pub remediation: String,
    /// Underlying error text, for logs and bug reports.
    pub detail: String,
}

impl Diagnostic {
    pub fn from_error(error: &MarketDataError) -> Self {
        let kind = error.kind();
        let message = match kind {
            ErrorKind::RateLimited => "Rate limit exceeded while loading live market data.".to_string(),
            ErrorKind::HttpError { status } => {
                format!("The market data service answered with HTTP {}.", status)
            }
            ErrorKind::ConnectionFailure => "Could not connect to the market data service.".to_string(),
            ErrorKind::Timeout => "The market data request timed out.".to_string(),
            ErrorKind::UnexpectedFailure => {
                "An unexpected error occurred while loading market data.".to_string()
            }
        };

        Self {
            kind,
            message: format!("{} Showing sample data instead.", message),
            remediation: kind.remediation().to_string(),
            detail: error.to_string(),
        }
    }

    /// One-line form for logging.
    pub fn summary(&self) -> String {
        format!("{:?}: {} ({})", self.kind, self.message, self.detail)
    }
}
