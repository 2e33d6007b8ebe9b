use std::time::Duration;

use reqwest::Client;

use crate::errors::TransportError;

const USER_AGENT: &str = concat!("coinlens/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client used for one acquisition run.
///
/// The timeout bounds each individual attempt, not the whole retry sequence.
pub fn build_client(timeout: Duration) -> Result<Client, TransportError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| TransportError::Client(e.to_string()))
}
