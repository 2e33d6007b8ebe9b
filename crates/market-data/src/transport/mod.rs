//! Outbound transport: retry policy, the single-attempt abstraction and
//! HTTP client construction.
//!
//! The retry loop never touches the network itself. It drives an [`Attempt`],
//! which lets tests replay deterministic failure sequences.

mod attempt;
mod client;
mod policy;

pub use attempt::Attempt;
pub use client::build_client;
pub use policy::{RetryPolicy, DEFAULT_RETRYABLE_STATUS_CODES};
